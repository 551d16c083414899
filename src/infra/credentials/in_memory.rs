// In-memory implementation of CredentialStore.
// Credentials live only as long as the process; restarting means every agent
// signs in again. Use SqliteCredentialStore when that is not acceptable.

use crate::core::credentials::{Credential, CredentialError, CredentialStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// Agent id -> credential, safe to share across concurrent tool invocations.
pub struct InMemoryCredentialStore {
    credentials: DashMap<String, Credential>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: DashMap::new(),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get_credential(&self, agent_id: &str) -> Result<Option<Credential>, CredentialError> {
        // Clone out of the guard so no shard lock is held across an await
        Ok(self
            .credentials
            .get(agent_id)
            .map(|entry| entry.value().clone()))
    }

    async fn set_credential(
        &self,
        agent_id: &str,
        credential: Credential,
    ) -> Result<(), CredentialError> {
        self.credentials.insert(agent_id.to_string(), credential);
        Ok(())
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
