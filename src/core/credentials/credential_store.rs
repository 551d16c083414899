// Credential storage contract for OAuth tokens, keyed by agent.
// No HTTP or storage code lives here; the infra layer provides the backends.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// A credential is considered stale this long before its actual expiry.
const EXPIRY_SKEW_SECS: i64 = 60;

// ============================================================================
// DOMAIN MODELS
// ============================================================================

/// OAuth credential obtained for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// When the access token stops working. `None` means "never checked".
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// Credential carrying only an access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expiry: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Whether the access token can still be sent at `now`.
    ///
    /// Tokens without an expiry are always usable.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry {
            Some(expiry) => now + Duration::seconds(EXPIRY_SKEW_SECS) < expiry,
            None => true,
        }
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Credential storage error: {0}")]
    Storage(String),
}

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Mapping from agent id to its OAuth credential.
///
/// At most one credential is kept per agent; a later `set_credential`
/// replaces the earlier one.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up the credential for an agent. Unknown agents yield `None`.
    async fn get_credential(&self, agent_id: &str) -> Result<Option<Credential>, CredentialError>;

    /// Store (or replace) the credential for an agent.
    async fn set_credential(
        &self,
        agent_id: &str,
        credential: Credential,
    ) -> Result<(), CredentialError>;
}

// Lets main pick the backend at runtime (in-memory or SQLite).
#[async_trait]
impl CredentialStore for Box<dyn CredentialStore> {
    async fn get_credential(&self, agent_id: &str) -> Result<Option<Credential>, CredentialError> {
        (**self).get_credential(agent_id).await
    }

    async fn set_credential(
        &self,
        agent_id: &str,
        credential: Credential,
    ) -> Result<(), CredentialError> {
        (**self).set_credential(agent_id, credential).await
    }
}
