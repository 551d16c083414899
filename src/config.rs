// Runtime configuration, read from the environment (and `.env` via dotenv).

use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::infra::sheets::DEFAULT_BASE_URL;

const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:2022";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub google_client_id: String,
    /// Public base URL the OAuth redirect points back to.
    pub public_base_url: String,
    /// When set, credentials survive restarts in this SQLite file.
    pub credentials_db_path: Option<String>,
    pub sheets_base_url: String,
    pub http_timeout: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(google_client_id) = get("GOOGLE_CLIENT_ID") else {
            bail!("Missing GOOGLE_CLIENT_ID environment variable! Create a .env file with your OAuth client id.");
        };

        let http_timeout = match get("SHEETS_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SHEETS_HTTP_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            google_client_id,
            public_base_url: get("TUNNEL_URL")
                .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
            credentials_db_path: get("CREDENTIALS_DB_PATH"),
            sheets_base_url: get("SHEETS_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            http_timeout: Duration::from_secs(http_timeout),
        })
    }
}
