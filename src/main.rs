// Entry point of the Google Sheets tool service.
//
// **Architecture Overview:**
// - `core/` = Business logic (credential rules, Sheets operations, UI models)
// - `infra/` = Implementations of core traits (credential stores, HTTP, OAuth)
// - `tools/` = Host-facing adapters (tool catalog, dispatch, stdio loop)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Serve tool requests over stdin/stdout

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "tools/tools_layer.rs"]
mod tools;

mod config;

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::core::credentials::CredentialStore;
use crate::core::sheets::SheetsService;
use crate::infra::credentials::{InMemoryCredentialStore, SqliteCredentialStore};
use crate::infra::google_oauth::GoogleAuthUrlProvider;
use crate::infra::sheets::SheetsApiClient;
use crate::tools::dispatcher::ToolDispatcher;
use crate::tools::stdio_host;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // stdout carries replies, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ServiceConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let store: Box<dyn CredentialStore> = match &config.credentials_db_path {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory for credential DB at {}", path)
                })?;
            }
            let store = SqliteCredentialStore::new(path)
                .await
                .with_context(|| format!("Failed to open credential DB at {}", path))?;
            tracing::info!(path = %path, "Using SQLite credential store");
            Box::new(store)
        }
        None => {
            tracing::info!("Using in-memory credential store; credentials are lost on exit");
            Box::new(InMemoryCredentialStore::new())
        }
    };

    let api = SheetsApiClient::new(&config.sheets_base_url, config.http_timeout)
        .context("Failed to create Sheets API client")?;

    let auth_urls = GoogleAuthUrlProvider::new(&config.google_client_id, &config.public_base_url);
    tracing::info!(redirect_uri = auth_urls.redirect_uri(), "OAuth redirect configured");

    let service = Arc::new(SheetsService::new(store, api, auth_urls));
    let dispatcher = ToolDispatcher::new(service);

    // ========================================================================
    // HOST LOOP
    // ========================================================================

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    stdio_host::serve(&dispatcher, stdin, tokio::io::stdout()).await?;

    Ok(())
}
