// The Sheets service holds the business logic behind every spreadsheet tool.
// It has no HTTP or host-specific code: credentials, the REST client and the
// authorization URL source are all injected through the traits below.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use thiserror::Error;

use super::sheets_formatting::{self as formatting, SuccessView};
use super::sheets_models::{
    AppendValuesInput, ClearValuesInput, CreateSpreadsheetInput, GetSpreadsheetInput,
    GetValuesInput, OperationSpec, SheetsRequest, ToolOutcome, UpdateValuesInput, APPEND_VALUES,
    CLEAR_VALUES, CREATE_SPREADSHEET, GET_SPREADSHEET, GET_VALUES, UPDATE_VALUES,
};
use crate::core::credentials::{Credential, CredentialError, CredentialStore};

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised while talking to the Sheets REST API.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Sheets API request failed: {0}")]
    Transport(String),

    #[error("Sheets API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode Sheets API response: {0}")]
    Decode(String),

    #[error("Invalid Sheets API base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Error)]
pub enum AuthUrlError {
    #[error("Invalid authorization URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// PORTS
// ============================================================================

/// Executes one authenticated call against the spreadsheets collection.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Send `request` with `Authorization: Bearer <access_token>` and return
    /// the decoded JSON body of a 2xx response.
    async fn execute(&self, access_token: &str, request: &SheetsRequest)
        -> Result<Value, SheetsError>;
}

/// Produces the URL an agent must visit to grant access.
pub trait AuthUrlProvider: Send + Sync {
    fn authorization_url(&self, agent_id: &str) -> Result<String, AuthUrlError>;
}

// ============================================================================
// SERVICE
// ============================================================================

/// Runs the six spreadsheet operations on behalf of an agent.
///
/// Every operation goes through [`SheetsService::run`]: look up the
/// credential, fall back to an authorization prompt, otherwise make exactly
/// one API call and format the result. Nothing returned from here is an
/// `Err`; failures become [`ToolOutcome::Failure`].
pub struct SheetsService<S: CredentialStore, A: SheetsApi, U: AuthUrlProvider> {
    store: S,
    api: A,
    auth_urls: U,
}

impl<S, A, U> SheetsService<S, A, U>
where
    S: CredentialStore,
    A: SheetsApi,
    U: AuthUrlProvider,
{
    pub fn new(store: S, api: A, auth_urls: U) -> Self {
        Self {
            store,
            api,
            auth_urls,
        }
    }

    /// OAuth success callback: remember the agent's credential.
    pub async fn store_credential(
        &self,
        agent_id: &str,
        credential: Credential,
    ) -> Result<(), CredentialError> {
        self.store.set_credential(agent_id, credential).await?;
        tracing::info!(agent_id, "Stored OAuth credential for agent");
        Ok(())
    }

    pub async fn create_spreadsheet(
        &self,
        agent_id: &str,
        input: &CreateSpreadsheetInput,
    ) -> ToolOutcome {
        self.run(agent_id, &CREATE_SPREADSHEET, input.to_request(), |body| {
            formatting::created_spreadsheet(&input.title, body)
        })
        .await
    }

    pub async fn get_spreadsheet(&self, agent_id: &str, input: &GetSpreadsheetInput) -> ToolOutcome {
        self.run(
            agent_id,
            &GET_SPREADSHEET,
            input.to_request(),
            formatting::spreadsheet_details,
        )
        .await
    }

    pub async fn append_values(&self, agent_id: &str, input: &AppendValuesInput) -> ToolOutcome {
        self.run(agent_id, &APPEND_VALUES, input.to_request(), |body| {
            formatting::appended_values(&input.range, body)
        })
        .await
    }

    pub async fn clear_values(&self, agent_id: &str, input: &ClearValuesInput) -> ToolOutcome {
        self.run(agent_id, &CLEAR_VALUES, input.to_request(), |body| {
            formatting::cleared_range(&input.range, body)
        })
        .await
    }

    pub async fn get_values(&self, agent_id: &str, input: &GetValuesInput) -> ToolOutcome {
        self.run(agent_id, &GET_VALUES, input.to_request(), |body| {
            formatting::retrieved_values(&input.range, body)
        })
        .await
    }

    pub async fn update_values(&self, agent_id: &str, input: &UpdateValuesInput) -> ToolOutcome {
        self.run(agent_id, &UPDATE_VALUES, input.to_request(), |body| {
            formatting::updated_values(&input.range, body)
        })
        .await
    }

    async fn run<F>(
        &self,
        agent_id: &str,
        op: &OperationSpec,
        request: SheetsRequest,
        format: F,
    ) -> ToolOutcome
    where
        F: FnOnce(&Value) -> SuccessView,
    {
        tracing::info!(agent_id, tool = op.tool_id, "Handling tool invocation");

        let credential = match self.store.get_credential(agent_id).await {
            Ok(Some(credential)) if credential.is_usable_at(Utc::now()) => credential,
            Ok(Some(_)) => {
                tracing::info!(
                    agent_id,
                    tool = op.tool_id,
                    "Stored credential expired; asking agent to re-authorize"
                );
                return self.auth_required(agent_id, op);
            }
            Ok(None) => return self.auth_required(agent_id, op),
            Err(e) => {
                tracing::error!(agent_id, tool = op.tool_id, error = %e, "Credential lookup failed");
                return ToolOutcome::failure(op.failure_headline, e.to_string());
            }
        };

        tracing::debug!(
            agent_id,
            tool = op.tool_id,
            method = ?request.method,
            path = %request.path(),
            "Calling Sheets API"
        );

        match self.api.execute(&credential.access_token, &request).await {
            Ok(body) => {
                let view = format(&body);
                ToolOutcome::Success {
                    text: view.text,
                    payload: body,
                    ui: view.ui,
                }
            }
            Err(e) => {
                tracing::warn!(agent_id, tool = op.tool_id, error = %e, "Sheets API call failed");
                ToolOutcome::failure(op.failure_headline, e.to_string())
            }
        }
    }

    fn auth_required(&self, agent_id: &str, op: &OperationSpec) -> ToolOutcome {
        match self.auth_urls.authorization_url(agent_id) {
            Ok(auth_url) => ToolOutcome::AuthRequired {
                auth_url,
                prompt: op.auth_prompt.to_string(),
            },
            Err(e) => {
                tracing::error!(agent_id, error = %e, "Failed to generate authentication URL");
                ToolOutcome::failure(
                    op.failure_headline,
                    format!("Failed to generate authentication URL: {}", e),
                )
            }
        }
    }
}
