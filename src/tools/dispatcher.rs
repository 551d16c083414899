// Maps a tool id plus raw JSON input onto a typed SheetsService call and
// renders the outcome as the `{text, data, ui}` envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::core::credentials::CredentialStore;
use crate::core::sheets::{
    AppendValuesInput, AuthUrlProvider, ClearValuesInput, CreateSpreadsheetInput,
    GetSpreadsheetInput, GetValuesInput, SheetsApi, SheetsService, ToolOutcome, UpdateValuesInput,
};
use crate::core::ui::ToolEnvelope;

/// Headline used when a call is rejected before it reaches the service.
const REJECTED_HEADLINE: &str = "Invalid tool call";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Missing agent id")]
    MissingAgent,

    #[error("Invalid input for {tool}: {message}")]
    InvalidInput { tool: String, message: String },
}

pub struct ToolDispatcher<S: CredentialStore, A: SheetsApi, U: AuthUrlProvider> {
    service: Arc<SheetsService<S, A, U>>,
}

impl<S, A, U> ToolDispatcher<S, A, U>
where
    S: CredentialStore,
    A: SheetsApi,
    U: AuthUrlProvider,
{
    pub fn new(service: Arc<SheetsService<S, A, U>>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &SheetsService<S, A, U> {
        &self.service
    }

    /// Run a tool for an agent. Never fails: rejected calls come back as a
    /// failure envelope without touching the credential store or network.
    pub async fn dispatch(&self, tool_id: &str, agent_id: &str, input: Value) -> ToolEnvelope {
        match self.invoke(tool_id, agent_id, input).await {
            Ok(outcome) => outcome.into_envelope(),
            Err(e) => {
                tracing::warn!(tool = tool_id, agent_id, error = %e, "Rejected tool call");
                ToolOutcome::failure(REJECTED_HEADLINE, e.to_string()).into_envelope()
            }
        }
    }

    async fn invoke(
        &self,
        tool_id: &str,
        agent_id: &str,
        input: Value,
    ) -> Result<ToolOutcome, ToolError> {
        if agent_id.trim().is_empty() {
            return Err(ToolError::MissingAgent);
        }

        let outcome = match tool_id {
            "create-spreadsheet" => {
                let input: CreateSpreadsheetInput = parse(tool_id, input)?;
                input.validate().map_err(|e| invalid(tool_id, e))?;
                self.service.create_spreadsheet(agent_id, &input).await
            }
            "get-spreadsheet" => {
                let input: GetSpreadsheetInput = parse(tool_id, input)?;
                input.validate().map_err(|e| invalid(tool_id, e))?;
                self.service.get_spreadsheet(agent_id, &input).await
            }
            "append-spreadsheet-values" => {
                let input: AppendValuesInput = parse(tool_id, input)?;
                input.validate().map_err(|e| invalid(tool_id, e))?;
                self.service.append_values(agent_id, &input).await
            }
            "clear-spreadsheet-values" => {
                let input: ClearValuesInput = parse(tool_id, input)?;
                input.validate().map_err(|e| invalid(tool_id, e))?;
                self.service.clear_values(agent_id, &input).await
            }
            "get-spreadsheet-values" => {
                let input: GetValuesInput = parse(tool_id, input)?;
                input.validate().map_err(|e| invalid(tool_id, e))?;
                self.service.get_values(agent_id, &input).await
            }
            "update-spreadsheet-values" => {
                let input: UpdateValuesInput = parse(tool_id, input)?;
                input.validate().map_err(|e| invalid(tool_id, e))?;
                self.service.update_values(agent_id, &input).await
            }
            other => return Err(ToolError::UnknownTool(other.to_string())),
        };

        Ok(outcome)
    }
}

fn parse<T: DeserializeOwned>(tool_id: &str, input: Value) -> Result<T, ToolError> {
    serde_json::from_value(input).map_err(|e| invalid(tool_id, e))
}

fn invalid(tool_id: &str, err: impl std::fmt::Display) -> ToolError {
    ToolError::InvalidInput {
        tool: tool_id.to_string(),
        message: err.to_string(),
    }
}
