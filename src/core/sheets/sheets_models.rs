// Sheets domain models: typed tool inputs, the request descriptor that the
// HTTP client executes, and the outcome every operation resolves to.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::ui::{AlertUi, OAuthUi, ToolEnvelope, UiDescriptor};

/// Envelope text for the "please sign in" branch.
pub const AUTH_REQUIRED_TEXT: &str = "Authentication required";

// ============================================================================
// OPERATION DESCRIPTORS
// ============================================================================

/// Static facts about one tool: its id and the wording used in its replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub tool_id: &'static str,
    pub auth_prompt: &'static str,
    pub failure_headline: &'static str,
}

pub const CREATE_SPREADSHEET: OperationSpec = OperationSpec {
    tool_id: "create-spreadsheet",
    auth_prompt: "Please authenticate with Google to create a spreadsheet",
    failure_headline: "Failed to create spreadsheet",
};

pub const GET_SPREADSHEET: OperationSpec = OperationSpec {
    tool_id: "get-spreadsheet",
    auth_prompt: "Please authenticate with Google to access spreadsheets",
    failure_headline: "Failed to retrieve spreadsheet",
};

pub const APPEND_VALUES: OperationSpec = OperationSpec {
    tool_id: "append-spreadsheet-values",
    auth_prompt: "Please authenticate with Google to append to spreadsheets",
    failure_headline: "Failed to append to spreadsheet",
};

pub const CLEAR_VALUES: OperationSpec = OperationSpec {
    tool_id: "clear-spreadsheet-values",
    auth_prompt: "Please authenticate with Google to clear spreadsheet data",
    failure_headline: "Failed to clear spreadsheet range",
};

pub const GET_VALUES: OperationSpec = OperationSpec {
    tool_id: "get-spreadsheet-values",
    auth_prompt: "Please authenticate with Google to access spreadsheet data",
    failure_headline: "Failed to retrieve spreadsheet values",
};

pub const UPDATE_VALUES: OperationSpec = OperationSpec {
    tool_id: "update-spreadsheet-values",
    auth_prompt: "Please authenticate with Google to update spreadsheet data",
    failure_headline: "Failed to update spreadsheet values",
};

// ============================================================================
// OPTION ENUMS
// ============================================================================

/// How input data should be interpreted by Sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    Raw,
    #[default]
    UserEntered,
}

impl ValueInputOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputOption::Raw => "RAW",
            ValueInputOption::UserEntered => "USER_ENTERED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MajorDimension {
    Rows,
    Columns,
}

impl MajorDimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            MajorDimension::Rows => "ROWS",
            MajorDimension::Columns => "COLUMNS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueRenderOption {
    FormattedValue,
    UnformattedValue,
    Formula,
}

impl ValueRenderOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueRenderOption::FormattedValue => "FORMATTED_VALUE",
            ValueRenderOption::UnformattedValue => "UNFORMATTED_VALUE",
            ValueRenderOption::Formula => "FORMULA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateTimeRenderOption {
    SerialNumber,
    FormattedString,
}

impl DateTimeRenderOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateTimeRenderOption::SerialNumber => "SERIAL_NUMBER",
            DateTimeRenderOption::FormattedString => "FORMATTED_STRING",
        }
    }
}

// ============================================================================
// TOOL INPUTS
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' must not be empty")]
    Empty(&'static str),
}

fn non_empty(field: &'static str, value: &str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        Err(InputError::Empty(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpreadsheetInput {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSpreadsheetInput {
    pub spreadsheet_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendValuesInput {
    pub spreadsheet_id: String,
    /// A1 notation, e.g. `Sheet1!A1:C1`.
    pub range: String,
    pub values: Vec<Vec<Value>>,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearValuesInput {
    pub spreadsheet_id: String,
    pub range: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetValuesInput {
    pub spreadsheet_id: String,
    pub range: String,
    #[serde(default)]
    pub major_dimension: Option<MajorDimension>,
    #[serde(default)]
    pub value_render_option: Option<ValueRenderOption>,
    #[serde(default)]
    pub date_time_render_option: Option<DateTimeRenderOption>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesInput {
    pub spreadsheet_id: String,
    pub range: String,
    pub values: Vec<Vec<Value>>,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
    #[serde(default)]
    pub include_values_in_response: Option<bool>,
}

impl CreateSpreadsheetInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_empty("title", &self.title)
    }

    pub fn to_request(&self) -> SheetsRequest {
        SheetsRequest::new(HttpMethod::Post).body(json!({
            "properties": { "title": self.title }
        }))
    }
}

impl GetSpreadsheetInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_empty("spreadsheetId", &self.spreadsheet_id)
    }

    pub fn to_request(&self) -> SheetsRequest {
        SheetsRequest::new(HttpMethod::Get).segment(&self.spreadsheet_id)
    }
}

impl AppendValuesInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_empty("spreadsheetId", &self.spreadsheet_id)?;
        non_empty("range", &self.range)
    }

    pub fn to_request(&self) -> SheetsRequest {
        SheetsRequest::new(HttpMethod::Post)
            .segment(&self.spreadsheet_id)
            .segment("values")
            .segment(format!("{}:append", self.range))
            .query("valueInputOption", self.value_input_option.as_str())
            .query("insertDataOption", "INSERT_ROWS")
            .body(json!({ "values": self.values }))
    }
}

impl ClearValuesInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_empty("spreadsheetId", &self.spreadsheet_id)?;
        non_empty("range", &self.range)
    }

    pub fn to_request(&self) -> SheetsRequest {
        SheetsRequest::new(HttpMethod::Post)
            .segment(&self.spreadsheet_id)
            .segment("values")
            .segment(format!("{}:clear", self.range))
            .body(json!({}))
    }
}

impl GetValuesInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_empty("spreadsheetId", &self.spreadsheet_id)?;
        non_empty("range", &self.range)
    }

    pub fn to_request(&self) -> SheetsRequest {
        let mut request = SheetsRequest::new(HttpMethod::Get)
            .segment(&self.spreadsheet_id)
            .segment("values")
            .segment(&self.range);

        // Optional parameters are left off entirely so Sheets applies its defaults
        if let Some(dimension) = self.major_dimension {
            request = request.query("majorDimension", dimension.as_str());
        }
        if let Some(render) = self.value_render_option {
            request = request.query("valueRenderOption", render.as_str());
        }
        if let Some(render) = self.date_time_render_option {
            request = request.query("dateTimeRenderOption", render.as_str());
        }
        request
    }
}

impl UpdateValuesInput {
    pub fn validate(&self) -> Result<(), InputError> {
        non_empty("spreadsheetId", &self.spreadsheet_id)?;
        non_empty("range", &self.range)
    }

    pub fn to_request(&self) -> SheetsRequest {
        let mut request = SheetsRequest::new(HttpMethod::Put)
            .segment(&self.spreadsheet_id)
            .segment("values")
            .segment(&self.range)
            .query("valueInputOption", self.value_input_option.as_str());

        if let Some(include) = self.include_values_in_response {
            request = request.query("includeValuesInResponse", include.to_string());
        }
        request.body(json!({ "values": self.values }))
    }
}

// ============================================================================
// REQUEST DESCRIPTOR
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// One call against the spreadsheets collection, independent of any HTTP crate.
///
/// `segments` are appended to the spreadsheets base URL; the client is
/// responsible for escaping them.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetsRequest {
    pub method: HttpMethod,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl SheetsRequest {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Unescaped path relative to the spreadsheets base, e.g. `/S1/values/A1:B2`.
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .map(|segment| format!("/{}", segment))
            .collect()
    }
}

#[cfg(test)]
impl SheetsRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// What a tool invocation resolved to, before it is rendered for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// No usable credential; the agent has to visit `auth_url` first.
    AuthRequired { auth_url: String, prompt: String },
    /// The Sheets call succeeded. `payload` is the response body untouched.
    Success {
        text: String,
        payload: Value,
        ui: UiDescriptor,
    },
    Failure { headline: String, reason: String },
}

impl ToolOutcome {
    pub fn failure(headline: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolOutcome::Failure {
            headline: headline.into(),
            reason: reason.into(),
        }
    }

    pub fn into_envelope(self) -> ToolEnvelope {
        match self {
            ToolOutcome::AuthRequired { auth_url, prompt } => ToolEnvelope {
                text: AUTH_REQUIRED_TEXT.to_string(),
                data: None,
                ui: OAuthUi::google(prompt, auth_url).into(),
            },
            ToolOutcome::Success { text, payload, ui } => ToolEnvelope {
                text,
                data: Some(payload),
                ui,
            },
            ToolOutcome::Failure { headline, reason } => ToolEnvelope {
                ui: AlertUi::error(format!("{}: {}", headline, reason)).into(),
                text: headline,
                data: None,
            },
        }
    }
}
