// Catalog of every tool this service exposes, plus the service metadata the
// host shows next to them.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct ServiceMetadata {
    pub title: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub tags: Vec<String>,
}

pub fn service_metadata() -> ServiceMetadata {
    ServiceMetadata {
        title: "Google Sheets Service".to_string(),
        description: "A service for interacting with Google Sheets".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        author: "DAIN".to_string(),
        tags: vec!["sheets".to_string(), "google".to_string()],
    }
}

/// One callable tool: id used for dispatch, human name, and JSON input schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Build tool definitions for all spreadsheet tools.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        create_spreadsheet_def(),
        get_spreadsheet_def(),
        append_values_def(),
        clear_values_def(),
        get_values_def(),
        update_values_def(),
    ]
}

fn values_schema(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "array", "items": {} },
        "description": description
    })
}

fn value_input_option_schema() -> Value {
    json!({
        "type": "string",
        "enum": ["RAW", "USER_ENTERED"],
        "default": "USER_ENTERED",
        "description": "How the input data should be interpreted"
    })
}

fn create_spreadsheet_def() -> ToolDefinition {
    ToolDefinition {
        id: "create-spreadsheet".to_string(),
        name: "Create Spreadsheet".to_string(),
        description: "Creates a new Google Spreadsheet".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "title": { "type": "string", "description": "The title of the new spreadsheet" }
            },
            "required": ["title"]
        }),
    }
}

fn get_spreadsheet_def() -> ToolDefinition {
    ToolDefinition {
        id: "get-spreadsheet".to_string(),
        name: "Get Spreadsheet".to_string(),
        description: "Retrieves a Google Spreadsheet by ID".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "spreadsheetId": { "type": "string", "description": "The ID of the spreadsheet to retrieve" }
            },
            "required": ["spreadsheetId"]
        }),
    }
}

fn append_values_def() -> ToolDefinition {
    ToolDefinition {
        id: "append-spreadsheet-values".to_string(),
        name: "Append to Spreadsheet".to_string(),
        description: "Appends values to a Google Spreadsheet".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "spreadsheetId": { "type": "string", "description": "The ID of the spreadsheet to append to" },
                "range": { "type": "string", "description": "The A1 notation of the range to append to" },
                "values": values_schema("The values to append"),
                "valueInputOption": value_input_option_schema()
            },
            "required": ["spreadsheetId", "range", "values"]
        }),
    }
}

fn clear_values_def() -> ToolDefinition {
    ToolDefinition {
        id: "clear-spreadsheet-values".to_string(),
        name: "Clear Spreadsheet Range".to_string(),
        description: "Clears values from a range in a Google Spreadsheet".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "spreadsheetId": { "type": "string", "description": "The ID of the spreadsheet to clear" },
                "range": { "type": "string", "description": "The A1 notation of the range to clear" }
            },
            "required": ["spreadsheetId", "range"]
        }),
    }
}

fn get_values_def() -> ToolDefinition {
    ToolDefinition {
        id: "get-spreadsheet-values".to_string(),
        name: "Get Spreadsheet Values".to_string(),
        description: "Retrieves values from a range in a Google Spreadsheet".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "spreadsheetId": { "type": "string", "description": "The ID of the spreadsheet to retrieve values from" },
                "range": { "type": "string", "description": "The A1 notation of the range to retrieve values from" },
                "majorDimension": {
                    "type": "string",
                    "enum": ["ROWS", "COLUMNS"],
                    "description": "The major dimension of the values"
                },
                "valueRenderOption": {
                    "type": "string",
                    "enum": ["FORMATTED_VALUE", "UNFORMATTED_VALUE", "FORMULA"],
                    "description": "How values should be represented in the output"
                },
                "dateTimeRenderOption": {
                    "type": "string",
                    "enum": ["SERIAL_NUMBER", "FORMATTED_STRING"],
                    "description": "How dates, times, and durations should be represented"
                }
            },
            "required": ["spreadsheetId", "range"]
        }),
    }
}

fn update_values_def() -> ToolDefinition {
    ToolDefinition {
        id: "update-spreadsheet-values".to_string(),
        name: "Update Spreadsheet Values".to_string(),
        description: "Updates values in a range of a Google Spreadsheet".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "spreadsheetId": { "type": "string", "description": "The ID of the spreadsheet to update" },
                "range": { "type": "string", "description": "The A1 notation of the range to update" },
                "values": values_schema("The values to update"),
                "valueInputOption": value_input_option_schema(),
                "includeValuesInResponse": {
                    "type": "boolean",
                    "description": "Whether to include values in the response"
                }
            },
            "required": ["spreadsheetId", "range", "values"]
        }),
    }
}
