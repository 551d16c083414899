// Spreadsheet tools: typed inputs, the shared "authenticated call + format"
// service, and the ports it depends on.

pub mod sheets_formatting;
pub mod sheets_models;
pub mod sheets_service;

pub use sheets_models::{
    AppendValuesInput, ClearValuesInput, CreateSpreadsheetInput, GetSpreadsheetInput,
    GetValuesInput, HttpMethod, SheetsRequest, ToolOutcome, UpdateValuesInput,
};
pub use sheets_service::{AuthUrlError, AuthUrlProvider, SheetsApi, SheetsError, SheetsService};
