// Sheets infra layer.
// - `sheets_client.rs` talks to the Google Sheets REST API.

#[path = "sheets_client.rs"]
pub mod sheets_client;

pub use sheets_client::{SheetsApiClient, DEFAULT_BASE_URL};
