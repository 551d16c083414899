// Turns successful Sheets responses into a one-line summary plus a UI card.
// Missing fields never fail a call that Sheets already accepted; they render
// as "unknown".

use serde_json::{json, Value};

use crate::core::ui::{CardUi, TableColumn, TableUi, UiDescriptor};

/// Summary text and UI for a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessView {
    pub text: String,
    pub ui: UiDescriptor,
}

/// Display a JSON field addressed by a JSON pointer (e.g. `/properties/title`).
fn field(body: &Value, pointer: &str) -> String {
    match body.pointer(pointer) {
        Some(value) => display(value).unwrap_or_else(|| "unknown".to_string()),
        None => "unknown".to_string(),
    }
}

fn display(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn created_spreadsheet(title: &str, body: &Value) -> SuccessView {
    let card = CardUi::new("Spreadsheet Created").fields([
        ("Title", field(body, "/properties/title")),
        ("ID", field(body, "/spreadsheetId")),
        ("URL", field(body, "/spreadsheetUrl")),
    ]);

    SuccessView {
        text: format!("Created spreadsheet: {}", title),
        ui: card.into(),
    }
}

pub fn spreadsheet_details(body: &Value) -> SuccessView {
    let sheet_count = body
        .get("sheets")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);

    let card = CardUi::new("Spreadsheet Details").fields([
        ("Title", field(body, "/properties/title")),
        ("ID", field(body, "/spreadsheetId")),
        ("URL", field(body, "/spreadsheetUrl")),
        ("Locale", field(body, "/properties/locale")),
        ("Timezone", field(body, "/properties/timeZone")),
        ("Number of Sheets", sheet_count.to_string()),
    ]);

    SuccessView {
        text: format!("Retrieved spreadsheet: {}", field(body, "/properties/title")),
        ui: card.into(),
    }
}

pub fn appended_values(range: &str, body: &Value) -> SuccessView {
    let card = CardUi::new("Values Appended").fields([
        ("Range", field(body, "/tableRange")),
        ("Updated Range", field(body, "/updates/updatedRange")),
        ("Updated Rows", field(body, "/updates/updatedRows")),
        ("Updated Columns", field(body, "/updates/updatedColumns")),
        ("Updated Cells", field(body, "/updates/updatedCells")),
    ]);

    SuccessView {
        text: format!("Appended values to spreadsheet range: {}", range),
        ui: card.into(),
    }
}

pub fn cleared_range(range: &str, body: &Value) -> SuccessView {
    let card = CardUi::new("Range Cleared").fields([
        ("Spreadsheet ID", field(body, "/spreadsheetId")),
        ("Cleared Range", field(body, "/clearedRange")),
    ]);

    SuccessView {
        text: format!("Cleared range {} in spreadsheet", range),
        ui: card.into(),
    }
}

pub fn retrieved_values(range: &str, body: &Value) -> SuccessView {
    // Sheets omits `values` entirely for an empty range
    let rows = body
        .get("values")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .map(|row| {
                    let cells = row
                        .as_array()
                        .map(|cells| {
                            cells
                                .iter()
                                .map(|cell| display(cell).unwrap_or_default())
                                .collect::<Vec<_>>()
                                .join(", ")
                        })
                        .unwrap_or_default();
                    json!({ "values": cells })
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let table = TableUi::new()
        .column(TableColumn::text("values", "Values"))
        .rows(rows);

    let card = CardUi::new("Retrieved Values")
        .content(format!("Range: {}", field(body, "/range")))
        .child(table);

    SuccessView {
        text: format!("Retrieved values from range {}", range),
        ui: card.into(),
    }
}

pub fn updated_values(range: &str, body: &Value) -> SuccessView {
    let card = CardUi::new("Values Updated").fields([
        ("Updated Range", field(body, "/updatedRange")),
        ("Updated Rows", field(body, "/updatedRows")),
        ("Updated Columns", field(body, "/updatedColumns")),
        ("Updated Cells", field(body, "/updatedCells")),
    ]);

    SuccessView {
        text: format!("Updated values in range {}", range),
        ui: card.into(),
    }
}
