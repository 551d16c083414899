// Presentation descriptors returned alongside every tool result.
//
// These are plain data: the host renders them however it likes. The builder
// methods follow the same chained style as embed builders, so handlers can
// write `CardUi::new("Title").content(..).child(..)`.

use serde::Serialize;
use serde_json::Value;

/// Logo shown on the Google OAuth prompt.
pub const GOOGLE_LOGO_URL: &str =
    "https://www.gstatic.com/images/branding/product/1x/googleg_48dp.png";

/// Any UI element a tool can return.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiDescriptor {
    Card(CardUi),
    Table(TableUi),
    Alert(AlertUi),
    #[serde(rename = "oauth")]
    OAuth(OAuthUi),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardUi {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<UiDescriptor>,
}

impl CardUi {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: String::new(),
            children: Vec::new(),
        }
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Card body made of `Label: value` lines.
    pub fn fields<'a>(self, fields: impl IntoIterator<Item = (&'a str, String)>) -> Self {
        let content = fields
            .into_iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n");
        self.content(content)
    }

    pub fn child(mut self, child: impl Into<UiDescriptor>) -> Self {
        self.children.push(child.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumn {
    pub key: String,
    pub header: String,
    #[serde(rename = "type")]
    pub column_type: String,
}

impl TableColumn {
    pub fn text(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            column_type: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TableUi {
    pub columns: Vec<TableColumn>,
    /// One JSON object per row, keyed by column key.
    pub rows: Vec<Value>,
}

impl TableUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn rows(mut self, rows: Vec<Value>) -> Self {
        self.rows = rows;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertUi {
    pub variant: AlertVariant,
    pub message: String,
}

impl AlertUi {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            variant: AlertVariant::Error,
            message: message.into(),
        }
    }
}

/// Prompt asking the agent to authorize with an OAuth provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OAuthUi {
    pub title: String,
    pub content: String,
    pub logo: String,
    pub url: String,
    pub provider: String,
}

impl OAuthUi {
    /// Google sign-in prompt pointing at `url`.
    pub fn google(content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: "Google Authentication".to_string(),
            content: content.into(),
            logo: GOOGLE_LOGO_URL.to_string(),
            url: url.into(),
            provider: "google".to_string(),
        }
    }
}

impl From<CardUi> for UiDescriptor {
    fn from(card: CardUi) -> Self {
        UiDescriptor::Card(card)
    }
}

impl From<TableUi> for UiDescriptor {
    fn from(table: TableUi) -> Self {
        UiDescriptor::Table(table)
    }
}

impl From<AlertUi> for UiDescriptor {
    fn from(alert: AlertUi) -> Self {
        UiDescriptor::Alert(alert)
    }
}

impl From<OAuthUi> for UiDescriptor {
    fn from(oauth: OAuthUi) -> Self {
        UiDescriptor::OAuth(oauth)
    }
}

// ============================================================================
// ENVELOPE
// ============================================================================

/// The uniform `{text, data, ui}` shape every tool returns to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolEnvelope {
    pub text: String,
    pub data: Option<Value>,
    pub ui: UiDescriptor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_with_table_child_serializes_with_type_tags() {
        let card = CardUi::new("Retrieved Values")
            .content("Range: A1:B2")
            .child(
                TableUi::new()
                    .column(TableColumn::text("values", "Values"))
                    .rows(vec![json!({ "values": "x, y" })]),
            );

        let value = serde_json::to_value(UiDescriptor::from(card)).unwrap();
        assert_eq!(value["type"], "card");
        assert_eq!(value["children"][0]["type"], "table");
        assert_eq!(value["children"][0]["columns"][0]["type"], "text");
        assert_eq!(value["children"][0]["rows"][0]["values"], "x, y");
    }

    #[test]
    fn test_fields_render_one_line_each() {
        let card = CardUi::new("Range Cleared").fields([
            ("Spreadsheet ID", "S1".to_string()),
            ("Cleared Range", "Sheet1!A1:B2".to_string()),
        ]);
        assert_eq!(
            card.content,
            "Spreadsheet ID: S1\nCleared Range: Sheet1!A1:B2"
        );
        // No children means no "children" key on the wire
        let value = serde_json::to_value(UiDescriptor::from(card)).unwrap();
        assert!(value.get("children").is_none());
    }

    #[test]
    fn test_oauth_prompt_and_error_alert_shapes() {
        let oauth = serde_json::to_value(UiDescriptor::from(OAuthUi::google(
            "Please authenticate",
            "https://example.test/auth",
        )))
        .unwrap();
        assert_eq!(oauth["type"], "oauth");
        assert_eq!(oauth["provider"], "google");
        assert_eq!(oauth["logo"], GOOGLE_LOGO_URL);

        let alert = serde_json::to_value(UiDescriptor::from(AlertUi::error("boom"))).unwrap();
        assert_eq!(alert, json!({ "type": "alert", "variant": "error", "message": "boom" }));
    }
}
