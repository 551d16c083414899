mod ui_models;

pub use ui_models::{AlertUi, CardUi, OAuthUi, TableColumn, TableUi, ToolEnvelope, UiDescriptor};
