// Business logic: credential rules, the Sheets operations and the UI
// descriptors they return. Nothing here knows about HTTP or the host.

#[path = "credentials/mod.rs"]
pub mod credentials;

#[path = "sheets/mod.rs"]
pub mod sheets;

#[path = "ui/mod.rs"]
pub mod ui;
