// Concrete backends for the core ports: credential stores, the Sheets REST
// client and the Google consent URL builder.

#[path = "credentials/mod.rs"]
pub mod credentials;

#[path = "sheets/mod.rs"]
pub mod sheets;

#[path = "google_oauth/mod.rs"]
pub mod google_oauth;
