mod credential_store;

pub use credential_store::{Credential, CredentialError, CredentialStore};
