// Credential storage backends.

mod in_memory;
mod sqlite_store;

pub use in_memory::InMemoryCredentialStore;
pub use sqlite_store::SqliteCredentialStore;
