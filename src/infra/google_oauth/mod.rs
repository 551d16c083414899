mod auth_url;

pub use auth_url::GoogleAuthUrlProvider;
