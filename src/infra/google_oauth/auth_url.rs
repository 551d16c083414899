// Builds Google OAuth consent URLs for agents that have no credential yet.
// Exchanging the returned code for tokens is the host's job; once it has
// tokens it hands them back through the OAuth success callback.

use reqwest::Url;

use crate::core::sheets::{AuthUrlError, AuthUrlProvider};

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Path (under the public base URL) where the host receives the OAuth redirect.
const CALLBACK_PATH: &str = "/oauth2/callback/google";

/// Scopes requested for spreadsheet access plus basic identity.
const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "email",
    "profile",
];

pub struct GoogleAuthUrlProvider {
    client_id: String,
    redirect_uri: String,
}

impl GoogleAuthUrlProvider {
    /// `base_url` is the publicly reachable address of the host (e.g. a tunnel URL).
    pub fn new(client_id: impl Into<String>, base_url: &str) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: format!("{}{}", base_url.trim_end_matches('/'), CALLBACK_PATH),
        }
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }
}

impl AuthUrlProvider for GoogleAuthUrlProvider {
    fn authorization_url(&self, agent_id: &str) -> Result<String, AuthUrlError> {
        if self.client_id.trim().is_empty() {
            return Err(AuthUrlError::InvalidUrl(
                "Google OAuth client id is empty".to_string(),
            ));
        }

        let scope = SCOPES.join(" ");
        // The agent id rides along in `state` so the callback knows whose tokens these are
        let url = Url::parse_with_params(
            AUTH_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", agent_id),
            ],
        )
        .map_err(|e| AuthUrlError::InvalidUrl(e.to_string()))?;

        Ok(url.into())
    }
}
