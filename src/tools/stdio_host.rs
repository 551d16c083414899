// Line-oriented JSON host: reads one request per line and writes one JSON
// reply per line. Stands in for the hosting framework when the service is
// run as a standalone process.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::dispatcher::ToolDispatcher;
use super::tool_catalog::{service_metadata, tool_definitions};
use crate::core::credentials::{Credential, CredentialStore};
use crate::core::sheets::{AuthUrlProvider, SheetsApi};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostRequest {
    Invoke {
        tool: String,
        #[serde(rename = "agentId")]
        agent_id: String,
        #[serde(default)]
        input: Value,
    },
    OauthSuccess {
        #[serde(rename = "agentId")]
        agent_id: String,
        tokens: OAuthTokens,
    },
    Manifest,
}

/// Token set handed over by the OAuth callback.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl OAuthTokens {
    /// Fails when `expires_in` does not fit in a timestamp.
    pub fn into_credential(self, now: DateTime<Utc>) -> Result<Credential> {
        let mut credential = Credential::new(self.access_token);
        if let Some(refresh_token) = self.refresh_token {
            credential = credential.with_refresh_token(refresh_token);
        }
        if let Some(seconds) = self.expires_in {
            let expiry = Duration::try_seconds(seconds)
                .and_then(|lifetime| now.checked_add_signed(lifetime))
                .with_context(|| format!("expiresIn out of range: {}", seconds))?;
            credential = credential.with_expiry(expiry);
        }
        Ok(credential)
    }
}

/// Serve requests until the reader hits EOF.
pub async fn serve<S, A, U, R, W>(
    dispatcher: &ToolDispatcher<S, A, U>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    S: CredentialStore,
    A: SheetsApi,
    U: AuthUrlProvider,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    tracing::info!("Host loop started");

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = handle_line(dispatcher, &line).await;
        let mut encoded = serde_json::to_string(&reply)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }

    tracing::info!("Input closed, host loop finished");
    Ok(())
}

async fn handle_line<S, A, U>(dispatcher: &ToolDispatcher<S, A, U>, line: &str) -> Value
where
    S: CredentialStore,
    A: SheetsApi,
    U: AuthUrlProvider,
{
    let request = match serde_json::from_str::<HostRequest>(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed host request");
            return json!({ "error": format!("Malformed request: {}", e) });
        }
    };

    match request {
        HostRequest::Invoke {
            tool,
            agent_id,
            input,
        } => {
            let envelope = dispatcher.dispatch(&tool, &agent_id, input).await;
            serde_json::to_value(envelope)
                .unwrap_or_else(|e| json!({ "error": format!("Failed to encode reply: {}", e) }))
        }
        HostRequest::OauthSuccess { agent_id, tokens } => {
            let credential = match tokens.into_credential(Utc::now()) {
                Ok(credential) => credential,
                Err(e) => {
                    tracing::warn!(agent_id = %agent_id, error = %e, "Rejected OAuth tokens");
                    return json!({ "ok": false, "error": e.to_string() });
                }
            };
            match dispatcher.service().store_credential(&agent_id, credential).await {
                Ok(()) => json!({ "ok": true }),
                Err(e) => {
                    tracing::error!(agent_id = %agent_id, error = %e, "Failed to store credential");
                    json!({ "ok": false, "error": e.to_string() })
                }
            }
        }
        HostRequest::Manifest => json!({
            "service": service_metadata(),
            "tools": tool_definitions(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sheets::{AuthUrlError, SheetsError, SheetsRequest, SheetsService};
    use crate::infra::credentials::InMemoryCredentialStore;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct EchoApi;

    #[async_trait]
    impl SheetsApi for EchoApi {
        async fn execute(
            &self,
            access_token: &str,
            request: &SheetsRequest,
        ) -> Result<Value, SheetsError> {
            Ok(json!({ "token": access_token, "spreadsheetId": request.segments[0] }))
        }
    }

    struct StaticAuthUrl;

    impl AuthUrlProvider for StaticAuthUrl {
        fn authorization_url(&self, agent_id: &str) -> Result<String, AuthUrlError> {
            Ok(format!("https://auth.test/?state={}", agent_id))
        }
    }

    fn dispatcher() -> ToolDispatcher<InMemoryCredentialStore, EchoApi, StaticAuthUrl> {
        let service = SheetsService::new(InMemoryCredentialStore::new(), EchoApi, StaticAuthUrl);
        ToolDispatcher::new(Arc::new(service))
    }

    async fn run(input: &str) -> Vec<Value> {
        let dispatcher = dispatcher();
        let mut output = Vec::new();
        serve(&dispatcher, input.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_oauth_then_invoke_uses_stored_token() {
        let input = concat!(
            r#"{"type":"invoke","tool":"get-spreadsheet","agentId":"a1","input":{"spreadsheetId":"S1"}}"#,
            "\n",
            r#"{"type":"oauthSuccess","agentId":"a1","tokens":{"accessToken":"tok","expiresIn":3600}}"#,
            "\n",
            r#"{"type":"invoke","tool":"get-spreadsheet","agentId":"a1","input":{"spreadsheetId":"S1"}}"#,
            "\n",
        );

        let replies = run(input).await;
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0]["text"], "Authentication required");
        assert_eq!(replies[0]["ui"]["type"], "oauth");
        assert_eq!(replies[1], json!({ "ok": true }));
        assert_eq!(replies[2]["data"]["token"], "tok");
        assert_eq!(replies[2]["ui"]["type"], "card");
    }

    #[tokio::test]
    async fn test_manifest_lists_all_tools() {
        let replies = run("{\"type\":\"manifest\"}\n").await;
        assert_eq!(replies[0]["service"]["title"], "Google Sheets Service");
        assert_eq!(replies[0]["tools"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_malformed_lines_get_error_and_loop_continues() {
        let replies = run("not json\n\n{\"type\":\"manifest\"}\n").await;
        assert_eq!(replies.len(), 2);
        assert!(replies[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Malformed request"));
        assert!(replies[1].get("tools").is_some());
    }

    #[tokio::test]
    async fn test_out_of_range_expiry_is_rejected_and_loop_continues() {
        let input = concat!(
            r#"{"type":"oauthSuccess","agentId":"a1","tokens":{"accessToken":"tok","expiresIn":9223372036854775807}}"#,
            "\n",
            r#"{"type":"oauthSuccess","agentId":"a1","tokens":{"accessToken":"tok","expiresIn":1000000000000000}}"#,
            "\n",
            r#"{"type":"invoke","tool":"get-spreadsheet","agentId":"a1","input":{"spreadsheetId":"S1"}}"#,
            "\n",
            "{\"type\":\"manifest\"}\n",
        );

        let replies = run(input).await;
        assert_eq!(replies.len(), 4);
        for reply in &replies[..2] {
            assert_eq!(reply["ok"], false);
            assert!(reply["error"].as_str().unwrap().contains("expiresIn"));
        }
        // Nothing was stored for the agent
        assert_eq!(replies[2]["text"], "Authentication required");
        assert_eq!(replies[3]["tools"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_tokens_become_credential_with_expiry() {
        let now = Utc::now();
        let tokens = OAuthTokens {
            access_token: "tok".to_string(),
            refresh_token: Some("ref".to_string()),
            expires_in: Some(3600),
        };

        let credential = tokens.into_credential(now).unwrap();
        assert_eq!(credential.refresh_token.as_deref(), Some("ref"));
        assert_eq!(credential.expiry, Some(now + Duration::seconds(3600)));
    }
}
