use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde_json::{json, Value};
use std::time::Duration;

use crate::core::sheets::{HttpMethod, SheetsApi, SheetsError, SheetsRequest};

/// Google's spreadsheets collection endpoint.
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Minimal Sheets REST client. One request in, one decoded JSON body out;
/// no retries.
pub struct SheetsApiClient {
    client: Client,
    base_url: Url,
}

impl SheetsApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SheetsError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "User-Agent",
            HeaderValue::from_static("SheetsToolService/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SheetsError::Transport(e.to_string()))?;

        let base_url =
            Url::parse(base_url).map_err(|e| SheetsError::InvalidBaseUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(SheetsError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self { client, base_url })
    }

    /// Full URL for a request: base + escaped segments + query string.
    fn request_url(&self, request: &SheetsRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            for segment in &request.segments {
                segments.push(segment);
            }
        }

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            );
        }
        url
    }

    fn build_request(
        &self,
        access_token: &str,
        request: &SheetsRequest,
    ) -> Result<reqwest::Request, SheetsError> {
        let url = self.request_url(request);
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
        }
        .bearer_auth(access_token);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder
            .build()
            .map_err(|e| SheetsError::Transport(e.to_string()))
    }
}

#[async_trait]
impl SheetsApi for SheetsApiClient {
    async fn execute(
        &self,
        access_token: &str,
        request: &SheetsRequest,
    ) -> Result<Value, SheetsError> {
        let http_request = self.build_request(access_token, request)?;

        let resp = self
            .client
            .execute(http_request)
            .await
            .map_err(|e| SheetsError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SheetsError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(SheetsError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(json!({}));
        }

        serde_json::from_str(&text).map_err(|e| SheetsError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sheets::{AppendValuesInput, GetValuesInput};

    fn client() -> SheetsApiClient {
        SheetsApiClient::new(DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap()
    }

    /// Serve one canned HTTP response on a local port and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // GET requests carry no body, so the headers are the whole request
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/v4/spreadsheets", addr)
    }

    async fn get_spreadsheet(base_url: &str) -> Result<Value, SheetsError> {
        let client = SheetsApiClient::new(base_url, Duration::from_secs(5)).unwrap();
        let request = SheetsRequest::new(HttpMethod::Get).segment("S1");
        client.execute("abc", &request).await
    }

    #[tokio::test]
    async fn test_error_status_keeps_code_and_body() {
        let base_url = serve_once("403 Forbidden", r#"{"error":{"message":"denied"}}"#).await;

        match get_spreadsheet(&base_url).await {
            Err(SheetsError::Status { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, r#"{"error":{"message":"denied"}}"#);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_is_empty_object() {
        let base_url = serve_once("200 OK", "").await;
        assert_eq!(get_spreadsheet(&base_url).await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn test_success_body_is_returned_verbatim() {
        let base_url = serve_once("200 OK", r#"{"spreadsheetId":"S1","sheets":[]}"#).await;
        assert_eq!(
            get_spreadsheet(&base_url).await.unwrap(),
            json!({ "spreadsheetId": "S1", "sheets": [] })
        );
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_decode_error() {
        let base_url = serve_once("200 OK", "<html>not json</html>").await;
        assert!(matches!(
            get_spreadsheet(&base_url).await,
            Err(SheetsError::Decode(_))
        ));
    }

    #[test]
    fn test_get_values_request_shape() {
        let input = GetValuesInput {
            spreadsheet_id: "S1".to_string(),
            range: "A1:B2".to_string(),
            major_dimension: None,
            value_render_option: None,
            date_time_render_option: None,
        };

        let request = client().build_request("abc", &input.to_request()).unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/S1/values/A1:B2"
        );
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer abc"
        );
        assert!(request.body().is_none());
    }

    #[test]
    fn test_append_request_has_query_and_json_body() {
        let input = AppendValuesInput {
            spreadsheet_id: "S1".to_string(),
            range: "Sheet1!A1".to_string(),
            values: vec![vec![json!("a"), json!(2)]],
            value_input_option: Default::default(),
        };

        let request = client().build_request("abc", &input.to_request()).unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().path(), "/v4/spreadsheets/S1/values/Sheet1!A1:append");
        assert_eq!(
            request.url().query(),
            Some("valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS")
        );
        assert_eq!(
            request.headers()["content-type"].to_str().unwrap(),
            "application/json"
        );

        let body: Value =
            serde_json::from_slice(request.body().and_then(|b| b.as_bytes()).unwrap()).unwrap();
        assert_eq!(body, json!({ "values": [["a", 2]] }));
    }

    #[test]
    fn test_segments_are_escaped() {
        let request = SheetsRequest::new(HttpMethod::Get)
            .segment("S1")
            .segment("values")
            .segment("My Sheet!A1/B2");

        let url = client().request_url(&request);
        assert_eq!(url.path(), "/v4/spreadsheets/S1/values/My%20Sheet!A1%2FB2");
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let client =
            SheetsApiClient::new("http://localhost:9000/v4/spreadsheets/", Duration::from_secs(5))
                .unwrap();
        let url = client.request_url(&SheetsRequest::new(HttpMethod::Get).segment("S1"));
        assert_eq!(url.as_str(), "http://localhost:9000/v4/spreadsheets/S1");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            SheetsApiClient::new("not a url", Duration::from_secs(5)),
            Err(SheetsError::InvalidBaseUrl(_))
        ));
    }
}
