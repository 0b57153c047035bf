use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use teamdeck::config::ApiConfig;
use teamdeck::credentials::{ApiKeyCredentials, API_KEY_HEADER, TEST_PATH};
use teamdeck::{ApiRequest, ApiResponse, HttpMethod, RequestHelper, TeamdeckError};
use tracing::debug;

/// HTTP client for the Teamdeck REST API.
///
/// Plays the host's authenticated-request helper: resolves paths against
/// the base URL, injects the `X-Api-Key` header and decodes JSON bodies.
pub struct TeamdeckClient {
    credentials: ApiKeyCredentials,
    http_client: Client,
    base_url: String,
}

impl TeamdeckClient {
    /// Create a client from the `[api]` configuration section.
    pub fn from_config(credentials: ApiKeyCredentials, config: &ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            credentials,
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with a custom base URL (for testing with a mock server).
    pub fn with_base_url(credentials: ApiKeyCredentials, base_url: String) -> Result<Self> {
        let config = ApiConfig {
            base_url,
            ..ApiConfig::default()
        };
        Self::from_config(credentials, &config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RequestHelper for TeamdeckClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, TeamdeckError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, url = %url, "Sending Teamdeck request");

        let mut builder = self
            .http_client
            .request(to_method(request.method), &url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            TeamdeckError::upstream(
                e.status().map(|s| s.as_u16()),
                format!("{} {} failed: {}", request.method, request.path, e),
            )
        })?;

        let status = response.status();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let text = response.text().await.map_err(|e| {
            TeamdeckError::upstream(
                Some(status.as_u16()),
                format!("Failed to read response body: {}", e),
            )
        })?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(e) if status.is_success() => {
                    return Err(TeamdeckError::upstream(
                        Some(status.as_u16()),
                        format!("Failed to parse response body: {}", e),
                    ))
                }
                Err(_) => Value::String(text),
            }
        };

        check_response_status(status, &body)?;
        Ok(ApiResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

/// Runs the credential test request (`GET /me`).
pub async fn verify_credentials(helper: &dyn RequestHelper) -> Result<(), TeamdeckError> {
    helper.request(ApiRequest::get(TEST_PATH)).await?;
    Ok(())
}

fn to_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Map non-2xx statuses to upstream errors.
///
/// - 401 → auth error (API key missing or invalid)
/// - 429 → rate limit
/// - Other non-2xx → generic API error
///
/// The body's `message` (or the raw body text) becomes the error detail.
fn check_response_status(status: StatusCode, body: &Value) -> Result<(), TeamdeckError> {
    if status.is_success() {
        return Ok(());
    }
    let message = match status {
        StatusCode::UNAUTHORIZED => "Teamdeck auth error: API key invalid".to_string(),
        StatusCode::TOO_MANY_REQUESTS => "Teamdeck rate limit exceeded".to_string(),
        s => format!("Teamdeck API error: {}", s),
    };
    let detail = match body {
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(text) => Some(text.clone()),
        _ => None,
    };
    Err(TeamdeckError::Upstream {
        status: Some(status.as_u16()),
        message,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(url: String) -> TeamdeckClient {
        TeamdeckClient::with_base_url(ApiKeyCredentials::new("test_key"), url).unwrap()
    }

    #[tokio::test]
    async fn test_get_sends_api_key_and_query() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/bookings")
            .match_header("x-api-key", "test_key")
            .match_header("accept", "application/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("X-Pagination-Page-Count", "3")
            .with_body(r#"{"data": [{"id": 1}], "meta": {"page": 1}}"#)
            .create_async()
            .await;

        let request = ApiRequest::get("/bookings").with_query(vec![
            ("page".to_string(), "1".to_string()),
            ("per_page".to_string(), "100".to_string()),
        ]);
        let response = client(server.url()).request(request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.header("x-pagination-page-count"), Some("3"));
        assert_eq!(response.body["data"][0]["id"], 1);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/projects")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"name": "Website"})))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 10, "name": "Website"}"#)
            .create_async()
            .await;

        let response = client(server.url())
            .request(ApiRequest::post("/projects", json!({"name": "Website"})))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(response.body["id"], 10);
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_null() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/time-entries/5")
            .with_status(204)
            .create_async()
            .await;

        let response = client(server.url())
            .request(ApiRequest::delete("/time-entries/5"))
            .await
            .unwrap();
        assert_eq!(response.status, 204);
        assert!(response.body.is_null());
    }

    #[tokio::test]
    async fn test_404_carries_status_and_detail() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/projects/99")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Project not found"}"#)
            .create_async()
            .await;

        let err = client(server.url())
            .request(ApiRequest::get("/projects/99"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.detail(), Some("Project not found"));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_401_auth_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/me")
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let helper = client(server.url());
        let err = verify_credentials(&helper).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert!(err.to_string().contains("API key invalid"));
        assert_eq!(err.detail(), Some("Unauthorized"));
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/me")
            .match_header("x-api-key", "test_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 1, "email": "pm@example.com"}"#)
            .expect(1)
            .create_async()
            .await;

        let helper = client(server.url());
        verify_credentials(&helper).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_upstream_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/projects/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{not json")
            .create_async()
            .await;

        let err = client(server.url())
            .request(ApiRequest::get("/projects/1"))
            .await
            .unwrap_err();
        assert!(matches!(err, TeamdeckError::Upstream { .. }));
        assert!(err.to_string().contains("Failed to parse response body"));
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_status() {
        // Nothing listens on port 1.
        let helper = client("http://127.0.0.1:1".to_string());
        let err = helper
            .request(ApiRequest::get("/projects"))
            .await
            .unwrap_err();
        assert!(matches!(err, TeamdeckError::Upstream { status: None, .. }));
        assert!(err.to_string().contains("GET /projects failed"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let helper = client("http://localhost:8080/v1/".to_string());
        assert_eq!(helper.base_url(), "http://localhost:8080/v1");
    }
}
