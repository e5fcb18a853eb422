// SPDX-FileCopyrightText: 2026 Budgetto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Budgetto REST API.
//!
//! [`ApiClient`] owns the connection pool, resolves paths against the
//! configured base URL, attaches the bearer token, and maps transport and
//! status failures onto [`BudgettoError`]. It knows nothing about categories.

use std::time::Duration;

use budgetto_config::model::ApiConfig;
use budgetto_core::types::ApiErrorBody;
use budgetto_core::{AccessToken, BudgettoError};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use tracing::{debug, warn};

/// Configured HTTP client for the Budgetto API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BudgettoError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| BudgettoError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, BudgettoError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Returns the base URL paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `v1/categories/7`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Starts an authenticated request.
    pub fn request(&self, method: Method, path: &str, token: &AccessToken) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(token.expose())
    }

    /// Sends a request and returns the body of a successful response.
    ///
    /// No retries: a failed call is reported once and the caller decides.
    pub async fn execute(&self, request: RequestBuilder) -> Result<String, BudgettoError> {
        let response = request.send().await.map_err(|e| BudgettoError::Network {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        debug!(status = %status, path = %url, "response received");

        let body = response.text().await.map_err(|e| BudgettoError::Network {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(status, &body);
        warn!(status = %status, path = %url, message = %message, "request rejected");
        Err(BudgettoError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extracts the server's message from an error body, with field errors appended.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if parsed.errors.is_empty() => parsed.message,
        Ok(parsed) => {
            let fields = parsed
                .errors
                .iter()
                .map(|f| f.message.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            format!("{} {fields}", parsed.message)
        }
        Err(_) => format!("request failed with status {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ApiClient {
        ApiClient::new(format!("{base_url}/api/"), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let client = ApiClient::new("http://localhost:5000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(
            client.url("/v1/categories"),
            "http://localhost:5000/api/v1/categories"
        );
        assert_eq!(
            client.url("v1/categories/3"),
            "http://localhost:5000/api/v1/categories/3"
        );
    }

    #[test]
    fn error_message_prefers_server_text() {
        let body = r#"{"message": "Requested item was not found."}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Requested item was not found."
        );
    }

    #[test]
    fn error_message_appends_field_errors() {
        let body = r#"{"message": "Validation Error", "errors": [{"field": "Name", "message": "Name field is required."}]}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Validation Error Name field is required."
        );
    }

    #[test]
    fn error_message_falls_back_for_plain_text() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            "request failed with status 502"
        );
    }

    #[tokio::test]
    async fn client_sends_bearer_and_accept_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/ping"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let token = AccessToken::new("tok-1");
        let body = client
            .execute(client.request(Method::GET, "v1/ping", &token))
            .await
            .unwrap();
        assert_eq!(body, "pong");
    }

    #[tokio::test]
    async fn non_success_status_maps_to_http_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/categories/9"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "message": "You don't have permission to access the requested resource."
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let token = AccessToken::new("t");
        let err = client
            .execute(client.request(Method::DELETE, "v1/categories/9", &token))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(err.user_message().contains("permission"));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        let token = AccessToken::new("t");
        let err = client
            .execute(client.request(Method::GET, "v1/categories", &token))
            .await
            .unwrap_err();
        assert!(matches!(err, BudgettoError::Network { .. }), "got {err:?}");
    }
}
