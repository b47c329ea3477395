//! Holded API client.
//!
//! `HoldedClient` attaches the base URL and the `key` header to every call.
//! Dispatch code depends on the `HoldedApi` trait so tests can substitute a
//! recording fake for the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Url,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::{ApiRequest, ClientError};
use crate::core::config::HoldedConfig;

/// Production base URL of the Holded API.
pub const DEFAULT_BASE_URL: &str = "https://api.holded.com/api/";

/// Name of the authentication header expected by Holded.
const API_KEY_HEADER: &str = "key";

/// Outbound access to the Holded API.
#[async_trait]
pub trait HoldedApi: Send + Sync {
    /// Perform one outbound call and return the parsed 2xx body.
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError>;
}

/// reqwest-backed Holded client.
#[derive(Clone)]
pub struct HoldedClient {
    http: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for HoldedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoldedClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HoldedClient {
    /// Build a client for the given credential and connection settings.
    pub fn new(api_key: &str, config: &HoldedConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| ClientError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve the absolute URL for a routed request.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.segments);
        url.set_query(request.query_string().as_deref());
        Ok(url)
    }
}

#[async_trait]
impl HoldedApi for HoldedClient {
    #[instrument(skip_all, fields(method = %request.method, path = %request.path()))]
    async fn send(&self, request: ApiRequest) -> Result<Value, ClientError> {
        let url = self.url_for(&request)?;
        debug!("Calling Holded API: {} {}", request.method, url);

        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Holded API returned HTTP {}", status.as_u16());
            return Err(ClientError::remote(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn config(base_url: &str) -> HoldedConfig {
        HoldedConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        }
    }

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_url_for_appends_segments_and_query() {
        let client = HoldedClient::new("k", &config(DEFAULT_BASE_URL)).unwrap();
        let request = ApiRequest::new(Method::GET, segments(&["invoicing", "v1", "contacts"]))
            .with_query("page", "1");
        let url = client.url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.holded.com/api/invoicing/v1/contacts?page=1"
        );
    }

    #[test]
    fn test_url_for_encodes_id_segment() {
        let client = HoldedClient::new("k", &config(DEFAULT_BASE_URL)).unwrap();
        let request = ApiRequest::new(
            Method::GET,
            segments(&["invoicing", "v1", "contacts", "a/b c"]),
        );
        let url = client.url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.holded.com/api/invoicing/v1/contacts/a%2Fb%20c"
        );
    }

    #[test]
    fn test_base_url_without_trailing_slash() {
        let client = HoldedClient::new("k", &config("http://localhost:9000/api")).unwrap();
        let request = ApiRequest::new(Method::GET, segments(&["crm", "v1", "bookings"]));
        let url = client.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/crm/v1/bookings");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = HoldedClient::new("k", &config("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_debug_hides_credential() {
        let client = HoldedClient::new("secret-key", &config(DEFAULT_BASE_URL)).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
    }

    #[cfg(feature = "http")]
    mod stub {
        use super::*;
        use axum::{
            Json, Router,
            extract::Path,
            http::{HeaderMap as AxumHeaders, StatusCode},
            routing::{get, post},
        };
        use serde_json::json;

        /// Serve a small stand-in for the Holded API on an ephemeral port.
        async fn spawn_stub() -> String {
            let app = Router::new()
                .route(
                    "/api/invoicing/v1/contacts",
                    post(|headers: AxumHeaders, Json(body): Json<Value>| async move {
                        let key = headers
                            .get("key")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string();
                        (
                            StatusCode::CREATED,
                            Json(json!({"id": "c1", "name": body["name"], "key": key})),
                        )
                    }),
                )
                .route(
                    "/api/invoicing/v1/products",
                    get(|| async {
                        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"})))
                    }),
                )
                .route(
                    "/api/invoicing/v1/contacts/{id}",
                    axum::routing::delete(|Path(_id): Path<String>| async { StatusCode::NO_CONTENT }),
                );

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                let _ = axum::serve(listener, app).await;
            });
            format!("http://{addr}/api/")
        }

        #[tokio::test]
        async fn test_post_sends_key_and_parses_body() {
            let base = spawn_stub().await;
            let client = HoldedClient::new("test-key", &config(&base)).unwrap();

            let request = ApiRequest::new(Method::POST, segments(&["invoicing", "v1", "contacts"]))
                .with_body(json!({"name": "Acme"}));
            let result = client
                .send(request)
                .await
                .unwrap();

            assert_eq!(result, json!({"id": "c1", "name": "Acme", "key": "test-key"}));
        }

        #[tokio::test]
        async fn test_non_2xx_is_remote_error() {
            let base = spawn_stub().await;
            let client = HoldedClient::new("test-key", &config(&base)).unwrap();

            let err = client
                .send(ApiRequest::new(Method::GET, segments(&["invoicing", "v1", "products"])))
                .await
                .unwrap_err();

            match err {
                ClientError::Remote { status, body } => {
                    assert_eq!(status, 500);
                    assert_eq!(body, json!({"error": "boom"}));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_empty_success_body_is_null() {
            let base = spawn_stub().await;
            let client = HoldedClient::new("test-key", &config(&base)).unwrap();

            let result = client
                .send(ApiRequest::new(Method::DELETE, segments(&["invoicing", "v1", "contacts", "c1"])))
                .await
                .unwrap();

            assert_eq!(result, Value::Null);
        }

        #[tokio::test]
        async fn test_unreachable_host_is_transport_error() {
            let client = HoldedClient::new("test-key", &config("http://127.0.0.1:1/api/")).unwrap();
            let err = client
                .send(ApiRequest::new(Method::GET, segments(&["invoicing", "v1", "contacts"])))
                .await
                .unwrap_err();
            assert!(matches!(err, ClientError::Transport(_)));
        }
    }
}
