//! HTTP client for the field-service REST API
//!
//! Every service goes through [`ApiClient::request`], which:
//! - prefixes the endpoint with the base URL (adding a leading `/` if missing)
//! - attaches `Authorization: Bearer <token>` unless the endpoint is public
//! - turns non-2xx responses into [`ApiError::Http`] carrying the server's
//!   `message` field, or `Request failed with status <status>`
//! - maps 204 to "no body"
//!
//! Raw mode ([`ApiClient::get_raw`]) skips JSON decoding and hands back the
//! bytes and headers for binary downloads.

use super::session::{AuthState, Session};
use crate::config::{bearer, ApiConfig};
use crate::domain::{ApiError, AppError, Result};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Endpoints sent without a bearer token
const PUBLIC_ENDPOINTS: &[&str] = &["/auth/login", "/auth/sign-in", "/congregations"];

/// Body and headers of a raw-mode response
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
    headers: HeaderMap,
}

impl RawResponse {
    /// Header value as text; non-UTF-8 values are treated as absent
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }
}

/// Field-service API client
///
/// Cheap to clone: the connection pool and the session are shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Session,
}

impl ApiClient {
    /// Builds a client from the `[api]` configuration section
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            http,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sends a request and decodes the JSON body
    ///
    /// Returns `Ok(None)` for 204 responses.
    pub async fn request<B, T>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let endpoint = normalize_endpoint(endpoint);
        let response = self.send(method, &endpoint, body).await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Connection(format!("Failed to read response body: {e}")))?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::InvalidResponse(format!("{endpoint}: {e}"))
        })?;

        Ok(Some(value))
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request::<(), T>(Method::GET, endpoint, None)
            .await?
            .ok_or_else(|| ApiError::EmptyResponse(normalize_endpoint(endpoint)).into())
    }

    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, endpoint, Some(body))
            .await?
            .ok_or_else(|| ApiError::EmptyResponse(normalize_endpoint(endpoint)).into())
    }

    pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, endpoint, Some(body))
            .await?
            .ok_or_else(|| ApiError::EmptyResponse(normalize_endpoint(endpoint)).into())
    }

    /// Sends a DELETE; any response body is ignored
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        let endpoint = normalize_endpoint(endpoint);
        self.send::<()>(Method::DELETE, &endpoint, None).await?;
        Ok(())
    }

    /// GET in raw mode: no JSON decoding, headers kept
    pub async fn get_raw(&self, endpoint: &str) -> Result<RawResponse> {
        let endpoint = normalize_endpoint(endpoint);
        let response = self.send::<()>(Method::GET, &endpoint, None).await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Connection(format!("Failed to read response body: {e}")))?;

        Ok(RawResponse {
            status,
            bytes: bytes.to_vec(),
            headers,
        })
    }

    /// Sends the request and rejects non-2xx statuses
    async fn send<B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");

        if !is_public_endpoint(endpoint) {
            match self.session.authorize().await? {
                AuthState::Authenticated(token) => {
                    request = request.header(AUTHORIZATION, bearer(&token));
                }
                AuthState::Unauthenticated(reason) => {
                    tracing::debug!(endpoint = %endpoint, %reason, "Request blocked without session");
                    return Err(ApiError::Unauthenticated(reason).into());
                }
            }
        }

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }

        tracing::debug!(method = %method, endpoint = %endpoint, "API request");

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Connection(format!("{method} {endpoint}: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(status.as_u16(), &text);

        tracing::warn!(
            method = %method,
            endpoint = %endpoint,
            status = status.as_u16(),
            message = %message,
            "API request failed"
        );

        Err(ApiError::Http {
            status: status.as_u16(),
            message,
        }
        .into())
    }
}

/// Ensures the endpoint starts with `/`
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{endpoint}")
    }
}

/// Public endpoints are matched on the path alone, ignoring any query string
fn is_public_endpoint(endpoint: &str) -> bool {
    let path = endpoint.split('?').next().unwrap_or(endpoint);
    PUBLIC_ENDPOINTS.contains(&path)
}

/// Builds `path?k=v&...`, or `path` when there are no pairs
pub fn with_query<K, V>(path: &str, pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), value.as_ref());
        any = true;
    }
    if any {
        format!("{path}?{}", serializer.finish())
    } else {
        path.to_string()
    }
}

/// Error text for a failed response
///
/// Uses the JSON `message` field when present. Validation failures carry a
/// list of messages, which are joined.
fn error_message(status: u16, body: &str) -> String {
    let fallback = || format!("Request failed with status {status}");

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    match value.get("message") {
        Some(serde_json::Value::String(message)) if !message.is_empty() => message.clone(),
        Some(serde_json::Value::Array(items)) => {
            let parts: Vec<&str> = items.iter().filter_map(|item| item.as_str()).collect();
            if parts.is_empty() {
                fallback()
            } else {
                parts.join(", ")
            }
        }
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::session::tests::make_token;
    use crate::adapters::api::session::MemoryTokenStore;
    use std::sync::Arc;

    fn client_for(server: &mockito::Server, session: Session) -> ApiClient {
        let config = ApiConfig {
            base_url: server.url(),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, session).unwrap()
    }

    fn signed_in() -> Session {
        Session::new(Arc::new(MemoryTokenStore::with_token(make_token(Some(
            4_102_444_800,
        )))))
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("people"), "/people");
        assert_eq!(normalize_endpoint("/people"), "/people");
    }

    #[test]
    fn test_public_endpoints() {
        assert!(is_public_endpoint("/auth/login"));
        assert!(is_public_endpoint("/auth/sign-in"));
        assert!(is_public_endpoint("/congregations"));
        assert!(is_public_endpoint("/congregations?page=1"));
        assert!(!is_public_endpoint("/congregations/1/people"));
        assert!(!is_public_endpoint("/people"));
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query::<&str, &str>("/teams", []), "/teams");
        assert_eq!(
            with_query("/teams", [("congregation_id", "3")]),
            "/teams?congregation_id=3"
        );
        assert_eq!(
            with_query("/x", [("name", "Ana Pérez")]),
            "/x?name=Ana+P%C3%A9rez"
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(400, r#"{"message":"Bad input"}"#), "Bad input");
        assert_eq!(
            error_message(400, r#"{"message":["name required","email invalid"]}"#),
            "name required, email invalid"
        );
        assert_eq!(error_message(500, "oops"), "Request failed with status 500");
        assert_eq!(error_message(404, r#"{"error":"x"}"#), "Request failed with status 404");
    }

    #[tokio::test]
    async fn test_get_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/people/1")
            .match_header("authorization", mockito::Matcher::Regex("^Bearer .+".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": 1}"#)
            .create_async()
            .await;

        let client = client_for(&server, signed_in());
        let value: serde_json::Value = client.get("people/1").await.unwrap();
        assert_eq!(value["value"], 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_public_endpoint_without_session() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/congregations")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server, Session::in_memory());
        let value: Vec<serde_json::Value> = client.get("/congregations").await.unwrap();
        assert!(value.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_protected_endpoint_without_session_is_not_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/people")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, Session::in_memory());
        let err = client.get::<serde_json::Value>("/people").await.unwrap_err();
        assert!(err.is_unauthenticated());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_uses_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/people/9")
            .with_status(404)
            .with_body(r#"{"message":"Person not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server, signed_in());
        let err = client.get::<serde_json::Value>("/people/9").await.unwrap_err();
        match err {
            AppError::Api(ApiError::Http { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "Person not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_content_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/teams/1")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server, signed_in());
        let result: Option<serde_json::Value> = client
            .request(Method::PUT, "/teams/1", Some(&serde_json::json!({"name": "A"})))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_get_raw_keeps_headers() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/blob")
            .with_status(200)
            .with_header("x-filename", "archive.zip")
            .with_body(vec![0x50, 0x4b, 0x03, 0x04])
            .create_async()
            .await;

        let client = client_for(&server, signed_in());
        let raw = client.get_raw("/blob").await.unwrap();
        assert_eq!(raw.status, 200);
        assert_eq!(raw.bytes, vec![0x50, 0x4b, 0x03, 0x04]);
        assert_eq!(raw.header("x-filename").as_deref(), Some("archive.zip"));
        assert!(raw.header("content-disposition").is_none());
    }
}
