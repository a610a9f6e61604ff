//! API gateway: every REST call the client makes goes through [`ApiClient`].
//!
//! The gateway prefixes the configured base URL, injects the JSON content
//! type and the session's bearer credential, and folds every failure into a
//! single [`ApiError`] carrying a human-readable message.
//!
//! ERROR HANDLING
//! ==============
//! For non-2xx responses the message is chosen in priority order: the body's
//! `detail` field, then the serialized JSON body, then `"Request failed"`
//! when the body is not JSON at all. Transport failures carry the transport's
//! own message. Nothing here retries.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{Listing, LoginRequest, LoginResponse, Order, SignupRequest, SignupResponse};

/// Message used when an error response carries no usable body.
pub const REQUEST_FAILED: &str = "Request failed";

/// Backend used when none is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

const JSON_CONTENT_TYPE: &str = "application/json";

// =============================================================================
// ERROR
// =============================================================================

/// The one error kind views ever see from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    RequestFailed(String),
}

impl ApiError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::RequestFailed(message) => message,
        }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// A fully-resolved outbound request.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// A response with its body already read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Sends requests over the wire. Mocked in tests.
///
/// Browser fetch futures are not `Send`, so on wasm the trait drops that
/// bound from `send`.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait HttpTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no HTTP response was obtained.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

// =============================================================================
// REQUEST / RESPONSE SHAPES
// =============================================================================

/// Per-call options; defaults to a bodiless `GET`.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<String>,
    /// Extra headers; these override the defaults on name collision.
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self { method: Method::GET, body: None, headers: Vec::new() }
    }
}

impl RequestOptions {
    /// A `POST` carrying `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if `body` cannot be serialized.
    pub fn post_json<T: Serialize>(body: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::RequestFailed(e.to_string()))?;
        Ok(Self { method: Method::POST, body: Some(body), headers: Vec::new() })
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A decoded success body: structured when the server said JSON, raw text
/// otherwise (some endpoints acknowledge with plain text).
#[derive(Clone, Debug, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    /// Deserialize a JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for text bodies or JSON of the wrong shape.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(|e| ApiError::RequestFailed(format!("unexpected response shape: {e}"))),
            Self::Text(_) => Err(ApiError::RequestFailed("expected a JSON response".to_owned())),
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, transport }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request to `path` (relative to the base URL), authorized with
    /// `credential` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestFailed`] on transport failure, non-2xx
    /// status, or an undecodable JSON success body.
    pub async fn call(&self, credential: Option<&str>, path: &str, options: RequestOptions) -> Result<ApiBody, ApiError> {
        let headers = build_headers(credential, &options.headers)?;
        let request = HttpRequest {
            method: options.method,
            url: format!("{}{path}", self.base_url),
            headers,
            body: options.body,
        };
        let method = request.method.clone();
        tracing::debug!(%method, path, "api request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "api transport failed");
            ApiError::RequestFailed(e.0)
        })?;

        if !(200..300).contains(&response.status) {
            let message = error_message(&response.body);
            tracing::warn!(%method, path, status = response.status, %message, "api request failed");
            return Err(ApiError::RequestFailed(message));
        }

        tracing::debug!(%method, path, status = response.status, "api response");
        decode_body(response)
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the call or the decode.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.call(None, "/auth/login", RequestOptions::post_json(request)?)
            .await?
            .into_json()
    }

    /// `POST /auth/signup`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the call or the decode.
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse, ApiError> {
        self.call(None, "/auth/signup", RequestOptions::post_json(request)?)
            .await?
            .into_json()
    }

    /// `GET /listings`, optionally with an already-encoded query string.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the call or the decode.
    pub async fn listings(&self, credential: Option<&str>, query: &str) -> Result<Vec<Listing>, ApiError> {
        self.call(credential, &listings_path(query), RequestOptions::default())
            .await?
            .into_json()
    }

    /// `GET /orders`; the backend requires the bearer credential.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the call or the decode.
    pub async fn orders(&self, credential: Option<&str>) -> Result<Vec<Order>, ApiError> {
        self.call(credential, "/orders", RequestOptions::default())
            .await?
            .into_json()
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn listings_path(query: &str) -> String {
    if query.is_empty() { "/listings".to_owned() } else { format!("/listings?{query}") }
}

/// Defaults first, then caller headers, so callers win on collision.
fn build_headers(credential: Option<&str>, extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    if let Some(credential) = credential {
        let value = HeaderValue::from_str(&format!("Bearer {credential}"))
            .map_err(|e| ApiError::RequestFailed(format!("invalid credential: {e}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::RequestFailed(format!("invalid header name `{name}`: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::RequestFailed(format!("invalid header value for `{name}`: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Pick the human-readable message for an error response body.
fn error_message(body: &str) -> String {
    let value = match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) | Err(_) => return REQUEST_FAILED.to_owned(),
        Ok(value) => value,
    };
    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        Some(detail) if is_truthy(detail) => detail.to_string(),
        _ => value.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn decode_body(response: HttpResponse) -> Result<ApiBody, ApiError> {
    let is_json = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE));
    if !is_json {
        return Ok(ApiBody::Text(response.body));
    }
    serde_json::from_str(&response.body)
        .map(ApiBody::Json)
        .map_err(|e| ApiError::RequestFailed(format!("invalid JSON response: {e}")))
}
