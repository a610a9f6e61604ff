//! Browser transport: `fetch` via `gloo-net`.
//!
//! Client-side (hydrate): real requests through `gloo-net`.
//! Server-side (SSR) and plain native builds: every request fails, since
//! views only issue calls from browser event handlers and effects.

use std::sync::Arc;

use super::api::{ApiClient, DEFAULT_BACKEND_URL, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Backend base URL, fixed at build time by `AGRICOMPASS_BACKEND_URL`.
pub const BACKEND_URL: &str = match option_env!("AGRICOMPASS_BACKEND_URL") {
    Some(url) => url,
    None => DEFAULT_BACKEND_URL,
};

pub struct FetchTransport;

#[cfg(feature = "hydrate")]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = gloo_net::http::RequestBuilder::new(&request.url).method(request.method);
        for (name, value) in &request.headers {
            let value = value
                .to_str()
                .map_err(|e| TransportError(format!("invalid header value for `{name}`: {e}")))?;
            builder = builder.header(name.as_str(), value);
        }
        let outbound = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(e.to_string()))?;

        let response = outbound.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpResponse { status, content_type, body })
    }
}

#[cfg(not(feature = "hydrate"))]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError(format!("{} {}: not available on server", request.method, request.url)))
    }
}

/// The gateway the browser shell provides to every view.
pub fn browser_client() -> ApiClient {
    ApiClient::new(BACKEND_URL, Arc::new(FetchTransport))
}
