//! Native [`HttpTransport`] backed by `reqwest`, used by the terminal
//! front end and the wire tests. The browser build uses `net::browser`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::api::{HttpRequest, HttpResponse, HttpTransport, TransportError};

pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given TCP connect timeout. Requests
    /// themselves have no overall deadline.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the HTTP client cannot be built.
    pub fn new(connect_timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError(format!("HTTP client build failed: {e}")))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = self.http.request(request.method, &request.url).headers(request.headers);
        let builder = match request.body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        let body = response.text().await.map_err(|e| TransportError(e.to_string()))?;

        Ok(HttpResponse { status, content_type, body })
    }
}
