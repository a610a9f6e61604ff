//! Shared fixtures for unit tests: a scripted transport and seeded sessions.
//!
//! Compiled for this crate's own tests and, behind the `test-support`
//! feature, for the terminal front end's tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Method;
use serde_json::{Value, json};

use crate::net::api::{ApiClient, HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::net::types::{Identity, RecordId, Role};
use crate::state::session::SessionStore;
use crate::util::storage::MemoryStorage;

pub const BASE_URL: &str = "http://backend.test";

type Reply = Result<HttpResponse, TransportError>;

/// Transport that answers from a route table and records every request.
/// Unrouted requests get a 404 with a `detail` body.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Route `method path` (query string ignored) to `reply`.
    pub fn route(&self, method: Method, path: &str, reply: Reply) {
        self.routes.lock().unwrap().insert((method, path.to_owned()), reply);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Request targets relative to [`BASE_URL`], query included.
    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.url.trim_start_matches(BASE_URL).to_owned())
            .collect()
    }

    pub fn clear(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let relative = request.url.trim_start_matches(BASE_URL);
        let path = relative.split('?').next().unwrap_or(relative).to_owned();
        let key = (request.method.clone(), path);
        self.requests.lock().unwrap().push(request);
        self.routes
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(json_response(404, &json!({ "detail": "Not Found" }))))
    }
}

pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("application/json".to_owned()),
        body: body.to_string(),
    }
}

pub fn text_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse { status, content_type: Some("text/plain; charset=utf-8".to_owned()), body: body.to_owned() }
}

pub fn api(transport: &Arc<MockTransport>) -> ApiClient {
    ApiClient::new(BASE_URL, transport.clone())
}

pub fn signed_out() -> SessionStore {
    SessionStore::restore(MemoryStorage::new())
}

pub fn identity(role: Role) -> Identity {
    Identity { id: RecordId::Int(1), name: "A".to_owned(), role }
}

pub fn signed_in(role: Role) -> SessionStore {
    let mut session = signed_out();
    session.establish(identity(role), "t");
    session
}

pub fn listings_json() -> Value {
    json!([
        {
            "id": 10,
            "title": "Maize",
            "category": "grains",
            "region": "Ashanti",
            "unit_price": 12.5,
            "unit": "kg",
            "quantity_available": 300,
            "quality_grade": "A"
        },
        {
            "id": 11,
            "title": "Cassava",
            "category": "roots",
            "region": null,
            "unit_price": "4.00",
            "unit": "bag",
            "quantity_available": "20"
        }
    ])
}

pub fn orders_json() -> Value {
    json!([
        {
            "id": 100,
            "status": "pending",
            "items": [{ "title": "Maize" }, { "title": "Beans" }, { "title": "Yam" }],
            "total_amount": 250
        }
    ])
}

/// Route both data endpoints to their fixtures.
pub fn route_data(transport: &MockTransport) {
    transport.route(Method::GET, "/listings", Ok(json_response(200, &listings_json())));
    transport.route(Method::GET, "/orders", Ok(json_response(200, &orders_json())));
}
