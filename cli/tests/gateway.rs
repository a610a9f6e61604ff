//! Gateway tests against a live HTTP fixture backend.
//!
//! Each test binds an axum router on an ephemeral port and drives the real
//! `ReqwestTransport`, so header injection, status handling and body
//! decoding are exercised over the wire.

use std::sync::Arc;
use std::time::Duration;

use agricompass::net::api::{ApiBody, ApiClient, ApiError, RequestOptions};
use agricompass::net::http::ReqwestTransport;
use agricompass::net::types::{Amount, LoginRequest, Role};
use agricompass::state::shell::{AuthMode, Screen};
use agricompass_cli::config::ClientConfig;
use agricompass_cli::terminal::Terminal;
use axum::Json;
use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};

const TOKEN: &str = "tok-123";

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "ama@example.com" && body["password"] == "pw" {
        (StatusCode::OK, Json(json!({ "id": 7, "name": "Ama", "role": "buyer", "token": TOKEN })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid credentials" })))
    }
}

async fn listings(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "title": query.unwrap_or_else(|| "all".to_owned()),
            "category": "grains",
            "region": "Ashanti",
            "unit_price": 12.5,
            "unit": "bag",
            "quantity_available": 40,
            "quality_grade": "A"
        },
        {
            "id": 2,
            "title": "Sorghum",
            "category": "grains",
            "region": "Northern",
            "unit_price": "12.50",
            "unit": "kg",
            "quantity_available": "100.000"
        }
    ]))
}

async fn orders(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let bearer = headers.get("authorization").and_then(|v| v.to_str().ok());
    if bearer != Some(&format!("Bearer {TOKEN}")) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Not authenticated" })));
    }
    (
        StatusCode::OK,
        Json(json!([{ "id": 3, "status": "pending", "items": [{ "title": "Maize" }], "total_amount": "99.00" }])),
    )
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let get = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(ToOwned::to_owned);
    Json(json!({ "content_type": get("content-type"), "x_trace": get("x-trace") }))
}

fn router() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/listings", get(listings))
        .route("/orders", get(orders))
        .route("/echo", get(echo_headers))
        .route("/health", get(|| async { "ok" }))
        .route("/broken", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route(
            "/invalid",
            get(|| async { (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": [{ "msg": "field required" }] }))) }),
        )
}

async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router()).await.unwrap() });
    format!("http://{addr}")
}

fn client(base_url: &str) -> ApiClient {
    let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
    ApiClient::new(base_url, Arc::new(transport))
}

#[tokio::test]
async fn login_then_orders_carries_bearer() {
    let base = spawn_backend().await;
    let api = client(&base);

    let request = LoginRequest { email: "ama@example.com".to_owned(), password: "pw".to_owned() };
    let response = api.login(&request).await.unwrap();
    assert_eq!(response.role, Role::Buyer);
    assert_eq!(response.token, TOKEN);

    let err = api.orders(None).await.unwrap_err();
    assert_eq!(err, ApiError::RequestFailed("Not authenticated".to_owned()));

    let orders = api.orders(Some(&response.token)).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, "pending");
    assert_eq!(orders[0].total_amount.to_string(), "99.00");
}

#[tokio::test]
async fn rejected_login_surfaces_detail() {
    let base = spawn_backend().await;
    let api = client(&base);

    let request = LoginRequest { email: "ama@example.com".to_owned(), password: "wrong".to_owned() };
    let err = api.login(&request).await.unwrap_err();
    assert_eq!(err.message(), "Invalid credentials");
}

#[tokio::test]
async fn listings_query_reaches_backend_encoded() {
    let base = spawn_backend().await;
    let api = client(&base);

    let all = api.listings(None, "").await.unwrap();
    assert_eq!(all[0].title, "all");

    let filtered = api.listings(None, "q=maize&region=Upper+East").await.unwrap();
    assert_eq!(filtered[0].title, "q=maize&region=Upper+East");
}

#[tokio::test]
async fn decimal_string_amounts_decode_verbatim() {
    let base = spawn_backend().await;
    let items = client(&base).listings(None, "").await.unwrap();

    assert_eq!(items[1].unit_price, Amount::Text("12.50".to_owned()));
    assert_eq!(items[1].quantity_available.to_string(), "100.000");
    assert_eq!(items[1].quality_grade, None);
}

#[tokio::test]
async fn caller_headers_override_defaults() {
    let base = spawn_backend().await;
    let api = client(&base);

    let options = RequestOptions::default().header("Content-Type", "text/plain").header("X-Trace", "abc");
    let body = api.call(None, "/echo", options).await.unwrap();
    assert_eq!(body, ApiBody::Json(json!({ "content_type": "text/plain", "x_trace": "abc" })));
}

#[tokio::test]
async fn non_json_success_is_text() {
    let base = spawn_backend().await;
    let body = client(&base).call(None, "/health", RequestOptions::default()).await.unwrap();
    assert_eq!(body, ApiBody::Text("ok".to_owned()));
}

#[tokio::test]
async fn non_json_failure_is_generic() {
    let base = spawn_backend().await;
    let err = client(&base).call(None, "/broken", RequestOptions::default()).await.unwrap_err();
    assert_eq!(err.message(), "Request failed");
}

#[tokio::test]
async fn structured_detail_is_serialized() {
    let base = spawn_backend().await;
    let err = client(&base).call(None, "/invalid", RequestOptions::default()).await.unwrap_err();
    assert_eq!(err.message(), r#"[{"msg":"field required"}]"#);
}

#[tokio::test]
async fn unreachable_backend_is_request_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .call(None, "/listings", RequestOptions::default())
        .await
        .unwrap_err();
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn session_survives_restart_through_file_storage() {
    let base = spawn_backend().await;
    let dir = tempfile::tempdir().unwrap();
    let config = ClientConfig {
        backend_url: base,
        session_file: dir.path().join("state").join("session.json"),
        connect_timeout: Duration::from_secs(2),
    };

    let mut term = Terminal::from_config(&config).unwrap();
    term.login.email = "ama@example.com".to_owned();
    term.login.password = "pw".to_owned();
    term.submit_login().await;
    assert_eq!(term.screen(), Screen::Authenticated);
    assert!(!term.has_error(), "{:?}", term.dashboard.error);
    assert_eq!(term.dashboard.orders.len(), 1);

    let mut restarted = Terminal::from_config(&config).unwrap();
    assert_eq!(restarted.screen(), Screen::Authenticated);
    assert_eq!(restarted.session().credential(), Some(TOKEN));
    restarted.sync().await;
    assert_eq!(restarted.dashboard.orders.len(), 1);
    assert_eq!(restarted.explorer.items.len(), 2);

    restarted.logout();
    let after_logout = Terminal::from_config(&config).unwrap();
    assert_eq!(after_logout.screen(), Screen::Unauthenticated(AuthMode::Login));
}
