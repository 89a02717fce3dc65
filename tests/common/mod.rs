#![allow(dead_code)]

use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

pub const VALID_KEY: &str = "sk_test_51Fake000000000000000000000";
pub const TOKEN_ID: &str = "tok_visa_fake";

/// Serves `router` on an ephemeral loopback port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing listens on.
pub async fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// A stand-in for the provider API that accepts only [`VALID_KEY`].
pub struct FakeStripe {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeStripe {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let router = Router::new()
            .route("/v1/account", get(account))
            .route("/v1/balance", get(balance))
            .route("/v1/customers", get(customers))
            .route("/v1/charges", get(charges).post(create_charge))
            .route("/v1/tokens", post(create_token))
            .with_state(hits.clone());
        let base_url = spawn(router).await;
        Self { base_url, hits }
    }

    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

type Hits = Arc<AtomicUsize>;

fn authorize(hits: &Hits, headers: &HeaderMap) -> Result<(), Response> {
    hits.fetch_add(1, Ordering::SeqCst);
    let expected = format!("Bearer {VALID_KEY}");
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(stripe_error(
            StatusCode::UNAUTHORIZED,
            "authentication_error",
            "Invalid API Key provided: sk_test_****",
        )),
    }
}

fn stripe_error(status: StatusCode, error_type: &str, message: &str) -> Response {
    (
        status,
        Json(json!({"error": {"type": error_type, "message": message}})),
    )
        .into_response()
}

fn ok(body: Value) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}

async fn account(State(hits): State<Hits>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&hits, &headers) {
        return rejection;
    }
    ok(json!({
        "id": "acct_1Fake",
        "object": "account",
        "business_profile": {"name": "Fake Shop", "url": "https://example.com/shop"},
        "country": "US",
        "default_currency": "usd",
        "payouts_enabled": true,
        "charges_enabled": true
    }))
}

async fn balance(State(hits): State<Hits>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&hits, &headers) {
        return rejection;
    }
    ok(json!({
        "object": "balance",
        "available": [{"amount": 1234567, "currency": "usd"}],
        "pending": [{"amount": 2500, "currency": "usd"}, {"amount": -300, "currency": "eur"}]
    }))
}

async fn customers(State(hits): State<Hits>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&hits, &headers) {
        return rejection;
    }
    ok(json!({"object": "list", "data": [], "total_count": 3}))
}

async fn charges(State(hits): State<Hits>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&hits, &headers) {
        return rejection;
    }
    ok(json!({"object": "list", "data": [], "total_count": 11}))
}

async fn create_token(
    State(hits): State<Hits>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&hits, &headers) {
        return rejection;
    }
    match form.get("card[number]").map(String::as_str) {
        Some("4242424242424242") => ok(json!({"id": TOKEN_ID, "object": "token"})),
        Some(_) => stripe_error(
            StatusCode::PAYMENT_REQUIRED,
            "card_error",
            "Your card number is incorrect.",
        ),
        None => stripe_error(
            StatusCode::BAD_REQUEST,
            "invalid_request_error",
            "Missing required param: card.",
        ),
    }
}

async fn create_charge(
    State(hits): State<Hits>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&hits, &headers) {
        return rejection;
    }
    if form.get("source").map(String::as_str) != Some(TOKEN_ID) {
        return stripe_error(
            StatusCode::BAD_REQUEST,
            "invalid_request_error",
            "No such token.",
        );
    }
    ok(json!({
        "id": "ch_1Fake",
        "object": "charge",
        "amount": form.get("amount").and_then(|a| a.parse::<i64>().ok()),
        "currency": form.get("currency"),
        "description": form.get("description"),
        "status": "succeeded"
    }))
}
