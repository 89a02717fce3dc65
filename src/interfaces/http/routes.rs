//! HTTP entry point for key validation.

use crate::application::validator::KeyValidator;
use crate::domain::report::ValidationReport;
use crate::error::{Result, SkCheckError};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    validator: Arc<KeyValidator>,
}

#[derive(Debug, Deserialize)]
struct KeyQuery {
    #[serde(default)]
    sk: String,
}

/// Body posted by the browser page.
#[derive(Debug, Deserialize)]
struct KeyBody {
    #[serde(default)]
    key: String,
}

/// Build the REST routes around a shared validator.
///
/// - `GET /validate_key?sk=<key>`
/// - `POST /validate_key` with `{"key": "<key>"}`
/// - `GET /health`
pub fn routes(validator: Arc<KeyValidator>) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/validate_key", get(validate_query).post(validate_body))
        .with_state(AppState { validator })
}

async fn validate_query(State(state): State<AppState>, Query(query): Query<KeyQuery>) -> Response {
    json_report(&state.validator.validate(&query.sk).await)
}

async fn validate_body(State(state): State<AppState>, Json(body): Json<KeyBody>) -> Response {
    json_report(&state.validator.validate(&body.key).await)
}

fn json_report(report: &ValidationReport) -> Response {
    info!(success = report.is_success(), "Validation request handled");
    match report.to_pretty_json() {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize report");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to serialize report").into_response()
        }
    }
}

/// Binds the listening socket.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .map_err(|e| SkCheckError::Server(format!("Failed to bind {addr}: {e}")))
}

/// Serves the routes until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, validator: Arc<KeyValidator>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }
    axum::serve(listener, routes(validator))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Server stopped");
    Ok(())
}
