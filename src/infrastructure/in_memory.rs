use crate::domain::ports::{ApiTransport, ErrorLog};
use crate::domain::probe::{ApiRequest, Endpoint, ProbeResult};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const UNSCRIPTED_BODY: &str =
    r#"{"error":{"type":"invalid_request_error","message":"Unrecognized request URL"}}"#;

/// A call observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub credential: String,
    pub form: Vec<(String, String)>,
}

/// A transport that answers from a fixed script and records every call.
///
/// Endpoints without a scripted answer get a 404 with a provider-style error
/// body. Clones share the call record, so a test can keep one clone and hand
/// the other to the validator.
#[derive(Default, Clone)]
pub struct ScriptedTransport {
    responses: HashMap<Endpoint, ProbeResult>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl ScriptedTransport {
    /// Creates a transport with no scripted answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the answer for an endpoint, replacing any earlier one.
    pub fn respond(mut self, endpoint: Endpoint, result: ProbeResult) -> Self {
        self.responses.insert(endpoint, result);
        self
    }

    /// Shorthand for a completed exchange with a JSON body.
    pub fn respond_json(self, endpoint: Endpoint, status: u16, body: serde_json::Value) -> Self {
        self.respond(endpoint, ProbeResult::from_response(status, &body.to_string()))
    }

    /// Every call made so far, in call order.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn calls_to(&self, endpoint: Endpoint) -> Vec<RecordedCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> ProbeResult {
        let mut calls = self.calls.write().await;
        calls.push(RecordedCall {
            endpoint: request.endpoint,
            credential: request.credential.expose().to_string(),
            form: request.form,
        });
        self.responses
            .get(&request.endpoint)
            .cloned()
            .unwrap_or_else(|| ProbeResult::from_response(404, UNSCRIPTED_BODY))
    }
}

/// Keeps recorded messages in memory. Clones share the same buffer.
#[derive(Default, Clone)]
pub struct InMemoryErrorLog {
    lines: Arc<RwLock<Vec<String>>>,
}

impl InMemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lines(&self) -> Vec<String> {
        self.lines.read().await.clone()
    }
}

#[async_trait]
impl ErrorLog for InMemoryErrorLog {
    async fn record(&self, message: &str) -> Result<()> {
        let mut lines = self.lines.write().await;
        lines.push(message.to_string());
        Ok(())
    }
}
