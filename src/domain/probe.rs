use crate::domain::credential::Credential;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Post => f.write_str("POST"),
        }
    }
}

/// The provider endpoints used by the validation recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Account,
    Balance,
    RecentCustomer,
    RecentCharge,
    CreateToken,
    CreateCharge,
}

impl Endpoint {
    pub const PROBES: [Endpoint; 4] = [
        Endpoint::Account,
        Endpoint::Balance,
        Endpoint::RecentCustomer,
        Endpoint::RecentCharge,
    ];

    /// Path and query relative to the API base.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Account => "/v1/account",
            Endpoint::Balance => "/v1/balance",
            Endpoint::RecentCustomer => "/v1/customers?limit=1",
            Endpoint::RecentCharge => "/v1/charges?limit=1",
            Endpoint::CreateToken => "/v1/tokens",
            Endpoint::CreateCharge => "/v1/charges",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::CreateToken | Endpoint::CreateCharge => HttpMethod::Post,
            _ => HttpMethod::Get,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// A single authenticated call. POST calls carry form-encoded pairs.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub credential: Credential,
    pub form: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(endpoint: Endpoint, credential: Credential) -> Self {
        Self {
            endpoint,
            credential,
            form: Vec::new(),
        }
    }

    pub fn post(endpoint: Endpoint, credential: Credential, form: Vec<(String, String)>) -> Self {
        Self {
            endpoint,
            credential,
            form,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

/// Normalised result of one remote call. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub outcome: Outcome,
    /// `0` when no response was received.
    pub http_status: u16,
    /// Parsed JSON body, `None` when absent or not JSON.
    pub body: Option<Value>,
    pub transport_error: Option<String>,
}

impl ProbeResult {
    /// Classifies a completed exchange: success iff the status is exactly 200.
    pub fn from_response(http_status: u16, raw_body: &str) -> Self {
        let outcome = if http_status == 200 {
            Outcome::Success
        } else {
            Outcome::Error
        };
        Self {
            outcome,
            http_status,
            body: serde_json::from_str(raw_body).ok(),
            transport_error: None,
        }
    }

    pub fn transport_failure(error: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Error,
            http_status: 0,
            body: None,
            transport_error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}
