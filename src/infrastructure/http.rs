use crate::domain::ports::ApiTransport;
use crate::domain::probe::{ApiRequest, HttpMethod, ProbeResult};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Remote call executor backed by `reqwest`.
///
/// Each call is bounded by the client-wide timeout; exceeding it surfaces as a
/// transport failure for that call only.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    api_base: String,
}

impl HttpTransport {
    /// Creates a transport for the given API base, e.g. `https://api.stripe.com`.
    ///
    /// # Arguments
    ///
    /// * `api_base` - Scheme and host, trailing slash optional.
    /// * `timeout` - Per-call bound covering connect, send and body read.
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("skcheck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Ok(Self { client, api_base })
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.api_base, request.endpoint.path())
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> ProbeResult {
        let url = self.url_for(&request);
        let builder = match request.endpoint.method() {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url).form(&request.form),
        };

        let response = match builder
            .bearer_auth(request.credential.expose())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %request.endpoint, error = %e, "Request failed");
                return ProbeResult::transport_failure(e.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => {
                let result = ProbeResult::from_response(status, &body);
                debug!(
                    endpoint = %request.endpoint,
                    status,
                    outcome = ?result.outcome,
                    "Request completed"
                );
                result
            }
            Err(e) => {
                warn!(endpoint = %request.endpoint, status, error = %e, "Failed to read response body");
                ProbeResult::transport_failure(e.to_string())
            }
        }
    }
}
