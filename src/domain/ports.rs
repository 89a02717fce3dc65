use super::probe::{ApiRequest, ProbeResult};
use crate::error::Result;
use async_trait::async_trait;

/// Issues one authenticated call to the provider.
///
/// Infallible by contract: transport failures come back as
/// [`ProbeResult::transport_failure`] so sibling calls and the report survive.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ProbeResult;
}

/// Append-only sink for transport failure text.
#[async_trait]
pub trait ErrorLog: Send + Sync {
    async fn record(&self, message: &str) -> Result<()>;
}

pub type ApiTransportBox = Box<dyn ApiTransport>;
pub type ErrorLogBox = Box<dyn ErrorLog>;
