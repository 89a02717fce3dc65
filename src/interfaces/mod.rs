//! Inbound surfaces: the HTTP entry point and the JSON report writer.

pub mod http;
pub mod json;
