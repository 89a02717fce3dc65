//! Adapters behind the domain ports: the `reqwest` transport, the error log
//! file, and in-memory doubles.

pub mod error_log;
pub mod http;
pub mod in_memory;
