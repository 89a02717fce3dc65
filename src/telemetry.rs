//! Logging setup.
//!
//! Logs go to stderr so stdout carries only the JSON report.

use crate::error::{Result, SkCheckError};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init(level: &str, json_logs: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| SkCheckError::Config(format!("Invalid log level '{level}': {e}")))?,
    }
    .add_directive(directive("hyper=info")?)
    .add_directive(directive("reqwest=info")?);

    let fmt_layer = if json_logs {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_timer(ChronoLocal::new("%H:%M:%S%.3f".to_string()))
            .with_writer(std::io::stderr)
            .compact()
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| SkCheckError::Config(format!("Failed to initialize logging: {e}")))
}

fn directive(raw: &str) -> Result<tracing_subscriber::filter::Directive> {
    raw.parse()
        .map_err(|e| SkCheckError::Config(format!("Invalid log directive '{raw}': {e}")))
}
