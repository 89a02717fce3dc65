use crate::domain::ports::ErrorLog;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Formats one log line: `[2024-05-01T13:00:00Z] message`.
pub fn format_line(at: DateTime<Utc>, message: &str) -> String {
    format!("[{}] {}\n", at.format("%Y-%m-%dT%H:%M:%SZ"), message)
}

/// Appends transport failures to a local text file, one line per failure.
///
/// The file is opened in append mode for every record, so concurrent runs and
/// external rotation are tolerated.
#[derive(Debug, Clone)]
pub struct FileErrorLog {
    path: PathBuf,
}

impl FileErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ErrorLog for FileErrorLog {
    async fn record(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format_line(Utc::now(), message).as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }
}

/// Discards everything. Used when no log path is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullErrorLog;

#[async_trait]
impl ErrorLog for NullErrorLog {
    async fn record(&self, _message: &str) -> Result<()> {
        Ok(())
    }
}
