use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkCheckError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, SkCheckError>;
