use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid index range: {0}")]
    Range(String),

    #[error("reduction ratio must be in (0, 1), got {0}")]
    Ratio(f64),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("hashing error: {0}")]
    Hash(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Hash(e.to_string())
    }
}
