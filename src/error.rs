use thiserror::Error;

/// Result type for core indexing, matching and assembly operations
pub type Result<T> = std::result::Result<T, SeqError>;

/// Failures raised by the core. All of them are local and deterministic:
/// re-running with the same inputs reproduces the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// Parameter combination that can never work, rejected before any indexing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Parameter out of range for the supplied input
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed record input
    #[error("format error: {0}")]
    Format(String),
}

impl SeqError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SeqError::Configuration(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SeqError::InvalidParameter(msg.into())
    }
}
