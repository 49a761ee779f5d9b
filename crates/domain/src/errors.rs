use std::fmt;
use thiserror::Error;

/// Where a truncated response was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationOrigin {
    /// The buffer ended before the data its header and lengths announced.
    Wire,
    /// The backend or its transport reported the response as cut short.
    Backend,
}

impl fmt::Display for TruncationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationOrigin::Wire => write!(f, "wire"),
            TruncationOrigin::Backend => write!(f, "backend"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Unsupported question: {0}")]
    UnsupportedQuestion(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Resolution backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Resolution backend error: {0}")]
    BackendError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Truncated DNS message ({origin}): {detail}")]
    TruncatedMessage {
        origin: TruncationOrigin,
        detail: String,
    },

    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    pub fn truncated_wire(detail: impl Into<String>) -> Self {
        DomainError::TruncatedMessage {
            origin: TruncationOrigin::Wire,
            detail: detail.into(),
        }
    }

    pub fn truncated_backend(detail: impl Into<String>) -> Self {
        DomainError::TruncatedMessage {
            origin: TruncationOrigin::Backend,
            detail: detail.into(),
        }
    }

    /// Errors raised before any I/O; the caller fixes the question.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidDomainName(_)
                | DomainError::UnsupportedQuestion(_)
                | DomainError::EncodingError(_)
        )
    }

    pub fn is_truncation(&self) -> bool {
        matches!(self, DomainError::TruncatedMessage { .. })
    }

    /// Per-query failures a caller-supplied retry layer may try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::BackendUnavailable(_)
                | DomainError::BackendError(_)
                | DomainError::QueryTimeout
                | DomainError::TruncatedMessage {
                    origin: TruncationOrigin::Backend,
                    ..
                }
        )
    }
}
