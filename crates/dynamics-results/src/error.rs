//! Error types for result resolution and the backend proxies.

/// Caller-facing error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input (answer string, out-of-range field, bad URL).
    Validation,
    /// Result code or resource absent.
    NotFound,
    /// Backend rejected the submission as malformed (HTTP 400).
    InvalidFormat,
    /// Backend unavailable or answered unexpectedly.
    Upstream,
}

/// Results errors.
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    /// Input failed local validation.
    #[error("{message}")]
    Validation { message: String },

    /// No stored result for the code.
    #[error("result not found: {code}")]
    NotFound { code: String },

    /// Backend answered 400.
    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    /// Backend answered with an unexpected status.
    #[error("upstream error: HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Body could not be interpreted.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl ResultsError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Collapse onto the four caller-facing kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidFormat { .. } => ErrorKind::InvalidFormat,
            Self::Upstream { .. } | Self::Network { .. } | Self::InvalidResponse { .. } => {
                ErrorKind::Upstream
            }
        }
    }
}

impl From<reqwest::Error> for ResultsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for results operations.
pub type ResultsResult<T> = Result<T, ResultsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_collapses_transport_failures() {
        let network = ResultsError::Network {
            message: "connection refused".to_string(),
        };
        let invalid = ResultsError::InvalidResponse {
            message: "expected object".to_string(),
        };
        let upstream = ResultsError::Upstream {
            status: 502,
            message: "bad gateway".to_string(),
        };

        assert_eq!(network.kind(), ErrorKind::Upstream);
        assert_eq!(invalid.kind(), ErrorKind::Upstream);
        assert_eq!(upstream.kind(), ErrorKind::Upstream);
    }

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = ResultsError::validation("invalid match string");
        assert_eq!(err.to_string(), "invalid match string");
    }
}
