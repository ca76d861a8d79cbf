//! Outcome of forwarding a payload to the backend.
//!
//! Email dispatch and result submission both reduce to one of three values:
//! success, invalid format (the backend answered 400), or failure. Neither
//! ever surfaces as an error.

use serde_json::Value;

use crate::error::{ResultsError, ResultsResult};
use crate::types::OperationReport;

#[derive(Debug, Clone, PartialEq)]
pub enum ProxyOutcome {
    /// Backend accepted the payload; carries the parsed body when there was one.
    Success(Option<Value>),
    /// Backend rejected the payload as malformed.
    InvalidFormat,
    /// Network error or unexpected status.
    Failure { message: String },
}

impl ProxyOutcome {
    pub(crate) fn from_result(result: ResultsResult<Option<Value>>) -> Self {
        match result {
            Ok(body) => Self::Success(body),
            Err(ResultsError::InvalidFormat { .. }) => Self::InvalidFormat,
            Err(e) => Self::Failure {
                message: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// `{success, message?, invalidFormat?, data?}`.
    pub fn into_report(self) -> OperationReport {
        match self {
            Self::Success(data) => OperationReport::success(data),
            Self::InvalidFormat => OperationReport {
                success: false,
                message: None,
                not_found: false,
                invalid_format: true,
                data: None,
            },
            Self::Failure { message } => OperationReport {
                success: false,
                message: Some(message),
                not_found: false,
                invalid_format: false,
                data: None,
            },
        }
    }
}
