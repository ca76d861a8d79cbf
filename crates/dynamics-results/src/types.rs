//! Configuration, wire types and boundary reports.

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::error::{ResultsError, ResultsResult};
use crate::record::ResultRecord;

/// Body of `GET /api/results?resultCode=...`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsEnvelope {
    /// Result stored under the requested code.
    pub current_results: Option<ResultRecord>,

    /// Baseline the current result follows up on; `None` for baseline quizzes.
    #[serde(default)]
    pub starting_point_results: Option<ResultRecord>,
}

/// Answers to store, in backend field naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub record: ResultRecord,

    /// Code of the baseline result this submission follows up on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_code: Option<String>,
}

impl SubmissionPayload {
    /// Build a payload from a complete answer set.
    pub fn new(
        answers: &AnswerSet,
        is_start: bool,
        start_code: Option<String>,
    ) -> ResultsResult<Self> {
        if !answers.is_complete() {
            return Err(ResultsError::validation(format!(
                "submission needs a value for every answer, got {}",
                answers.object().values().filter(|v| v.is_some()).count()
            )));
        }

        let mut record = ResultRecord::from_answers(answers);
        record.is_start = Some(is_start);

        Ok(Self { record, start_code })
    }
}

/// Body of `POST /api/email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
    pub results_string: String,
}

/// Structured value returned at every public boundary.
///
/// Serializes as `{success, message?, notFound?, invalidFormat?, data?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport<T = serde_json::Value> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub not_found: bool,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub invalid_format: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> OperationReport<T> {
    pub fn success(data: Option<T>) -> Self {
        Self {
            success: true,
            message: None,
            not_found: false,
            invalid_format: false,
            data,
        }
    }

    /// `invalidFormat` marks caller input the operation refused: a bad
    /// answer string or a payload the backend answered 400 to.
    pub fn from_error(err: &ResultsError) -> Self {
        use crate::error::ErrorKind;

        let kind = err.kind();
        Self {
            success: false,
            message: Some(err.to_string()),
            not_found: kind == ErrorKind::NotFound,
            invalid_format: matches!(kind, ErrorKind::Validation | ErrorKind::InvalidFormat),
            data: None,
        }
    }

    pub fn from_result(result: ResultsResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(Some(data)),
            Err(e) => Self::from_error(&e),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// Base URL of the results backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Email endpoint; defaults to `{server_url}/api/email`.
    #[serde(default)]
    pub email_url: Option<String>,

    /// Group code stamped onto submissions.
    #[serde(default = "default_group_code")]
    pub group_code: String,

    /// Session id stamped onto submissions.
    #[serde(default = "default_session_id")]
    pub session_id: String,

    /// Request timeout in seconds. Unset means requests may wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_group_code() -> String {
    "000000".to_string()
}

fn default_session_id() -> String {
    "12345".to_string()
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            email_url: None,
            group_code: default_group_code(),
            session_id: default_session_id(),
            timeout_secs: None,
        }
    }
}

impl ResultsConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `DYNAMICS_SERVER_URL` | Backend base URL |
    /// | `DYNAMICS_EMAIL_URL` | Email endpoint |
    /// | `DYNAMICS_GROUP_CODE` | Submission group code |
    /// | `DYNAMICS_SESSION_ID` | Submission session id |
    /// | `DYNAMICS_TIMEOUT` | Request timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            server_url: std::env::var("DYNAMICS_SERVER_URL")
                .unwrap_or_else(|_| default_server_url()),
            email_url: std::env::var("DYNAMICS_EMAIL_URL")
                .ok()
                .filter(|v| !v.is_empty()),
            group_code: std::env::var("DYNAMICS_GROUP_CODE")
                .unwrap_or_else(|_| default_group_code()),
            session_id: std::env::var("DYNAMICS_SESSION_ID")
                .unwrap_or_else(|_| default_session_id()),
            timeout_secs: std::env::var("DYNAMICS_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }

    /// Set the backend base URL.
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Set the email endpoint.
    pub fn with_email_url(mut self, url: impl Into<String>) -> Self {
        self.email_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Email endpoint after applying the default.
    pub fn resolved_email_url(&self) -> String {
        self.email_url.clone().unwrap_or_else(|| {
            format!("{}/api/email", self.server_url.trim_end_matches('/'))
        })
    }
}
