//! Result code resolution.
//!
//! A resolution runs through fixed stages, each logged at debug level:
//!
//! 1. Fetching: one lookup against the backend (404 => not found, other
//!    non-2xx => upstream failure)
//! 2. Validating: the body must be a non-empty JSON object carrying
//!    `currentResults`
//! 3. Transforming: current and starting-point records become answer sets.
//!    A stored value outside `1..=5` is an invalid response, not a caller
//!    input error.
//!
//! Nothing is retried. Any failure ends the resolution and is returned to
//! the caller.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::code::pretty_code;
use crate::error::{ResultsError, ResultsResult};
use crate::record::{transform_record, TransformedResult};
use crate::types::{OperationReport, ResultsEnvelope};

/// Where result bodies come from.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    /// Raw body stored under `code`.
    async fn fetch_results(&self, code: &str) -> ResultsResult<String>;
}

/// Stage of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveState {
    Fetching,
    Validating,
    Transforming,
    Done,
    Failed,
}

impl fmt::Display for ResolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetching => "fetching",
            Self::Validating => "validating",
            Self::Transforming => "transforming",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// View-ready result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedResult {
    pub current: Option<TransformedResult>,
    /// Baseline results; `None` for a starting-point quiz.
    pub start: Option<TransformedResult>,
    pub code: String,
}

impl ResolvedResult {
    /// The code grouped for display, or the invalid-code sentinel.
    pub fn pretty_code(&self) -> String {
        pretty_code(&self.code)
    }
}

/// Resolves result codes against a [`ResultsSource`].
#[derive(Debug, Clone)]
pub struct ResultResolver<S> {
    source: S,
}

impl<S: ResultsSource> ResultResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch, validate and transform the result stored under `code`.
    pub async fn resolve(&self, code: &str) -> ResultsResult<ResolvedResult> {
        let result = self.run(code).await;
        match &result {
            Ok(_) => trace_state(code, ResolveState::Done),
            Err(e) => {
                trace_state(code, ResolveState::Failed);
                warn!(code = %code, error = %e, "result resolution failed");
            }
        }
        result
    }

    /// [`resolve`](Self::resolve) reduced to a boundary report.
    ///
    /// `invalidFormat` is never set here: the only input is the code, and a
    /// bad stored record is reported as an upstream-kind failure.
    pub async fn resolve_report(&self, code: &str) -> OperationReport<ResolvedResult> {
        OperationReport::from_result(self.resolve(code).await)
    }

    async fn run(&self, code: &str) -> ResultsResult<ResolvedResult> {
        trace_state(code, ResolveState::Fetching);
        let body = self.source.fetch_results(code).await?;

        trace_state(code, ResolveState::Validating);
        let envelope = parse_envelope(code, &body)?;

        trace_state(code, ResolveState::Transforming);
        let current =
            transform_record(envelope.current_results.as_ref()).map_err(stored_record_rejected)?;
        let start = transform_record(envelope.starting_point_results.as_ref())
            .map_err(stored_record_rejected)?;

        Ok(ResolvedResult {
            current,
            start,
            code: code.to_string(),
        })
    }
}

fn stored_record_rejected(e: ResultsError) -> ResultsError {
    ResultsError::InvalidResponse {
        message: format!("stored record rejected: {}", e),
    }
}

fn trace_state(code: &str, state: ResolveState) {
    debug!(code = %code, state = %state, "resolve");
}

/// Validate a result body.
///
/// Empty text, `null` and `{}` mean there is no result. Anything else must
/// be an object with a `currentResults` key.
fn parse_envelope(code: &str, body: &str) -> ResultsResult<ResultsEnvelope> {
    let not_found = || ResultsError::NotFound {
        code: code.to_string(),
    };

    if body.trim().is_empty() {
        return Err(not_found());
    }

    let value: Value = serde_json::from_str(body).map_err(|e| ResultsError::InvalidResponse {
        message: format!("failed to parse results response: {}", e),
    })?;

    let object = match &value {
        Value::Null => return Err(not_found()),
        Value::Object(map) if map.is_empty() => return Err(not_found()),
        Value::Object(map) => map,
        other => {
            return Err(ResultsError::InvalidResponse {
                message: format!("expected a JSON object, got {}", json_type(other)),
            })
        }
    };

    if !object.contains_key("currentResults") {
        return Err(ResultsError::InvalidResponse {
            message: "results response lacks currentResults".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| ResultsError::InvalidResponse {
        message: format!("malformed results response: {}", e),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerKey;

    struct StaticSource(ResultsResult<&'static str>);

    #[async_trait]
    impl ResultsSource for StaticSource {
        async fn fetch_results(&self, code: &str) -> ResultsResult<String> {
            match &self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(ResultsError::NotFound { .. }) => Err(ResultsError::NotFound {
                    code: code.to_string(),
                }),
                Err(_) => Err(ResultsError::Upstream {
                    status: 500,
                    message: "boom".to_string(),
                }),
            }
        }
    }

    fn resolver(body: &'static str) -> ResultResolver<StaticSource> {
        ResultResolver::new(StaticSource(Ok(body)))
    }

    #[tokio::test]
    async fn test_resolve_follow_up() {
        let resolved = resolver(
            r#"{"currentResults": {"d1": 1, "d2": 2, "isStart": false},
                "startingPointResults": {"d1": 5, "isStart": true}}"#,
        )
        .resolve("123456")
        .await
        .unwrap();

        let current = resolved.current.unwrap();
        assert_eq!(current.answers.get(AnswerKey::B), Some(2));
        assert_eq!(current.is_start, Some(false));

        let start = resolved.start.unwrap();
        assert_eq!(start.answers.get(AnswerKey::A), Some(5));
        assert_eq!(start.is_start, Some(true));
        assert_eq!(resolved.code, "123456");
    }

    #[tokio::test]
    async fn test_resolve_starting_point_quiz() {
        let resolved = resolver(r#"{"currentResults": {"d1": 3, "isStart": true}, "startingPointResults": null}"#)
            .resolve("111222")
            .await
            .unwrap();
        assert!(resolved.current.is_some());
        assert!(resolved.start.is_none());
        assert_eq!(resolved.pretty_code(), "111 222");
    }

    #[tokio::test]
    async fn test_resolve_null_current() {
        let resolved = resolver(r#"{"currentResults": null}"#)
            .resolve("123456")
            .await
            .unwrap();
        assert!(resolved.current.is_none());
        assert!(resolved.start.is_none());
    }

    #[tokio::test]
    async fn test_resolve_empty_bodies_are_not_found() {
        for body in ["", "  ", "null", "{}"] {
            let err = resolver(body).resolve("123456").await.unwrap_err();
            assert!(
                matches!(err, ResultsError::NotFound { .. }),
                "body {:?} gave {:?}",
                body,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_rejects_shapeless_bodies() {
        for body in ["[]", "42", "\"text\"", r#"{"d1": 1}"#, "{not json"] {
            let err = resolver(body).resolve("123456").await.unwrap_err();
            assert!(
                matches!(err, ResultsError::InvalidResponse { .. }),
                "body {:?} gave {:?}",
                body,
                err
            );
        }
    }

    #[tokio::test]
    async fn test_resolve_rejects_mistyped_fields() {
        let err = resolver(r#"{"currentResults": {"d1": "one"}}"#)
            .resolve("123456")
            .await
            .unwrap_err();
        assert!(matches!(err, ResultsError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_resolve_out_of_range_field() {
        let err = resolver(r#"{"currentResults": {"d1": 7}}"#)
            .resolve("123456")
            .await
            .unwrap_err();
        assert!(matches!(err, ResultsError::InvalidResponse { .. }));
        assert!(err.to_string().contains("answer A"));
    }

    #[tokio::test]
    async fn test_resolve_report_bad_stored_record_is_not_invalid_format() {
        let report = resolver(r#"{"currentResults": {"d1": 1}, "startingPointResults": {"d3": 0}}"#)
            .resolve_report("123456")
            .await;
        assert!(!report.success);
        assert!(!report.invalid_format);
        assert!(!report.not_found);
        assert!(report.message.unwrap().contains("stored record rejected"));
    }

    #[tokio::test]
    async fn test_resolve_numeric_result_code() {
        let resolved = resolver(
            r#"{"currentResults": {"d1": 1, "d2": 2, "isStart": true, "resultCode": 123456}}"#,
        )
        .resolve("123456")
        .await
        .unwrap();

        let current = resolved.current.unwrap();
        assert_eq!(current.answers.get(AnswerKey::B), Some(2));
        assert_eq!(current.is_start, Some(true));
    }

    #[tokio::test]
    async fn test_resolve_report_not_found() {
        let resolver = ResultResolver::new(StaticSource(Err(ResultsError::NotFound {
            code: String::new(),
        })));
        let report = resolver.resolve_report("999999").await;
        assert!(!report.success);
        assert!(report.not_found);
        assert!(report.data.is_none());
    }

    #[tokio::test]
    async fn test_resolve_report_upstream() {
        let resolver = ResultResolver::new(StaticSource(Err(ResultsError::Upstream {
            status: 500,
            message: String::new(),
        })));
        let report = resolver.resolve_report("123456").await;
        assert!(!report.success);
        assert!(!report.not_found);
        assert!(!report.invalid_format);
        assert!(report.message.is_some());
    }

    #[tokio::test]
    async fn test_resolved_serialized_shape() {
        let report = resolver(r#"{"currentResults": {"d1": 1, "isStart": true}}"#)
            .resolve_report("123456")
            .await;
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["code"], "123456");
        assert_eq!(json["data"]["current"]["answers"][0]["key"], "A");
        assert_eq!(json["data"]["current"]["isStart"], true);
        assert!(json["data"]["start"].is_null());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ResolveState::Fetching.to_string(), "fetching");
        assert_eq!(ResolveState::Failed.to_string(), "failed");
    }
}
