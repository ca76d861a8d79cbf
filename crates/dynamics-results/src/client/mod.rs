//! Client for the results backend.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ResultsError, ResultsResult};
use crate::proxy::ProxyOutcome;
use crate::resolver::ResultsSource;
use crate::types::{EmailRequest, ResultsConfig, SubmissionPayload};

mod http;

use http::HttpBackend;

/// User-Agent sent with every request.
pub const RESULTS_USER_AGENT: &str = concat!("dynamics-results/", env!("CARGO_PKG_VERSION"));

/// Results client.
#[derive(Debug, Clone)]
pub struct ResultsClient {
    http: HttpBackend,
    config: ResultsConfig,
}

impl ResultsClient {
    pub fn new(config: ResultsConfig) -> ResultsResult<Self> {
        let base_url = checked_url("server", &config.server_url)?;
        let email_url = checked_url("email", &config.resolved_email_url())?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(RESULTS_USER_AGENT));

        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| ResultsError::Network {
            message: format!("failed to create HTTP client: {}", e),
        })?;

        Ok(Self {
            http: HttpBackend {
                client,
                base_url,
                email_url,
            },
            config,
        })
    }

    pub fn from_env() -> ResultsResult<Self> {
        Self::new(ResultsConfig::from_env())
    }

    /// Raw body of `GET /api/results?resultCode=<code>`.
    pub async fn fetch_result_body(&self, code: &str) -> ResultsResult<String> {
        let url = self.results_url();
        debug!(url = %url, code = %code, "fetching result");

        self.http.fetch_result_body(&url, code).await
    }

    /// Store a submission. The configured group code and session id are
    /// stamped onto the payload.
    pub async fn submit_results(&self, payload: &SubmissionPayload) -> ProxyOutcome {
        let url = self.results_url();
        let stamped = StampedSubmission {
            payload,
            group_code: &self.config.group_code,
            session_id: &self.config.session_id,
        };
        debug!(url = %url, start_code = ?payload.start_code, "submitting results");

        let outcome = ProxyOutcome::from_result(self.http.post_json(&url, &stamped).await);
        log_outcome("submit", &outcome);
        outcome
    }

    /// Ask the email endpoint to send a result link.
    ///
    /// A successful send carries no body.
    pub async fn send_email(&self, email: &str, results_string: &str) -> ProxyOutcome {
        let request = EmailRequest {
            email: email.to_string(),
            results_string: results_string.to_string(),
        };
        debug!(url = %self.http.email_url, "dispatching result email");

        let outcome = match ProxyOutcome::from_result(
            self.http.post_json(&self.http.email_url, &request).await,
        ) {
            ProxyOutcome::Success(_) => ProxyOutcome::Success(None),
            other => other,
        };
        log_outcome("email", &outcome);
        outcome
    }

    fn results_url(&self) -> String {
        format!("{}/api/results", self.http.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.http.base_url
    }

    pub fn email_url(&self) -> &str {
        &self.http.email_url
    }

    pub fn config(&self) -> &ResultsConfig {
        &self.config
    }
}

#[async_trait]
impl ResultsSource for ResultsClient {
    async fn fetch_results(&self, code: &str) -> ResultsResult<String> {
        self.fetch_result_body(code).await
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct StampedSubmission<'a> {
    #[serde(flatten)]
    payload: &'a SubmissionPayload,
    group_code: &'a str,
    session_id: &'a str,
}

fn checked_url(what: &str, raw: &str) -> ResultsResult<String> {
    let trimmed = raw.trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| {
        ResultsError::validation(format!("invalid {} URL '{}': {}", what, raw, e))
    })?;
    Ok(trimmed.to_string())
}

fn log_outcome(operation: &str, outcome: &ProxyOutcome) {
    match outcome {
        ProxyOutcome::Success(_) => info!(operation, "backend accepted payload"),
        ProxyOutcome::InvalidFormat => info!(operation, "backend rejected payload format"),
        ProxyOutcome::Failure { message } => {
            warn!(operation, error = %message, "backend request failed")
        }
    }
}
