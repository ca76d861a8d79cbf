//! HTTP layer: one request per call, status mapping, body reading.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ResultsError, ResultsResult};
use crate::status::status_is_good;

/// HTTP backend for making requests (holds reqwest client and endpoints).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) email_url: String,
}

impl HttpBackend {
    /// GET a result by code and return the raw body text.
    ///
    /// 404 => NotFound, other non-2xx => Upstream.
    pub(crate) async fn fetch_result_body(&self, url: &str, code: &str) -> ResultsResult<String> {
        let response = self
            .client
            .get(url)
            .query(&[("resultCode", code)])
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ResultsError::NotFound {
                code: code.to_string(),
            });
        }

        if !status_is_good(status.as_u16()) {
            return Err(upstream(status, response).await);
        }

        response.text().await.map_err(|e| ResultsError::Network {
            message: format!("failed to read response body: {}", e),
        })
    }

    /// POST a JSON payload.
    ///
    /// 400 => InvalidFormat, other non-2xx => Upstream. A 2xx body that is
    /// empty or not JSON yields `None`.
    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
    ) -> ResultsResult<Option<Value>> {
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            let message = response.text().await.unwrap_or_default();
            return Err(ResultsError::InvalidFormat { message });
        }

        if !status_is_good(status.as_u16()) {
            return Err(upstream(status, response).await);
        }

        let text = response.text().await.map_err(|e| ResultsError::Network {
            message: format!("failed to read response body: {}", e),
        })?;

        if text.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str(&text) {
            Ok(body) => Ok(Some(body)),
            Err(e) => {
                debug!(error = %e, "response body is not JSON; ignoring");
                Ok(None)
            }
        }
    }
}

async fn upstream(status: StatusCode, response: reqwest::Response) -> ResultsError {
    let message = response
        .text()
        .await
        .ok()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| status.to_string());

    ResultsError::Upstream {
        status: status.as_u16(),
        message,
    }
}
