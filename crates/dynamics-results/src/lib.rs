//! Result resolution and answer transformation for the dynamics quiz.
//!
//! This crate provides:
//!
//! - Answer-string parsing and encoding (`a1b2c3d4e5f1g2h3`)
//! - Mapping of backend result records (`d1`..`d8`) onto answer keys `A`..`H`
//! - Result code resolution against the results backend
//! - Email dispatch and result submission proxies
//! - Display helpers for status codes and result codes
//!
//! # Quick Start
//!
//! ```no_run
//! use dynamics_results::{ResultResolver, ResultsClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ResultsClient::from_env()?;
//! let resolver = ResultResolver::new(client);
//!
//! let resolved = resolver.resolve("123456").await?;
//! println!("result {}", resolved.pretty_code());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `DYNAMICS_SERVER_URL` | Backend base URL (default: `http://localhost:8000`) |
//! | `DYNAMICS_EMAIL_URL` | Email endpoint (default: `{server}/api/email`) |
//! | `DYNAMICS_GROUP_CODE` | Group code stamped onto submissions (default: `000000`) |
//! | `DYNAMICS_SESSION_ID` | Session id stamped onto submissions (default: `12345`) |
//! | `DYNAMICS_TIMEOUT` | Request timeout in seconds (default: none) |

pub mod answers;
pub mod client;
pub mod code;
pub mod error;
pub mod proxy;
pub mod record;
pub mod resolver;
pub mod status;
pub mod types;

// Re-export main types
pub use answers::{
    parse_answer_string, AnswerEntry, AnswerKey, AnswerSet, ANSWER_COUNT, FIELD_TABLE,
    MAX_ANSWER_VALUE, MIN_ANSWER_VALUE,
};
pub use client::{ResultsClient, RESULTS_USER_AGENT};
pub use code::{pretty_code, INVALID_CODE};
pub use error::{ErrorKind, ResultsError, ResultsResult};
pub use proxy::ProxyOutcome;
pub use record::{transform_record, ResultRecord, TransformedResult};
pub use resolver::{ResolveState, ResolvedResult, ResultResolver, ResultsSource};
pub use status::status_is_good;
pub use types::{EmailRequest, OperationReport, ResultsConfig, ResultsEnvelope, SubmissionPayload};
