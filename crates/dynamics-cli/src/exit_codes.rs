//! Exit codes for the `dynamics` binary.
//! These codes are part of the public contract.

use dynamics_results::{ErrorKind, ProxyOutcome, ResultsError};

pub const SUCCESS: i32 = 0;
pub const NOT_FOUND: i32 = 1; // No result under the code
pub const INVALID_INPUT: i32 = 2; // Malformed input or backend answered 400
pub const UPSTREAM_FAILURE: i32 = 3; // Backend unreachable or unexpected status
pub const INTERNAL_ERROR: i32 = 4; // Setup failed before any request

pub fn for_error(err: &ResultsError) -> i32 {
    match err.kind() {
        ErrorKind::NotFound => NOT_FOUND,
        ErrorKind::Validation | ErrorKind::InvalidFormat => INVALID_INPUT,
        ErrorKind::Upstream => UPSTREAM_FAILURE,
    }
}

pub fn for_outcome(outcome: &ProxyOutcome) -> i32 {
    match outcome {
        ProxyOutcome::Success(_) => SUCCESS,
        ProxyOutcome::InvalidFormat => INVALID_INPUT,
        ProxyOutcome::Failure { .. } => UPSTREAM_FAILURE,
    }
}
