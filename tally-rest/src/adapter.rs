//! Normalization of `reqwest` failures into the `TallyError` taxonomy.
//!
//! The mapping keeps the aggregator's retry semantics meaningful: network
//! faults and timeouts become transient loader errors, client-side request
//! mistakes become `InvalidArg`, and body-shape problems become `Data`.

use reqwest::StatusCode;
use tally_core::TallyError;

const NAME: &str = "tally-rest";

/// Map a transport-level failure (connect, timeout, TLS, ...).
pub fn from_transport(err: reqwest::Error) -> TallyError {
    if err.is_timeout() {
        TallyError::loader_timeout(NAME)
    } else {
        TallyError::loader(NAME, err.to_string())
    }
}

/// Map a non-success HTTP status.
pub fn from_status(status: StatusCode) -> TallyError {
    if status.is_client_error() {
        TallyError::invalid_arg(format!("endpoint rejected request: {status}"))
    } else {
        TallyError::loader(NAME, format!("endpoint returned {status}"))
    }
}

/// Map a JSON decode failure.
pub fn from_decode(err: reqwest::Error) -> TallyError {
    TallyError::Data(format!("malformed series payload: {err}"))
}
