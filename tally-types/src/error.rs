use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tally workspace.
///
/// This wraps argument validation errors, data-shape issues, loader-tagged
/// failures, and the timeout conditions produced while fetching a window.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TallyError {
    /// Invalid input argument (e.g. a zero-length window).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with returned or expected data (missing fields, bad ordering, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// An individual loading strategy returned an error.
    #[error("{loader} failed: {msg}")]
    Loader {
        /// Loader name that failed.
        loader: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual loader call exceeded the configured timeout.
    #[error("loader timed out: {loader}")]
    LoaderTimeout {
        /// Loader name that timed out.
        loader: String,
    },

    /// The overall window load exceeded the configured deadline.
    #[error("window load timed out")]
    RequestTimeout,
}

impl TallyError {
    /// Helper: build a `Loader` error with the loader name and message.
    pub fn loader(loader: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Loader {
            loader: loader.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `LoaderTimeout` error for a loader name.
    pub fn loader_timeout(loader: impl Into<String>) -> Self {
        Self::LoaderTimeout {
            loader: loader.into(),
        }
    }

    /// Helper: build an `InvalidArg` error from a message.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// `true` for failures worth retrying (loader faults and timeouts).
    ///
    /// Validation and data-shape errors are deterministic and are never
    /// retried by the middleware.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Loader { .. } | Self::LoaderTimeout { .. } | Self::RequestTimeout
        )
    }
}
