//! Error and result definitions for pull-based sequences.
//!
//! There are only two terminal signals in this crate, and they are kept
//! strictly apart:
//!
//! - **Exhaustion** — the normal end of a sequence, reported as `Ok(None)`.
//! - **Failure** — the underlying producer broke mid-stream, reported as
//!   `Err(SourceError)` to exactly the caller whose pull triggered it.
//!
//! Malformed construction parameters are not represented here: every count
//! and length parameter in the public API is a `usize`, so the negative-value
//! failure class cannot be constructed in the first place.

use std::error::Error as StdError;
use thiserror::Error;

/// The result of pulling one element from a [`Source`](crate::Source).
///
/// `Ok(Some(item))` yields an element, `Ok(None)` signals exhaustion, and
/// `Err` carries an upstream failure.
pub type PullResult<T> = Result<Option<T>, SourceError>;

/// Failure raised by an upstream producer during a pull.
///
/// Exhaustion is not an error — sources report it with `Ok(None)`. A
/// `SourceError` always means the producer itself broke, and it surfaces
/// synchronously to the one consumer whose pull hit it; sibling consumers of
/// a shared source are unaffected unless they reach the same position.
#[derive(Debug, Error)]
#[error("source failure: {message}")]
pub struct SourceError {
    message: String,
    #[source]
    cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl SourceError {
    /// Create a failure from a plain message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Create a failure wrapping an underlying error.
    ///
    /// The original error stays reachable through [`std::error::Error::source`].
    #[must_use]
    pub fn with_cause(
        message: impl Into<String>,
        cause: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// The failure message, without the cause chain.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Box<dyn StdError + Send + Sync + 'static>> for SourceError {
    fn from(cause: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        let message = cause.to_string();
        Self {
            message,
            cause: Some(cause),
        }
    }
}
