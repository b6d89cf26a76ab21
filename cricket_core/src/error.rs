//! Error taxonomy for the cricket skill core.
//!
//! Two families:
//! - `DataError`: anything that goes wrong between issuing an upstream
//!   query and producing usable facts (transport, payload, extraction).
//! - `DialogueError`: per-turn conversation failures (corrupted session
//!   state, bad or absent slot values).
//!
//! Neither family is ever surfaced raw to the platform; the dialogue layer
//! collapses every `DataError` into one fixed terminal reply and maps
//! `DialogueError` variants to diagnosable terminal replies.

use thiserror::Error;

/// Failures in fetching or extracting upstream cricket data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network-level failure: connection refused, timeout, DNS.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Body is not valid JSON, or the API returned its own error envelope.
    #[error("payload parse failure: {0}")]
    Parse(String),

    /// An expected field is absent or mis-typed in an otherwise valid payload.
    #[error("missing field {0} in payload")]
    Missing(String),

    /// A series number outside the 1-based range of the series list.
    #[error("series number {number} is out of range (have {count} series)")]
    OutOfRange { number: i64, count: usize },
}

impl DataError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        DataError::Transport(err.to_string())
    }

    pub fn missing(path: impl Into<String>) -> Self {
        DataError::Missing(path.into())
    }
}

/// Per-turn conversation failures.
#[derive(Debug, Error)]
pub enum DialogueError {
    /// The session attribute holds a value outside the closed state set.
    /// The display text is echoed verbatim in the terminal reply.
    #[error("unknown level {0}")]
    UnknownState(String),

    /// A required slot is absent or its value cannot be parsed.
    #[error("missing or invalid slot {0}")]
    MissingSlot(&'static str),
}
