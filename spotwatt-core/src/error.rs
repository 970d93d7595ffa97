use chrono::{DateTime, Utc};
use thiserror::Error;

/// Unified error type for the spotwatt workspace.
///
/// Covers configuration validation, transport and deserialization failures,
/// and the two data-quality failures raised while turning raw observations
/// into priced intervals. None of these are recovered internally; every
/// variant aborts the whole `price_data` call that produced it.
#[derive(Debug, Error)]
pub enum SpotwattError {
    /// A required configuration value is missing, empty, or unusable.
    #[error("missing or invalid configuration value: {field}")]
    Config {
        /// Name of the offending configuration field (e.g. "base_url").
        field: &'static str,
    },

    /// The upstream fetch failed at the HTTP layer.
    #[error("transport failure: {msg}")]
    Transport {
        /// Human-readable description of the network or status failure.
        msg: String,
    },

    /// The response body did not parse into the expected shape.
    #[error("malformed history response: {msg}")]
    Deserialization {
        /// Description of the shape or parse violation.
        msg: String,
    },

    /// The fetched observations do not cover the requested range.
    ///
    /// The usual causes are an upstream retention window that starts later
    /// than the requested range, or a wrong entity identifier.
    #[error("incomplete price history for {entity}: {reason}")]
    Incomplete {
        /// Entity identifier the history was requested for.
        entity: String,
        /// Why the history fails the completeness check.
        reason: String,
    },

    /// No defensible price could be determined for an interval.
    ///
    /// Raised when an unavailable reading has no earlier known-good value to
    /// carry forward and no usable next observation to borrow from.
    #[error("unresolvable price for {entity} at {at} (observation {index})")]
    Unresolvable {
        /// Entity identifier the history was requested for.
        entity: String,
        /// Start timestamp of the interval that could not be priced.
        at: DateTime<Utc>,
        /// Index of the offending observation within the fetched sequence.
        index: usize,
    },
}

impl SpotwattError {
    /// Helper: build a `Config` error for a missing or unusable field.
    #[must_use]
    pub const fn config(field: &'static str) -> Self {
        Self::Config { field }
    }

    /// Helper: build a `Transport` error from any displayable failure.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport { msg: msg.into() }
    }

    /// Helper: build a `Deserialization` error.
    pub fn deserialization(msg: impl Into<String>) -> Self {
        Self::Deserialization { msg: msg.into() }
    }

    /// Helper: build an `Incomplete` error tagged with the entity id.
    pub fn incomplete(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Incomplete {
            entity: entity.into(),
            reason: reason.into(),
        }
    }
}
