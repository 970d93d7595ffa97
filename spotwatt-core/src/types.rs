//! Observation and price-interval data structures.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// State reported by the upstream source for a single reading.
///
/// Upstream marks readings it failed to capture with sentinel strings; those
/// collapse into the single `Unavailable` case at the wire boundary so that
/// reconstruction never compares strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObservationState {
    /// A captured numeric price.
    Valid(Decimal),
    /// The reading was not captured upstream.
    Unavailable,
}

impl ObservationState {
    /// Returns the captured value, or `None` for `Unavailable`.
    #[must_use]
    pub const fn value(&self) -> Option<Decimal> {
        match self {
            Self::Valid(v) => Some(*v),
            Self::Unavailable => None,
        }
    }
}

/// One timestamped raw price reading fetched from the upstream source.
///
/// Observations are created fresh per fetch, never mutated, and discarded
/// once reconstruction has produced its intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Ordering and interval-boundary timestamp of the reading.
    pub timestamp: DateTime<Utc>,
    /// Captured value or sentinel marker.
    pub state: ObservationState,
}

impl Observation {
    /// Observation carrying a captured price.
    #[must_use]
    pub const fn valid(timestamp: DateTime<Utc>, value: Decimal) -> Self {
        Self {
            timestamp,
            state: ObservationState::Valid(value),
        }
    }

    /// Observation whose reading was not captured upstream.
    #[must_use]
    pub const fn unavailable(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            state: ObservationState::Unavailable,
        }
    }
}

/// A half-open time span `[valid_from, valid_to)` with one constant price.
///
/// Reconstructed sequences tile the requested range exactly: adjacent
/// intervals share a boundary, the first starts at the requested `from`, and
/// the last ends at the requested `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInterval {
    /// Price in effect over the span.
    pub value: Decimal,
    /// Inclusive start of the span.
    pub valid_from: DateTime<Utc>,
    /// Exclusive end of the span.
    pub valid_to: DateTime<Utc>,
}

impl PriceInterval {
    /// Length of the span. Positive for any interval honoring the
    /// `valid_from < valid_to` invariant.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.valid_to - self.valid_from
    }

    /// Whether `at` falls within the half-open span.
    #[must_use]
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        self.valid_from <= at && at < self.valid_to
    }
}
