//! Completeness validation and gap-filling interval reconstruction.
//!
//! Upstream truncation of live data tends to occur in short runs, so a
//! missing reading is filled from the most recent known-good value
//! (carry-forward). Look-ahead is a fallback for a leading gap only, and it
//! never searches past the immediately next observation: the algorithm
//! refuses to guess across multi-step outages rather than silently
//! extrapolating.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::SpotwattError;
use crate::types::{Observation, ObservationState, PriceInterval};

/// Check that fetched observations actually cover the requested range start.
///
/// Pure check, no side effects. `entity` lands in the error so the caller
/// can tell a misconfiguration from a genuine upstream data gap.
///
/// # Errors
/// - `SpotwattError::Incomplete` if `history` is empty.
/// - `SpotwattError::Incomplete` if the first observation's timestamp is not
///   exactly the requested `from`; the usual cause is an upstream retention
///   window starting later than the requested range, or a wrong entity id.
pub fn validate_history(
    entity: &str,
    history: &[Observation],
    from: DateTime<Utc>,
) -> Result<(), SpotwattError> {
    let Some(first) = history.first() else {
        return Err(SpotwattError::incomplete(entity, "empty history response"));
    };
    if first.timestamp != from {
        return Err(SpotwattError::incomplete(
            entity,
            format!(
                "history starts at {} instead of requested {from}",
                first.timestamp
            ),
        ));
    }
    Ok(())
}

/// Reconstruct a gapless interval sequence from validated observations.
///
/// Each observation opens an interval at its own timestamp and closes it at
/// the next observation's timestamp; the final interval closes at the
/// requested `to`. Expects input already checked by [`validate_history`],
/// so the output exactly tiles `[history[0].timestamp, to)`.
///
/// `Unavailable` readings are priced by carry-forward of the last known-good
/// value or, when none exists yet, by borrowing the next observation's value
/// (one step, never further). A borrowed value becomes the new known-good
/// value for subsequent gaps.
///
/// # Errors
/// Returns `SpotwattError::Unresolvable` when neither policy yields a value.
/// Failure is total: one unresolved interval invalidates the whole requested
/// range and no partial sequence is returned.
pub fn reconstruct_intervals(
    entity: &str,
    history: &[Observation],
    to: DateTime<Utc>,
) -> Result<Vec<PriceInterval>, SpotwattError> {
    let mut intervals = Vec::with_capacity(history.len());
    let mut last_known: Option<Decimal> = None;

    for (index, obs) in history.iter().enumerate() {
        let valid_from = obs.timestamp;
        let valid_to = history.get(index + 1).map_or(to, |next| next.timestamp);

        let value = match obs.state {
            ObservationState::Valid(v) => {
                last_known = Some(v);
                v
            }
            ObservationState::Unavailable => {
                #[cfg(feature = "tracing")]
                tracing::warn!(entity, at = %valid_from, index, "gap detected in price history");
                resolve_gap(entity, history, index, &mut last_known, valid_from)?
            }
        };

        intervals.push(PriceInterval {
            value,
            valid_from,
            valid_to,
        });
    }

    Ok(intervals)
}

/// Price a missing reading: carry-forward first, then one-step look-ahead.
fn resolve_gap(
    entity: &str,
    history: &[Observation],
    index: usize,
    last_known: &mut Option<Decimal>,
    at: DateTime<Utc>,
) -> Result<Decimal, SpotwattError> {
    if let Some(v) = *last_known {
        // Assume the price held steady through the outage.
        #[cfg(feature = "tracing")]
        tracing::debug!(entity, at = %at, index, value = %v, "gap resolved by carry-forward");
        return Ok(v);
    }

    // Leading gap: nothing observed yet in this call. Borrow the next
    // observation's value, one step only; a sentinel there fails the call.
    if let Some(next) = history.get(index + 1)
        && let ObservationState::Valid(v) = next.state
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(entity, at = %at, index, value = %v, "gap resolved by look-ahead");
        *last_known = Some(v);
        return Ok(v);
    }

    Err(SpotwattError::Unresolvable {
        entity: entity.to_string(),
        at,
        index,
    })
}
