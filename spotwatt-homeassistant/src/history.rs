//! Wire model for the Home Assistant history API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use spotwatt_core::{Observation, SpotwattError};

/// Sentinel states Home Assistant reports for readings it failed to capture.
/// Case-sensitive; anything else is expected to be a decimal literal.
const SENTINEL_STATES: [&str; 2] = ["unknown", "unavailable"];

/// One entry of a `/api/history/period` series. The endpoint also reports
/// `entity_id` and `last_changed`, which this connector does not consume;
/// `last_updated` is the ordering and interval-boundary timestamp.
#[derive(Debug, Deserialize)]
struct HistoryEntry {
    state: String,
    last_updated: DateTime<Utc>,
}

/// Parse a raw history body: a JSON array containing exactly one array of
/// state entries for the filtered entity.
///
/// # Errors
/// - `SpotwattError::Deserialization` if the body is not the expected shape,
///   if more than one series comes back, or if a non-sentinel state fails to
///   parse as a decimal.
pub(crate) fn parse_history(body: &str) -> Result<Vec<Observation>, SpotwattError> {
    let mut series: Vec<Vec<HistoryEntry>> =
        serde_json::from_str(body).map_err(|e| SpotwattError::deserialization(e.to_string()))?;
    if series.len() > 1 {
        return Err(SpotwattError::deserialization(format!(
            "expected a single history series, got {}",
            series.len()
        )));
    }
    // An absent series means no data; completeness validation rejects it
    // downstream with the entity and range attached.
    let entries = series.pop().unwrap_or_default();
    entries.into_iter().map(observation_from_entry).collect()
}

fn observation_from_entry(entry: HistoryEntry) -> Result<Observation, SpotwattError> {
    if SENTINEL_STATES.contains(&entry.state.as_str()) {
        return Ok(Observation::unavailable(entry.last_updated));
    }
    let value = entry.state.parse::<Decimal>().map_err(|_| {
        SpotwattError::deserialization(format!("unparseable price state {:?}", entry.state))
    })?;
    Ok(Observation::valid(entry.last_updated, value))
}
