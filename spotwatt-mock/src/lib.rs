use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use spotwatt_core::{
    Observation, PriceInterval, PriceSource, SpotwattError, reconstruct_intervals,
    validate_history,
};

/// Mock price source for CI-safe tests. Provides deterministic data without
/// any network access.
pub struct MockPriceSource {
    behavior: Behavior,
}

enum Behavior {
    Flat(Decimal),
    Observations(Vec<Observation>),
    Failing,
}

impl MockPriceSource {
    /// One interval covering the whole requested range at a constant price.
    #[must_use]
    pub const fn flat(rate: Decimal) -> Self {
        Self {
            behavior: Behavior::Flat(rate),
        }
    }

    /// Replay a canned observation sequence through the real validator and
    /// reconstructor. The sequence must start at the requested `from` to
    /// pass validation, just like live data.
    #[must_use]
    pub const fn with_observations(observations: Vec<Observation>) -> Self {
        Self {
            behavior: Behavior::Observations(observations),
        }
    }

    /// Always fails with a transport error, so callers can exercise their
    /// error paths.
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            behavior: Behavior::Failing,
        }
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn price_data(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PriceInterval>, SpotwattError> {
        match &self.behavior {
            Behavior::Flat(rate) => Ok(vec![PriceInterval {
                value: *rate,
                valid_from: from,
                valid_to: to,
            }]),
            Behavior::Observations(observations) => {
                validate_history(self.name(), observations, from)?;
                reconstruct_intervals(self.name(), observations, to)
            }
            Behavior::Failing => Err(SpotwattError::transport("forced failure")),
        }
    }
}
