//! spotwatt-homeassistant
//!
//! Price source backed by the Home Assistant `/api/history/period` endpoint.
//! Fetches the raw state history of a price sensor entity, collapses the
//! sentinel states to typed observations, and reconstructs a gapless
//! interval sequence via `spotwatt-core`.
//!
//! Home Assistant's recorder keeps a rolling history window; ranges that
//! predate the retention period come back truncated and fail completeness
//! validation rather than producing fabricated prices.
#![warn(missing_docs)]

/// Builder for configuring and constructing [`HomeAssistantSource`].
pub mod builder;
mod history;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use spotwatt_core::{
    PriceInterval, PriceSource, SpotwattError, reconstruct_intervals, validate_history,
};
use url::Url;

pub use builder::HomeAssistantBuilder;

/// Price source that reads a price sensor's state history from a Home
/// Assistant instance.
///
/// Construct via [`HomeAssistantSource::builder`]. Authentication is the
/// transport client's concern: inject a `reqwest::Client` whose default
/// headers carry the long-lived access token.
#[derive(Debug)]
pub struct HomeAssistantSource {
    client: reqwest::Client,
    base_url: Url,
    entity_id: String,
}

impl HomeAssistantSource {
    /// Start building a new source.
    ///
    /// ```rust,no_run
    /// use spotwatt_homeassistant::HomeAssistantSource;
    ///
    /// let source = HomeAssistantSource::builder()
    ///     .base_url("http://homeassistant.local:8123")
    ///     .entity_id("sensor.electricity_price")
    ///     .build()?;
    /// # Ok::<(), spotwatt_core::SpotwattError>(())
    /// ```
    #[must_use]
    pub fn builder() -> HomeAssistantBuilder {
        HomeAssistantBuilder::default()
    }

    /// Entity identifier this source fetches history for.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub(crate) fn new(client: reqwest::Client, base_url: Url, entity_id: String) -> Self {
        Self {
            client,
            base_url,
            entity_id,
        }
    }

    fn history_url(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Url, SpotwattError> {
        let path = format!(
            "api/history/period/{}",
            from.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        let mut url = self
            .base_url
            .join(&path)
            .map_err(|e| SpotwattError::transport(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("end", &to.to_rfc3339_opts(SecondsFormat::Secs, true))
            .append_pair("filter_entity_id", &self.entity_id);
        Ok(url)
    }

    async fn fetch_history(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<spotwatt_core::Observation>, SpotwattError> {
        let url = self.history_url(from, to)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SpotwattError::transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| SpotwattError::transport(e.to_string()))?;
        let body = resp
            .text()
            .await
            .map_err(|e| SpotwattError::transport(e.to_string()))?;
        history::parse_history(&body)
    }
}

#[async_trait]
impl PriceSource for HomeAssistantSource {
    fn name(&self) -> &'static str {
        "home-assistant"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "spotwatt::homeassistant::price_data",
            skip(self),
            fields(entity = %self.entity_id, from = %from, to = %to),
        )
    )]
    async fn price_data(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PriceInterval>, SpotwattError> {
        let observations = self.fetch_history(from, to).await?;
        validate_history(&self.entity_id, &observations, from)?;
        reconstruct_intervals(&self.entity_id, &observations, to)
    }
}
