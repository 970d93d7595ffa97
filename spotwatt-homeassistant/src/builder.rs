use spotwatt_core::SpotwattError;
use url::Url;

use crate::HomeAssistantSource;

/// Builder for [`HomeAssistantSource`].
///
/// `base_url` and `entity_id` are required and must be non-empty; both are
/// checked here, before any fetch. The HTTP client is optional: inject one
/// to control timeouts and to attach the `Authorization` header Home
/// Assistant expects.
#[derive(Debug, Default)]
pub struct HomeAssistantBuilder {
    base_url: Option<String>,
    entity_id: Option<String>,
    client: Option<reqwest::Client>,
}

impl HomeAssistantBuilder {
    /// Base URL of the Home Assistant instance, e.g.
    /// `http://homeassistant.local:8123`.
    #[must_use]
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    /// Identifier of the price sensor entity, e.g.
    /// `sensor.electricity_price`.
    #[must_use]
    pub fn entity_id(mut self, value: impl Into<String>) -> Self {
        self.entity_id = Some(value.into());
        self
    }

    /// Inject a preconfigured `reqwest::Client` (auth headers, timeouts).
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Validate the configuration and construct the source.
    ///
    /// # Errors
    /// Returns `SpotwattError::Config` when `base_url` or `entity_id` is
    /// missing, empty, or (for the URL) unparseable.
    pub fn build(self) -> Result<HomeAssistantSource, SpotwattError> {
        let base_url = self
            .base_url
            .filter(|v| !v.trim().is_empty())
            .ok_or(SpotwattError::config("base_url"))?;
        let entity_id = self
            .entity_id
            .filter(|v| !v.trim().is_empty())
            .ok_or(SpotwattError::config("entity_id"))?;

        let mut base = Url::parse(&base_url).map_err(|_| SpotwattError::config("base_url"))?;
        // Url::join treats the last path segment as a file; anchor it so the
        // history path appends instead of replacing.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            entity = %entity_id,
            "Home Assistant usually keeps a rolling history window; ranges older than the retention period cannot be reconstructed"
        );

        Ok(HomeAssistantSource::new(
            self.client.unwrap_or_default(),
            base,
            entity_id,
        ))
    }
}
