use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::SpotwattError;
use crate::types::PriceInterval;

/// Capability trait implemented by every price source.
///
/// A source resolves a half-open time range `[from, to)` into a gapless,
/// ordered sequence of priced intervals, or fails with a descriptive error.
/// Implementations are selected at process start by configuration and shared
/// as `Arc<dyn PriceSource>`; the contract is a strategy object, not a base
/// class.
///
/// Each call is an independent unit of work: one network fetch followed by
/// synchronous validation and reconstruction. Implementations hold no
/// per-call state, so concurrent calls need no coordination, and a call is
/// idempotent against an unchanging upstream data set.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Stable identifier used in logs and error tagging (e.g. "home-assistant").
    fn name(&self) -> &'static str;

    /// Fetch and reconstruct priced intervals exactly tiling `[from, to)`.
    ///
    /// `from < to` is the caller's precondition.
    ///
    /// # Errors
    /// Fails with [`SpotwattError`] when the fetch, deserialization,
    /// completeness validation, or interval reconstruction fails. There is
    /// no partial success; callers never receive a partially tiled range.
    async fn price_data(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<PriceInterval>, SpotwattError>;
}
