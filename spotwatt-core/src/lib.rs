//! spotwatt-core
//!
//! Core types, traits, and series utilities shared across the spotwatt
//! ecosystem.
//!
//! - `types`: observation and price-interval data structures.
//! - `provider`: the `PriceSource` trait implemented by every price source.
//! - `series`: completeness validation and gap-filling interval
//!   reconstruction.
//!
//! Reconstruction is deliberately conservative: a missing reading is filled
//! from the most recent known-good value, or, for a leading gap, from the
//! single next observation. A gap neither policy can fill fails the whole
//! requested range rather than producing a fabricated or partial series.
#![warn(missing_docs)]

/// Unified error type for the spotwatt workspace.
pub mod error;
/// The `PriceSource` capability trait implemented by price providers.
pub mod provider;
/// Completeness validation and interval reconstruction over observations.
pub mod series;
pub mod types;

pub use error::SpotwattError;
pub use provider::PriceSource;
pub use series::{reconstruct_intervals, validate_history};
pub use types::{Observation, ObservationState, PriceInterval};
