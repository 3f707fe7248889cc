//! Odometer core (renderer-agnostic)
//!
//! Computes the digit-roll transition between two decimal numbers: every
//! column scrolls downward through intermediate digits, wrapping 0 → 9, until
//! it lands on its target. Renderers pull [`ColumnState`] snapshots from a
//! [`RollEngine`] once per frame; drivers feed it time (or per-column
//! progress) and receive [`RollEvent`]s back.

pub mod config;
pub mod digits;
pub mod easing;
pub mod engine;
pub mod error;
pub mod ids;
pub mod outputs;
pub mod plan;
pub mod timing;

// Re-exports for consumers (adapters)
pub use config::{Config, Sampling};
pub use digits::{Digit, NumberInput};
pub use easing::Easing;
pub use engine::{Column, RollEngine, RunState};
pub use error::RollError;
pub use ids::{RunAllocator, RunId};
pub use outputs::{ColumnState, Outputs, RollEvent};
pub use plan::{ColumnPlan, DigitPair};
pub use timing::ColumnTiming;

/// Result alias for fallible odometer operations.
pub type Result<T> = core::result::Result<T, RollError>;
