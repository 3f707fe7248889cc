//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::RollError;

/// How a column's progress is turned into a step index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// `floor(progress * sample_resolution)` samples spread over the fixed
    /// 10-step grid, so every moving column lands at full progress. Columns
    /// needing more than ten transitions skip digits.
    #[default]
    Grid,
    /// `step = floor(progress * total_steps)`: one step per digit on the wheel.
    PerColumn,
}

/// Timing and sampling knobs. Every field has a default, so partial JSON works.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Duration of column 0.
    pub base_duration_ms: f32,
    /// Added to the duration per column index.
    pub per_column_increment_ms: f32,
    /// Added to the start delay per column index.
    pub per_column_delay_ms: f32,
    /// Sub-steps per unit of progress in [`Sampling::Grid`].
    pub sample_resolution: u32,
    pub sampling: Sampling,
    /// Redraw notifications closer together than this are coalesced.
    pub min_redraw_interval_ms: f32,
    /// Vanishing columns reach zero visibility at `1 / vanish_fade_multiplier` progress.
    pub vanish_fade_multiplier: f32,
    pub easing: Easing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_duration_ms: 600.0,
            per_column_increment_ms: 100.0,
            per_column_delay_ms: 0.0,
            sample_resolution: 10,
            sampling: Sampling::Grid,
            min_redraw_interval_ms: 16.0,
            vanish_fade_multiplier: 1.5,
            easing: Easing::STANDARD,
        }
    }
}

fn non_negative(name: &str, v: f32) -> Result<(), RollError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(RollError::InvalidConfig {
            reason: format!("{name} must be finite and >= 0, got {v}"),
        })
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, RollError> {
        let cfg: Config = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), RollError> {
        non_negative("base_duration_ms", self.base_duration_ms)?;
        non_negative("per_column_increment_ms", self.per_column_increment_ms)?;
        non_negative("per_column_delay_ms", self.per_column_delay_ms)?;
        non_negative("min_redraw_interval_ms", self.min_redraw_interval_ms)?;
        if self.sample_resolution == 0 {
            return Err(RollError::InvalidConfig {
                reason: "sample_resolution must be >= 1".into(),
            });
        }
        if !(self.vanish_fade_multiplier.is_finite() && self.vanish_fade_multiplier > 0.0) {
            return Err(RollError::InvalidConfig {
                reason: format!(
                    "vanish_fade_multiplier must be finite and > 0, got {}",
                    self.vanish_fade_multiplier
                ),
            });
        }
        if !self.easing.is_valid() {
            return Err(RollError::InvalidConfig {
                reason: format!("easing {:?} has control points outside [0,1]", self.easing),
            });
        }
        Ok(())
    }
}
