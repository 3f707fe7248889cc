//! Per-column schedules on the run clock.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// When a column starts rolling and how long it takes, in run milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnTiming {
    pub delay_ms: f32,
    pub duration_ms: f32,
}

impl ColumnTiming {
    /// Column 0 is the most significant; higher indices run longer and so the
    /// least significant column settles last.
    pub fn for_column(cfg: &Config, index: usize) -> Self {
        let i = index as f32;
        Self {
            delay_ms: cfg.per_column_delay_ms * i,
            duration_ms: cfg.base_duration_ms + cfg.per_column_increment_ms * i,
        }
    }

    #[inline]
    pub fn end_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms
    }

    /// Linear (un-eased) progress in [0,1] at `elapsed_ms` on the run clock.
    pub fn linear_progress(&self, elapsed_ms: f32) -> f32 {
        let local = elapsed_ms - self.delay_ms;
        if local <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 || local >= self.duration_ms {
            return 1.0;
        }
        local / self.duration_ms
    }

    #[inline]
    pub fn is_finished(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.end_ms()
    }
}

/// Latest end time over a set of column schedules.
pub fn settle_ms<'a>(timings: impl IntoIterator<Item = &'a ColumnTiming>) -> f32 {
    timings
        .into_iter()
        .map(ColumnTiming::end_ms)
        .fold(0.0, f32::max)
}
