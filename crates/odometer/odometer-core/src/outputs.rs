//! Output contracts from the roll engine.
//!
//! Renderers read [`ColumnState`] snapshots; drivers and adapters consume the
//! [`RollEvent`]s collected in [`Outputs`].

use serde::{Deserialize, Serialize};

use crate::digits::Digit;
use crate::ids::RunId;

/// What a renderer draws for one column on one frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnState {
    pub current_digit: Digit,
    /// Digit one row away, about to roll into place.
    pub next_digit: Digit,
    /// Fraction of the current step already scrolled, in [0,1).
    pub sub_offset: f32,
    /// 1.0 for normal columns; fades toward 0 for vanishing ones.
    pub visibility: f32,
}

impl ColumnState {
    pub fn resting(d: Digit) -> Self {
        Self {
            current_digit: d,
            next_digit: d,
            sub_offset: 0.0,
            visibility: 1.0,
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility > 0.0
    }

    /// Whether a second digit needs drawing this frame.
    #[inline]
    pub fn is_rolling(&self) -> bool {
        self.current_digit != self.next_digit
    }
}

/// Signals for the renderer/driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum RollEvent {
    /// Column states changed; redraw.
    Invalidate,
    AnimationStarted { run: RunId, columns: usize },
    AnimationEnd { run: RunId },
    AnimationStopped { run: RunId },
}

/// Outputs returned by RollEngine::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<RollEvent>,
    #[serde(default)]
    pub animating: bool,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
        self.animating = false;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn invalidated(&self) -> bool {
        self.events.iter().any(|e| matches!(e, RollEvent::Invalidate))
    }

    pub fn ended(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, RollEvent::AnimationEnd { .. }))
    }
}
