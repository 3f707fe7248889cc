//! Error types for the roll engine

use serde::{Deserialize, Serialize};

/// Errors surfaced by validation at the public boundary.
///
/// Nothing here is ever raised mid-run: once a run has started, every
/// computation is total over digits 0..=9 and progress in [0, 1].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RollError {
    /// Input contains a character outside `0`-`9`
    #[error("invalid digit string {input:?}: {found:?} at position {position} is not a decimal digit")]
    InvalidDigitString {
        input: String,
        position: usize,
        found: char,
    },

    /// Number input is empty or unset
    #[error("number input is empty")]
    EmptyInput,

    /// Configuration value out of its documented domain
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Configuration could not be parsed
    #[error("config parse error: {reason}")]
    ConfigParse { reason: String },
}

impl RollError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidDigitString { .. } | Self::EmptyInput => "input",
            Self::InvalidConfig { .. } | Self::ConfigParse { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for RollError {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigParse {
            reason: err.to_string(),
        }
    }
}
