//! Digit and number-string value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RollError;

/// A single decimal digit, 0..=9.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);
    pub const NINE: Digit = Digit(9);

    #[inline]
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Reduce any integer onto the wheel (modulo 10, always non-negative).
    #[inline]
    pub fn wrapping(n: i64) -> Self {
        Self(n.rem_euclid(10) as u8)
    }

    /// Turn the wheel down by `steps` positions, wrapping 0 → 9.
    #[inline]
    pub fn down(self, steps: u32) -> Self {
        Self::wrapping(i64::from(self.0) - i64::from(steps))
    }

    #[inline]
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

/// A `u8` outside 0..=9 offered as a digit.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a decimal digit")]
pub struct DigitOutOfRange(pub u8);

impl TryFrom<u8> for Digit {
    type Error = DigitOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(DigitOutOfRange(value))
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-empty string of ASCII decimal digits, stored verbatim.
///
/// Leading zeros are preserved; no sign or separators are accepted.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberInput(String);

impl NumberInput {
    pub fn parse(input: &str) -> Result<Self, RollError> {
        if input.is_empty() {
            return Err(RollError::EmptyInput);
        }
        let bad = input.chars().enumerate().find(|(_, c)| !c.is_ascii_digit());
        if let Some((position, found)) = bad {
            return Err(RollError::InvalidDigitString {
                input: input.to_string(),
                position,
                found,
            });
        }
        Ok(Self(input.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digits(&self) -> Vec<Digit> {
        // Validated on construction, so nothing is filtered out.
        self.0.chars().filter_map(Digit::from_char).collect()
    }

    /// Digits left-padded with zeros to `width`. Never truncates.
    pub fn padded(&self, width: usize) -> Vec<Digit> {
        let pad = width.saturating_sub(self.len());
        let mut out = Vec::with_capacity(pad + self.len());
        out.resize(pad, Digit::ZERO);
        out.extend(self.digits());
        out
    }
}

impl FromStr for NumberInput {
    type Err = RollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NumberInput {
    type Error = RollError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NumberInput> for String {
    fn from(n: NumberInput) -> String {
        n.0
    }
}

impl fmt::Display for NumberInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render a digit slice back into its string form.
pub fn digits_to_string(digits: &[Digit]) -> String {
    digits.iter().map(|d| d.as_char()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_bounds() {
        assert_eq!(Digit::new(9).map(Digit::value), Some(9));
        assert!(Digit::new(10).is_none());
        assert_eq!(Digit::from_char('7').map(Digit::value), Some(7));
        assert!(Digit::from_char('x').is_none());
    }

    #[test]
    fn wheel_wraps_downward() {
        let three = Digit::new(3).unwrap();
        assert_eq!(three.down(3), Digit::ZERO);
        assert_eq!(three.down(4), Digit::NINE);
        assert_eq!(three.down(13), three);
        assert_eq!(Digit::wrapping(-1), Digit::NINE);
    }

    #[test]
    fn parse_rejects_non_digits() {
        let err = NumberInput::parse("12a4").unwrap_err();
        assert_eq!(
            err,
            RollError::InvalidDigitString {
                input: "12a4".into(),
                position: 2,
                found: 'a',
            }
        );
        assert!(NumberInput::parse("-1").is_err());
        assert!(NumberInput::parse("1,000").is_err());
        assert!(NumberInput::parse("١٢").is_err());
        assert_eq!(NumberInput::parse(""), Err(RollError::EmptyInput));
    }

    #[test]
    fn padding_keeps_leading_zeros() {
        let n: NumberInput = "9".parse().unwrap();
        assert_eq!(digits_to_string(&n.padded(3)), "009");
        let z: NumberInput = "007".parse().unwrap();
        assert_eq!(z.as_str(), "007");
        assert_eq!(digits_to_string(&z.padded(2)), "007");
    }

    #[test]
    fn serde_validates() {
        let ok: NumberInput = serde_json::from_str("\"123\"").unwrap();
        assert_eq!(ok.len(), 3);
        assert!(serde_json::from_str::<NumberInput>("\"12x\"").is_err());
        assert!(serde_json::from_str::<Digit>("12").is_err());
    }
}
