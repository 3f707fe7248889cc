//! Per-column roll plans.
//!
//! A column always turns downward. From `start` it counts to 0, wraps to 9 and
//! keeps counting down until it reaches `end`. Two lookups are offered:
//! - [`ColumnPlan::value_at`]: the wheel walked one digit per step over the
//!   column's own `total_steps`.
//! - [`ColumnPlan::grid_value_at`]: the two-regime formula sampled on the
//!   fixed 10-step grid, where every moving column lands at step 10.

use serde::{Deserialize, Serialize};

use crate::digits::Digit;

/// Steps on the fixed sampling grid at which `grid_value_at` lands.
pub const GRID_STEPS: u32 = 10;

/// Digit shown in the foreground and the one about to roll in beneath it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitPair {
    pub current: Digit,
    pub next: Digit,
}

impl DigitPair {
    #[inline]
    pub fn settled(d: Digit) -> Self {
        Self { current: d, next: d }
    }

    #[inline]
    pub fn is_settled(&self) -> bool {
        self.current == self.next
    }
}

/// Fixed roll sequence for one column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPlan {
    start: Digit,
    end: Digit,
    total_steps: u32,
}

/// Steps to roll `start` down through 0, wrap to 9 and land on `end`.
/// Zero when the digits already match.
#[inline]
pub fn total_steps(start: Digit, end: Digit) -> u32 {
    if start == end {
        0
    } else {
        u32::from(start.value()) + u32::from(9 - end.value()) + 1
    }
}

impl ColumnPlan {
    pub fn new(start: Digit, end: Digit) -> Self {
        Self {
            start,
            end,
            total_steps: total_steps(start, end),
        }
    }

    #[inline]
    pub fn start(&self) -> Digit {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Digit {
        self.end
    }

    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Columns whose digits already match never roll.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.total_steps == 0
    }

    /// Whether the wheel rests on `end` after `step` decrements.
    #[inline]
    pub fn landed_at(&self, step: u32) -> bool {
        step >= self.total_steps
    }

    /// Wheel position after `step` single-digit decrements.
    ///
    /// `step >= total_steps` reports the landed pair `(end, end)`.
    pub fn value_at(&self, step: u32) -> DigitPair {
        if self.landed_at(step) {
            return DigitPair::settled(self.end);
        }
        DigitPair {
            current: self.start.down(step),
            next: self.start.down(step + 1),
        }
    }

    /// Reference sampling on the fixed grid.
    ///
    /// Descending phase (`step <= start`) counts straight down to 0. The wrap
    /// phase then continues from `span = 9 + end - start`, clamped at `end`
    /// and reduced modulo 10 when `start < end`. Once the wrap phase reaches
    /// `end` the pair is landed and stays `(end, end)`.
    pub fn grid_value_at(&self, step: u32) -> DigitPair {
        if self.grid_landed_at(step) {
            return DigitPair::settled(self.end);
        }
        DigitPair {
            current: self.grid_digit(step),
            next: self.grid_digit(step.saturating_add(1)),
        }
    }

    /// Whether the grid lookup rests on `end` at `step`.
    ///
    /// Only the wrap phase can land. A pair with `current == next` earlier in
    /// the roll (`end == start + 1` at step `start`) is still moving.
    pub fn grid_landed_at(&self, step: u32) -> bool {
        self.is_static()
            || (step > u32::from(self.start.value()) && self.grid_digit(step) == self.end)
    }

    fn grid_digit(&self, step: u32) -> Digit {
        let s = i64::from(self.start.value());
        let e = i64::from(self.end.value());
        let step = i64::from(step);
        if step <= s {
            return Digit::wrapping(s - step);
        }
        let span = 9 + e - s;
        let n = (span - (step - s - 1)).max(e);
        Digit::wrapping(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: u8) -> Digit {
        Digit::new(v).unwrap()
    }

    fn currents(plan: &ColumnPlan, steps: std::ops::RangeInclusive<u32>, grid: bool) -> Vec<u8> {
        steps
            .map(|s| {
                if grid {
                    plan.grid_value_at(s).current.value()
                } else {
                    plan.value_at(s).current.value()
                }
            })
            .collect()
    }

    #[test]
    fn wheel_from_nine_to_two() {
        let plan = ColumnPlan::new(d(9), d(2));
        assert_eq!(plan.total_steps(), 17);
        assert_eq!(
            currents(&plan, 0..=17, false),
            vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 9, 8, 7, 6, 5, 4, 3, 2]
        );
        assert_eq!(plan.value_at(16).next, d(2));
        assert!(plan.value_at(17).is_settled());
    }

    #[test]
    fn grid_from_nine_to_two_lands_on_ten() {
        let plan = ColumnPlan::new(d(9), d(2));
        assert_eq!(
            currents(&plan, 0..=12, true),
            vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 2, 2, 2]
        );
        // At 0 the next digit is the wrap-phase entry point.
        assert_eq!(plan.grid_value_at(9).next, d(2));
        assert_eq!(plan.grid_value_at(10), DigitPair::settled(d(2)));
    }

    #[test]
    fn grid_rising_digit_wraps_twice() {
        // 1 -> 3: down to 0, enter at (9 + 3 - 1) % 10 = 1, down through 0, 9..3.
        let plan = ColumnPlan::new(d(1), d(3));
        assert_eq!(
            currents(&plan, 0..=10, true),
            vec![1, 0, 1, 0, 9, 8, 7, 6, 5, 4, 3]
        );
        assert_eq!(plan.grid_value_at(9).next, d(3));
        assert!(plan.grid_value_at(10).is_settled());
        assert_eq!(plan.grid_value_at(14), DigitPair::settled(d(3)));
    }

    #[test]
    fn descending_phase_does_not_land_early() {
        // 5 -> 3 passes 3 on the way down; it only lands after wrapping.
        let plan = ColumnPlan::new(d(5), d(3));
        let early = plan.grid_value_at(2);
        assert_eq!(early.current, d(3));
        assert_eq!(early.next, d(2));
        let wheel = plan.value_at(2);
        assert_eq!(wheel.current, d(3));
        assert_eq!(wheel.next, d(2));
    }

    #[test]
    fn grid_rising_by_one_passes_a_repeated_zero() {
        // 1 -> 2 reaches 0 at step 1 and re-enters the wrap phase at 0.
        let plan = ColumnPlan::new(d(1), d(2));
        let pair = plan.grid_value_at(1);
        assert_eq!(pair, DigitPair::settled(d(0)));
        assert!(!plan.grid_landed_at(1));
        assert!(!plan.grid_landed_at(9));
        assert!(plan.grid_landed_at(10));
        assert!(!plan.landed_at(8));
        assert!(plan.landed_at(plan.total_steps()));
    }

    #[test]
    fn static_column() {
        let plan = ColumnPlan::new(d(4), d(4));
        assert!(plan.is_static());
        assert_eq!(plan.total_steps(), 0);
        for step in 0..=12 {
            assert_eq!(plan.value_at(step), DigitPair::settled(d(4)));
            assert_eq!(plan.grid_value_at(step), DigitPair::settled(d(4)));
        }
    }
}
