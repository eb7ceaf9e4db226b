//! Deviation guard applied when a candidate is about to be committed.
//!
//! A candidate is accepted when it lies within `max_down_percent` below and
//! `max_up_percent` above the committed reference value, using truncating
//! integer percentages. A reference at or below `cutoff` (which includes the
//! zero value before the first commit) disables the guard.

use soroban_sdk::contracttype;

use crate::config::{
    DEFAULT_BOUNDS_CUTOFF, DEFAULT_MAX_DOWN_PERCENT, DEFAULT_MAX_UP_PERCENT, MAX_PERCENT,
};
use crate::error::OracleError;

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Bounds {
    pub max_up_percent: u32,
    pub max_down_percent: u32,
    pub cutoff: u128,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            max_up_percent: DEFAULT_MAX_UP_PERCENT,
            max_down_percent: DEFAULT_MAX_DOWN_PERCENT,
            cutoff: DEFAULT_BOUNDS_CUTOFF,
        }
    }
}

impl Bounds {
    /// Accept or reject `candidate` against the previously committed `reference`.
    pub fn check(&self, candidate: u128, reference: u128) -> Result<(), OracleError> {
        if reference <= self.cutoff {
            return Ok(());
        }

        if candidate < self.lower_limit(reference) || candidate > self.upper_limit(reference) {
            return Err(OracleError::BoundsViolation);
        }

        Ok(())
    }

    /// Smallest value accepted against `reference`.
    pub fn lower_limit(&self, reference: u128) -> u128 {
        scale_percent(reference, MAX_PERCENT.saturating_sub(self.max_down_percent))
    }

    /// Largest value accepted against `reference`, saturating at `u128::MAX`.
    pub fn upper_limit(&self, reference: u128) -> u128 {
        scale_percent(reference, MAX_PERCENT + self.max_up_percent)
    }
}

/// Reject a percentage limit outside `0..=100`.
pub fn validate_percent(percent: u32) -> Result<u32, OracleError> {
    if percent > MAX_PERCENT {
        return Err(OracleError::InvalidParameter);
    }
    Ok(percent)
}

/// `floor(value * percent / 100)` without the intermediate product.
///
/// With `value = 100q + r` the result is `q * percent + floor(r * percent / 100)`,
/// so only the first term can overflow and it saturates.
fn scale_percent(value: u128, percent: u32) -> u128 {
    let percent = percent as u128;
    let whole = (value / 100).saturating_mul(percent);
    let rest = (value % 100) * percent / 100;
    whole.saturating_add(rest)
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    const E18: u128 = 1_000_000_000_000_000_000;

    fn bounds(up: u32, down: u32, cutoff: u128) -> Bounds {
        Bounds {
            max_up_percent: up,
            max_down_percent: down,
            cutoff,
        }
    }

    #[test]
    fn test_default_bounds_reject_large_moves() {
        let b = Bounds::default();
        assert_eq!(b.check(E18 / 10, E18), Err(OracleError::BoundsViolation));
        assert_eq!(b.check(E18 * 19 / 10, E18), Err(OracleError::BoundsViolation));
        assert_eq!(b.check(E18 * 15 / 10, E18), Err(OracleError::BoundsViolation));
        assert_eq!(b.check(E18 + E18 / 10, E18), Ok(()));
        assert_eq!(b.check(E18 + E18 / 10 + 1, E18), Err(OracleError::BoundsViolation));
        assert_eq!(b.check(E18 - E18 / 10, E18), Ok(()));
        assert_eq!(b.check(E18 - E18 / 10 - 1, E18), Err(OracleError::BoundsViolation));
    }

    #[test]
    fn test_zero_reference_always_accepts() {
        let b = Bounds::default();
        assert_eq!(b.check(u128::MAX, 0), Ok(()));
        assert_eq!(b.check(0, 0), Ok(()));
    }

    #[test]
    fn test_cutoff_disables_guard() {
        let b = bounds(0, 0, E18);
        assert_eq!(b.check(E18 * 1000, E18), Ok(()));

        let b = bounds(0, 0, E18 - 1);
        assert_eq!(b.check(E18 * 1000, E18), Err(OracleError::BoundsViolation));
        assert_eq!(b.check(E18, E18), Ok(()));
    }

    #[test]
    fn test_max_down_95_percent() {
        let b = bounds(50, 95, 0);
        assert_eq!(b.lower_limit(E18), 5 * E18 / 100);
        assert_eq!(b.check(E18 / 10, E18), Ok(()));
        assert_eq!(b.check(5 * E18 / 100, E18), Ok(()));
        assert_eq!(b.check(5 * E18 / 100 - 1, E18), Err(OracleError::BoundsViolation));
    }

    #[test]
    fn test_max_down_100_percent_allows_zero() {
        let b = bounds(50, 100, 0);
        assert_eq!(b.lower_limit(E18), 0);
        assert_eq!(b.check(0, E18), Ok(()));
        assert_eq!(b.check(1, E18), Ok(()));
    }

    #[test]
    fn test_truncating_division() {
        // 199 * 150 / 100 = 298.5 -> 298
        let b = bounds(50, 50, 0);
        assert_eq!(b.upper_limit(199), 298);
        assert_eq!(b.check(298, 199), Ok(()));
        assert_eq!(b.check(299, 199), Err(OracleError::BoundsViolation));
        // 199 * 50 / 100 = 99.5 -> 99
        assert_eq!(b.lower_limit(199), 99);
        assert_eq!(b.check(99, 199), Ok(()));
        assert_eq!(b.check(98, 199), Err(OracleError::BoundsViolation));
    }

    #[test]
    fn test_upper_limit_saturates() {
        let b = bounds(100, 0, 0);
        assert_eq!(b.upper_limit(u128::MAX), u128::MAX);
        assert_eq!(b.check(u128::MAX, u128::MAX / 2 + 1), Ok(()));
        assert_eq!(b.lower_limit(u128::MAX), u128::MAX);
    }

    #[test]
    fn test_validate_percent() {
        assert_eq!(validate_percent(0), Ok(0));
        assert_eq!(validate_percent(100), Ok(100));
        assert_eq!(validate_percent(101), Err(OracleError::InvalidParameter));
        assert_eq!(validate_percent(110), Err(OracleError::InvalidParameter));
    }

    proptest! {
        #[test]
        fn prop_check_matches_direct_formula(
            reference in 1u128..1_000_000_000_000_000_000_000_000_000_000,
            candidate in 0u128..3_000_000_000_000_000_000_000_000_000_000,
            up in 0u32..=100,
            down in 0u32..=100,
        ) {
            let b = bounds(up, down, 0);
            let lower = reference * (100 - down) as u128 / 100;
            let upper = reference * (100 + up) as u128 / 100;
            let expected = lower <= candidate && candidate <= upper;
            prop_assert_eq!(b.check(candidate, reference).is_ok(), expected);
        }

        #[test]
        fn prop_reference_at_or_below_cutoff_accepts(
            cutoff in any::<u128>(),
            candidate in any::<u128>(),
            up in 0u32..=100,
            down in 0u32..=100,
        ) {
            let b = bounds(up, down, cutoff);
            prop_assert_eq!(b.check(candidate, cutoff), Ok(()));
            prop_assert_eq!(b.check(candidate, cutoff / 2), Ok(()));
        }
    }
}
