//! Period-over-period growth
//!
//! Converts a (current, previous) pair into a percentage magnitude plus a
//! direction flag, ready for a colour-coded `+12.34%` style indicator.

use serde::{Deserialize, Serialize};

/// Magnitude reported when the previous period is zero
pub const ZERO_BASE_MAGNITUDE: f64 = 100.0;

/// Growth between two periods.
///
/// `magnitude_percent` is never negative; the direction is carried in
/// `is_positive` alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GrowthResult {
    pub magnitude_percent: f64,
    pub is_positive: bool,
}

impl GrowthResult {
    /// Sign character shown in front of the magnitude
    pub fn sign(&self) -> char {
        if self.is_positive {
            '+'
        } else {
            '-'
        }
    }

    /// Signed growth value (negative when `is_positive` is false)
    pub fn signed_percent(&self) -> f64 {
        if self.is_positive {
            self.magnitude_percent
        } else {
            -self.magnitude_percent
        }
    }
}

impl std::fmt::Display for GrowthResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:.2}%", self.sign(), self.magnitude_percent)
    }
}

/// Compute growth of `current` relative to `previous`.
///
/// A zero `previous` has no defined percentage; it reports a fixed 100%
/// magnitude, positive only when `current` is strictly positive. Otherwise
/// the magnitude is `|(current - previous) / previous * 100|` rounded to two
/// decimals and zero growth counts as positive.
///
/// Non-finite inputs are treated as zero.
pub fn compute_growth(current: f64, previous: f64) -> GrowthResult {
    let current = finite_or_zero(current);
    let previous = finite_or_zero(previous);

    if previous == 0.0 {
        return GrowthResult {
            magnitude_percent: ZERO_BASE_MAGNITUDE,
            is_positive: current > 0.0,
        };
    }

    let raw = (current - previous) / previous * 100.0;
    GrowthResult {
        magnitude_percent: round2(raw.abs()),
        is_positive: raw >= 0.0,
    }
}

/// Round to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Past 2^52 there is no fractional part left to round.
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round() / 100.0
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth(magnitude_percent: f64, is_positive: bool) -> GrowthResult {
        GrowthResult {
            magnitude_percent,
            is_positive,
        }
    }

    #[test]
    fn test_zero_previous() {
        assert_eq!(compute_growth(0.0, 0.0), growth(100.0, false));
        assert_eq!(compute_growth(50.0, 0.0), growth(100.0, true));
        assert_eq!(compute_growth(-5.0, 0.0), growth(100.0, false));
    }

    #[test]
    fn test_general_case() {
        assert_eq!(compute_growth(150.0, 100.0), growth(50.0, true));
        assert_eq!(compute_growth(50.0, 100.0), growth(50.0, false));
        assert_eq!(compute_growth(100.0, 100.0), growth(0.0, true));
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 185000 vs 165000 = 12.1212...%
        assert_eq!(compute_growth(185_000.0, 165_000.0), growth(12.12, true));
        // 89 vs 78 = 14.1025...%
        assert_eq!(compute_growth(89.0, 78.0), growth(14.10, true));
        // 45 vs 38 = 18.4210...%
        assert_eq!(compute_growth(45.0, 38.0), growth(18.42, true));
        // 76 vs 65 = 16.9230...%
        assert_eq!(compute_growth(76.0, 65.0), growth(16.92, true));
        // 2 vs 3 = -33.333...%
        assert_eq!(compute_growth(2.0, 3.0), growth(33.33, false));
    }

    #[test]
    fn test_negative_inputs_accepted() {
        // (-50 - -100) / -100 * 100 = -50%
        assert_eq!(compute_growth(-50.0, -100.0), growth(50.0, false));
        // (10 - -10) / -10 * 100 = -200%
        assert_eq!(compute_growth(10.0, -10.0), growth(200.0, false));
        // (-150 - -100) / -100 * 100 = 50%
        assert_eq!(compute_growth(-150.0, -100.0), growth(50.0, true));
    }

    #[test]
    fn test_magnitude_matches_formula() {
        let pairs = [
            (1.0, 7.0),
            (123.45, 67.89),
            (0.0, 12.0),
            (99.0, 100.0),
            (1_000_000.0, 3.0),
            (-20.0, 40.0),
        ];

        for (current, previous) in pairs {
            let result = compute_growth(current, previous);
            let raw = (current - previous) / previous * 100.0;
            assert!(result.magnitude_percent >= 0.0);
            assert!((result.magnitude_percent - raw.abs()).abs() <= 0.005 + 1e-9);
            assert_eq!(result.is_positive, raw >= 0.0);
        }
    }

    #[test]
    fn test_idempotent() {
        let first = compute_growth(185_000.0, 165_000.0);
        let second = compute_growth(185_000.0, 165_000.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_finite_inputs_read_as_zero() {
        assert_eq!(compute_growth(f64::NAN, 100.0), growth(100.0, false));
        assert_eq!(compute_growth(50.0, f64::NAN), growth(100.0, true));
        assert_eq!(compute_growth(f64::INFINITY, f64::NEG_INFINITY), growth(100.0, false));
    }

    #[test]
    fn test_display() {
        assert_eq!(compute_growth(185_000.0, 165_000.0).to_string(), "+12.12%");
        assert_eq!(compute_growth(50.0, 100.0).to_string(), "-50.00%");
        assert_eq!(compute_growth(0.0, 0.0).to_string(), "-100.00%");
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(compute_growth(50.0, 100.0).signed_percent(), -50.0);
        assert_eq!(compute_growth(150.0, 100.0).signed_percent(), 50.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.121_212), 12.12);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(1e300), 1e300);
        assert!(round2(f64::INFINITY).is_infinite());
    }
}
