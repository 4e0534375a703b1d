//! Compounding and discounting coefficient sequences
//!
//! The DCF projection is a pairwise product of two per-year sequences:
//! cumulative growth coefficients from the schedule (amplified by share
//! buybacks) and geometric present-value discount factors.

use crate::subject::GrowthSchedule;

/// Cumulative growth coefficients for years 1..=growth_period
///
/// The coefficient at year t is the running product of `(1 + r) * b`
/// across the expanded schedule, where `b = 1 / (1 - buyback_rate)` is the
/// constant per-year buyback multiplier. Callers validate
/// `buyback_rate < 1` before reaching this point.
pub fn growth_coefficients(schedule: &GrowthSchedule, buyback_rate: f64) -> Vec<f64> {
    let buyback_growth = 1.0 / (1.0 - buyback_rate);

    let mut cumulative = 1.0;
    schedule
        .rates()
        .map(|rate| {
            cumulative *= (1.0 + rate) * buyback_growth;
            cumulative
        })
        .collect()
}

/// Present-value discount factors for years 1..=years
///
/// The factor at year t is `(1 / (1 + d))^t`: strictly decreasing and
/// bounded in (0, 1] for `d > 0`. Callers validate `d > -1`.
pub fn discount_factors(discount_rate: f64, years: u32) -> Vec<f64> {
    let factor = 1.0 / (1.0 + discount_rate);
    (1..=years as i32).map(|t| factor.powi(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_growth_coefficients_compound() {
        let schedule = GrowthSchedule::new([(0.10, 2), (0.05, 1)]);
        let coeffs = growth_coefficients(&schedule, 0.0);

        assert_eq!(coeffs.len(), 3);
        assert_relative_eq!(coeffs[0], 1.10, max_relative = 1e-12);
        assert_relative_eq!(coeffs[1], 1.21, max_relative = 1e-12);
        assert_relative_eq!(coeffs[2], 1.2705, max_relative = 1e-12);
    }

    #[test]
    fn test_buyback_amplifies_growth() {
        let schedule = GrowthSchedule::new([(0.10, 3)]);
        let plain = growth_coefficients(&schedule, 0.0);
        let with_buyback = growth_coefficients(&schedule, 0.02);

        for (p, b) in plain.iter().zip(&with_buyback) {
            assert!(b > p);
        }
        // Year 1: 1.10 / 0.98
        assert_relative_eq!(with_buyback[0], 1.10 / 0.98, max_relative = 1e-12);
    }

    #[test]
    fn test_discount_factors_strictly_decreasing_in_unit_interval() {
        for d in [0.01, 0.066, 0.10, 0.50] {
            let factors = discount_factors(d, 20);
            assert_eq!(factors.len(), 20);

            let mut prev = 1.0;
            for &f in &factors {
                assert!(f > 0.0 && f <= 1.0);
                assert!(f < prev);
                prev = f;
            }
        }
    }

    #[test]
    fn test_zero_rate_discounts_nothing() {
        let factors = discount_factors(0.0, 5);
        assert!(factors.iter().all(|&f| f == 1.0));
    }

    #[test]
    fn test_empty_schedule_produces_empty_sequences() {
        let schedule = GrowthSchedule::new([(0.15, 0)]);
        assert!(growth_coefficients(&schedule, 0.0).is_empty());
        assert!(discount_factors(0.10, 0).is_empty());
    }
}
