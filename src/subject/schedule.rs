//! Piecewise growth-rate schedules

use serde::{Deserialize, Serialize};

use crate::market::round_rate;

/// One stage of a growth schedule: a rate held for a number of years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSegment {
    /// Annual growth rate during this stage
    pub rate: f64,

    /// Number of years the rate applies
    pub years: u32,
}

/// Ordered multi-stage growth schedule
///
/// Segments apply in order; the growth period is the sum of their years.
/// Rates are rounded to 3 decimals at construction so repeated evaluations
/// compound identical inputs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthSchedule {
    segments: Vec<GrowthSegment>,
}

impl GrowthSchedule {
    /// Build a schedule from (rate, years) stages, in order
    pub fn new(segments: impl IntoIterator<Item = (f64, u32)>) -> Self {
        Self {
            segments: segments
                .into_iter()
                .map(|(rate, years)| GrowthSegment {
                    rate: round_rate(rate),
                    years,
                })
                .collect(),
        }
    }

    /// Standard three-stage schedule from a near-term growth estimate
    ///
    /// Five years at the estimate, five at half, ten at a quarter — the
    /// shape used when a provider supplies a single "next 5 years" figure.
    pub fn from_near_term_rate(rate: f64) -> Self {
        Self::new([(rate, 5), (rate / 2.0, 5), (rate / 4.0, 10)])
    }

    /// The schedule's stages, in order
    pub fn segments(&self) -> &[GrowthSegment] {
        &self.segments
    }

    /// Total projection horizon in years
    pub fn growth_period(&self) -> u32 {
        self.segments.iter().map(|s| s.years).sum()
    }

    /// Expand to one rate per projected year
    ///
    /// years₁ copies of rate₁, then years₂ of rate₂, and so on. Lazy and
    /// restartable; a zero-year segment contributes nothing. An all-zero
    /// schedule expands to an empty sequence, which downstream evaluators
    /// treat as a present value of 0.
    pub fn rates(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments
            .iter()
            .flat_map(|s| std::iter::repeat(s.rate).take(s.years as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_expansion_length_matches_growth_period() {
        let schedules = [
            GrowthSchedule::new([(0.15, 5), (0.075, 5), (0.04, 10)]),
            GrowthSchedule::new([(0.10, 1)]),
            GrowthSchedule::new([(0.02, 3), (0.02, 7)]),
            GrowthSchedule::new([]),
        ];

        for schedule in &schedules {
            assert_eq!(
                schedule.rates().count() as u32,
                schedule.growth_period(),
            );
        }
    }

    #[test]
    fn test_expansion_order() {
        let schedule = GrowthSchedule::new([(0.15, 2), (0.04, 3)]);
        let rates: Vec<f64> = schedule.rates().collect();
        assert_eq!(rates, vec![0.15, 0.15, 0.04, 0.04, 0.04]);
    }

    #[test]
    fn test_zero_year_segment_contributes_nothing() {
        let schedule = GrowthSchedule::new([(0.15, 2), (0.99, 0), (0.04, 1)]);
        let rates: Vec<f64> = schedule.rates().collect();
        assert_eq!(rates, vec![0.15, 0.15, 0.04]);
        assert_eq!(schedule.growth_period(), 3);
    }

    #[test]
    fn test_rates_round_at_construction() {
        let schedule = GrowthSchedule::new([(0.0666, 1), (0.0333, 1)]);
        let rates: Vec<f64> = schedule.rates().collect();
        assert_abs_diff_eq!(rates[0], 0.067, epsilon = 1e-12);
        assert_abs_diff_eq!(rates[1], 0.033, epsilon = 1e-12);
    }

    #[test]
    fn test_expansion_is_restartable() {
        let schedule = GrowthSchedule::from_near_term_rate(0.12);
        assert_eq!(schedule.rates().count(), 20);
        assert_eq!(schedule.rates().count(), 20);
    }

    #[test]
    fn test_near_term_shape() {
        let schedule = GrowthSchedule::from_near_term_rate(0.15);
        let segments = schedule.segments();

        assert_eq!(segments.len(), 3);
        assert_abs_diff_eq!(segments[0].rate, 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(segments[1].rate, 0.075, epsilon = 1e-12);
        assert_abs_diff_eq!(segments[2].rate, 0.038, epsilon = 1e-12); // 0.0375 rounds up
        assert_eq!(schedule.growth_period(), 20);
    }
}
