// Descriptive statistics over the accepted readings
use super::cleaning::round_to;
use serde::Serialize;
use thiserror::Error;

const SUMMARY_DECIMALS: i32 = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatisticsError {
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub modal_frequency: usize,
}

impl StatisticsSummary {
    /// Mean, median and mode rounded to two decimals (half away from zero).
    ///
    /// Mode ties go to the smallest value. An empty input has no summary.
    /// Cleaned readings carry one decimal, so such inputs are summarised in
    /// exact tenths and `.xx5` means round away from zero as written in
    /// decimal. Other inputs fall back to binary floating point.
    pub fn compute(values: &[f64]) -> Result<Option<Self>, StatisticsError> {
        if values.is_empty() {
            return Ok(None);
        }

        match to_tenths(values) {
            Some(tenths) => Ok(Some(Self::from_tenths(tenths))),
            None => Self::from_floats(values).map(Some),
        }
    }

    fn from_tenths(mut tenths: Vec<i64>) -> Self {
        tenths.sort_unstable();
        let n = tenths.len() as i128;

        let sum: i128 = tenths.iter().map(|&t| t as i128).sum();
        let mean_hundredths = div_round_half_away(sum * 10, n);

        let mid = tenths.len() / 2;
        let median_hundredths = if tenths.len() % 2 == 0 {
            (tenths[mid - 1] as i128 + tenths[mid] as i128) * 5
        } else {
            tenths[mid] as i128 * 10
        };

        let (mode, modal_frequency) = mode_of_sorted(&tenths);

        Self {
            mean: mean_hundredths as f64 / 100.0,
            median: median_hundredths as f64 / 100.0,
            mode: mode as f64 / 10.0,
            modal_frequency,
        }
    }

    fn from_floats(values: &[f64]) -> Result<Self, StatisticsError> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        if !mean.is_finite() {
            return Err(StatisticsError::NonFinite("mean"));
        }

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
        } else {
            sorted[mid]
        };

        let (mode, modal_frequency) = mode_of_sorted(&sorted);

        Ok(Self {
            mean: round_to(mean, SUMMARY_DECIMALS),
            median: round_to(median, SUMMARY_DECIMALS),
            mode: round_to(mode, SUMMARY_DECIMALS),
            modal_frequency,
        })
    }
}

/// Largest magnitude, in tenths, that an f64 holds exactly.
const MAX_EXACT_TENTHS: f64 = 9_007_199_254_740_992.0;

/// Every value as an exact count of tenths, or `None` if any value is not a
/// one-decimal number.
fn to_tenths(values: &[f64]) -> Option<Vec<i64>> {
    values
        .iter()
        .map(|&v| {
            let tenths = (v * 10.0).round();
            (tenths.abs() <= MAX_EXACT_TENTHS && tenths / 10.0 == v).then_some(tenths as i64)
        })
        .collect()
}

/// `num / den` rounded half away from zero; `den` is positive.
fn div_round_half_away(num: i128, den: i128) -> i128 {
    let quotient = num / den;
    let remainder = num % den;
    if remainder.abs() * 2 >= den {
        quotient + num.signum()
    } else {
        quotient
    }
}

/// Longest run in ascending order; only a strictly longer run replaces the
/// current best, which leaves the smallest value on ties.
fn mode_of_sorted<T: Copy + PartialEq>(sorted: &[T]) -> (T, usize) {
    let mut best = (sorted[0], 0);
    let mut run_start = 0;

    for i in 1..=sorted.len() {
        if i == sorted.len() || sorted[i] != sorted[run_start] {
            let run = i - run_start;
            if run > best.1 {
                best = (sorted[run_start], run);
            }
            run_start = i;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(values: &[f64]) -> StatisticsSummary {
        StatisticsSummary::compute(values).unwrap().unwrap()
    }

    #[test]
    fn test_empty_has_no_summary() {
        assert_eq!(StatisticsSummary::compute(&[]), Ok(None));
    }

    #[test]
    fn test_basic_summary() {
        let s = summary(&[10.0, 10.0, 20.0]);
        assert_eq!(s.mean, 13.33);
        assert_eq!(s.median, 10.0);
        assert_eq!(s.mode, 10.0);
        assert_eq!(s.modal_frequency, 2);
    }

    #[test]
    fn test_mode_tie_prefers_smallest() {
        let s = summary(&[7.0, 5.0, 7.0, 5.0]);
        assert_eq!(s.mode, 5.0);
        assert_eq!(s.modal_frequency, 2);
        assert_eq!(s.median, 6.0);
    }

    #[test]
    fn test_all_distinct_mode_is_minimum() {
        let s = summary(&[3.2, -1.5, 8.0]);
        assert_eq!(s.mode, -1.5);
        assert_eq!(s.modal_frequency, 1);
    }

    #[test]
    fn test_even_median_averages_middle_pair() {
        let s = summary(&[22.5, 30.0]);
        assert_eq!(s.mean, 26.25);
        assert_eq!(s.median, 26.25);
    }

    #[test]
    fn test_single_zero_is_a_real_summary() {
        let s = summary(&[0.0]);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.modal_frequency, 1);
    }

    #[test]
    fn test_decimal_midpoints_round_away_from_zero() {
        let s = summary(&[1.1, 1.0, 1.0, 1.0]);
        assert_eq!(s.mean, 1.03);
        let s = summary(&[-1.1, -1.0, -1.0, -1.0]);
        assert_eq!(s.mean, -1.03);
        let s = summary(&[0.1, 0.0]);
        assert_eq!(s.mean, 0.05);
        let s = summary(&[2.1, 2.0]);
        assert_eq!(s.median, 2.05);
    }

    #[test]
    fn test_div_round_half_away() {
        assert_eq!(div_round_half_away(5, 2), 3);
        assert_eq!(div_round_half_away(-5, 2), -3);
        assert_eq!(div_round_half_away(4000, 3), 1333);
        assert_eq!(div_round_half_away(-7, 4), -2);
    }

    #[test]
    fn test_non_decimal_input_uses_float_rounding() {
        let s = summary(&[0.125, 0.125]);
        assert_eq!(s.mean, 0.13);
        let s = summary(&[-0.125]);
        assert_eq!(s.median, -0.13);
    }

    #[test]
    fn test_overflowing_mean_is_an_error() {
        assert_eq!(
            StatisticsSummary::compute(&[f64::MAX, f64::MAX]),
            Err(StatisticsError::NonFinite("mean"))
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(summary(&[1.0])).unwrap();
        assert_eq!(json["modalFrequency"], 1);
    }
}
