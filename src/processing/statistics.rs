use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::data::normalize::NumericSequence;
use crate::error::{StatsError, StatsResult};

/// Most frequent value, or the marker for "no single value wins".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Mode {
    Value(f64),
    NoUniqueMode,
}

impl Mode {
    pub fn value(&self) -> Option<f64> {
        match self {
            Mode::Value(v) => Some(*v),
            Mode::NoUniqueMode => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Value(v) => write!(f, "{v}"),
            Mode::NoUniqueMode => write!(f, "none (no unique mode)"),
        }
    }
}

/// The five descriptive measures of a sequence, computed together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub mode: Mode,
    pub variance: f64,
    pub std_dev: f64,
}

impl StatisticsSummary {
    /// Format as a multi-line report string.
    pub fn report(&self, label: &str, precision: usize) -> String {
        let mode = match self.mode {
            Mode::Value(v) => format!("{v:.precision$}"),
            Mode::NoUniqueMode => self.mode.to_string(),
        };
        format!(
            "{label}:\n  Count: {}\n  Min: {:.p$}\n  Max: {:.p$}\n  Mean: {:.p$}\n  Median: {:.p$}\n  Mode: {mode}\n  Variance: {:.p$}\n  Std Dev: {:.p$}\n",
            self.count,
            self.min,
            self.max,
            self.mean,
            self.median,
            self.variance,
            self.std_dev,
            p = precision,
        )
    }
}

pub fn mean(seq: &NumericSequence) -> StatsResult<f64> {
    if seq.is_empty() {
        return Err(StatsError::EmptySequence);
    }
    let n = seq.len() as f64;
    let sum = seq.values().iter().sum::<f64>();
    if sum.is_finite() {
        Ok(sum / n)
    } else {
        // The sum overflowed; each term of Σ(x/n) is bounded by max |x|.
        Ok(seq.values().iter().map(|v| v / n).sum())
    }
}

pub fn median(seq: &NumericSequence) -> StatsResult<f64> {
    if seq.is_empty() {
        return Err(StatsError::EmptySequence);
    }
    Ok(median_of_sorted(&seq.sorted()))
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let count = sorted.len();
    if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    }
}

/// Value with the strictly highest occurrence count.
///
/// Empty input, a tie for the top count, or all-unique input with more
/// than one value all give [`Mode::NoUniqueMode`].
pub fn mode(seq: &NumericSequence) -> Mode {
    mode_of_sorted(&seq.sorted())
}

fn mode_of_sorted(sorted: &[f64]) -> Mode {
    // -0.0 + 0.0 == 0.0, so both zeros land in the same run.
    let frequencies = sorted.iter().map(|v| v + 0.0).fold(
        Vec::<(f64, usize)>::new(),
        |mut runs, v| {
            match runs.last_mut() {
                Some((last, count)) if *last == v => *count += 1,
                _ => runs.push((v, 1)),
            }
            runs
        },
    );

    let mut best: Option<(f64, usize)> = None;
    let mut tied = false;
    for (value, count) in frequencies {
        match best.map(|(_, c)| count.cmp(&c)) {
            None | Some(Ordering::Greater) => {
                best = Some((value, count));
                tied = false;
            }
            Some(Ordering::Equal) => tied = true,
            Some(Ordering::Less) => {}
        }
    }

    match best {
        Some((value, _)) if !tied => Mode::Value(value),
        _ => Mode::NoUniqueMode,
    }
}

/// Sample variance (divides by n - 1).
pub fn variance(seq: &NumericSequence) -> StatsResult<f64> {
    if seq.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            found: seq.len(),
        });
    }
    let mean = mean(seq)?;
    let dof = (seq.len() - 1) as f64;
    let sum_sq = seq.values().iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    if sum_sq.is_finite() {
        return Ok(sum_sq / dof);
    }

    // Deviations too large to square directly: halve them (exact) and
    // scale by the largest one before summing.
    let halves: Vec<f64> = seq.values().iter().map(|v| v * 0.5 - mean * 0.5).collect();
    let scale = halves.iter().fold(0.0_f64, |m, d| m.max(d.abs()));
    let scaled = halves.iter().map(|d| (d / scale).powi(2)).sum::<f64>() / dof;
    Ok(4.0 * scale * scale * scaled)
}

pub fn std_dev(seq: &NumericSequence) -> StatsResult<f64> {
    Ok(root(variance(seq)?))
}

/// Cancellation can leave a tiny negative variance; clamp before the root.
fn root(variance: f64) -> f64 {
    variance.max(0.0).sqrt()
}

/// All measures at once, or the first failure.
pub fn summarize(seq: &NumericSequence) -> StatsResult<StatisticsSummary> {
    if seq.is_empty() {
        return Err(StatsError::EmptySequence);
    }
    let variance = variance(seq)?;
    let sorted = seq.sorted();

    Ok(StatisticsSummary {
        count: seq.len(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: mean(seq)?,
        median: median_of_sorted(&sorted),
        mode: mode_of_sorted(&sorted),
        variance,
        std_dev: root(variance),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[f64]) -> NumericSequence {
        NumericSequence::from_finite(values.iter().copied())
    }

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&seq(&[1.0, 2.0, 3.0, 4.0])).unwrap(), 2.5);
        assert_eq!(median(&seq(&[3.0, 1.0, 2.0])).unwrap(), 2.0);
        assert_eq!(median(&seq(&[4.0, 1.0, 3.0, 2.0])).unwrap(), 2.5);
        assert!(matches!(mean(&seq(&[])), Err(StatsError::EmptySequence)));
        assert!(matches!(median(&seq(&[])), Err(StatsError::EmptySequence)));
    }

    #[test]
    fn test_median_is_order_independent() {
        let values = [9.0, -3.0, 7.5, 0.0, 12.0, 4.0, 4.0];
        let mut reversed = values;
        reversed.reverse();
        let mut sorted = values;
        sorted.sort_by(f64::total_cmp);

        let m = median(&seq(&values)).unwrap();
        assert_eq!(m, median(&seq(&reversed)).unwrap());
        assert_eq!(m, sorted[(sorted.len() - 1) / 2]);
    }

    #[test]
    fn test_mode() {
        assert_eq!(mode(&seq(&[])), Mode::NoUniqueMode);
        assert_eq!(mode(&seq(&[1.0, 2.0, 3.0])), Mode::NoUniqueMode);
        assert_eq!(mode(&seq(&[1.0, 1.0, 2.0])), Mode::Value(1.0));
        assert_eq!(mode(&seq(&[1.0, 1.0, 2.0, 2.0, 3.0])), Mode::NoUniqueMode);
        assert_eq!(mode(&seq(&[5.0])), Mode::Value(5.0));
    }

    #[test]
    fn test_mode_zero_is_a_real_value() {
        let m = mode(&seq(&[0.0, -0.0, 3.0]));
        assert_eq!(m, Mode::Value(0.0));
        assert_ne!(m, Mode::NoUniqueMode);
        assert_eq!(m.value(), Some(0.0));
    }

    #[test]
    fn test_variance_needs_two_values() {
        for values in [&[][..], &[4.0][..]] {
            assert!(matches!(
                variance(&seq(values)),
                Err(StatsError::InsufficientData { required: 2, .. })
            ));
            assert!(matches!(
                std_dev(&seq(values)),
                Err(StatsError::InsufficientData { required: 2, .. })
            ));
        }
    }

    #[test]
    fn test_std_dev_squared_matches_variance() {
        let samples: [&[f64]; 4] = [
            &[1.0, 2.0],
            &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0],
            &[1e9, 1e9 + 1.0, 1e9 + 2.0],
            &[3.3, 3.3, 3.3, 3.3],
        ];
        for values in samples {
            let s = seq(values);
            let var = variance(&s).unwrap();
            let sd = std_dev(&s).unwrap();
            assert!((sd * sd - var).abs() <= 1e-9 * var.max(1.0), "{values:?}");
            assert!(sd >= 0.0);
        }
    }

    #[test]
    fn test_values_near_f64_max() {
        let s = seq(&[1e308, 1e308]);
        assert_eq!(mean(&s).unwrap(), 1e308);
        assert_eq!(variance(&s).unwrap(), 0.0);
        assert_eq!(std_dev(&s).unwrap(), 0.0);

        // The squared deviations sum past f64::MAX, the variance does not.
        let s = seq(&[-1e154, 1e154, 0.0]);
        assert_eq!(mean(&s).unwrap(), 0.0);
        let var = variance(&s).unwrap();
        assert!((var / 1e308 - 1.0).abs() < 1e-12, "{var}");
        assert!((std_dev(&s).unwrap() / 1e154 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&seq(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])).unwrap();
        assert_eq!(summary.count, 8);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.mode, Mode::Value(4.0));
        assert!((summary.variance - 36.0 / 7.0).abs() < 1e-12);
        assert!((summary.std_dev - 2.267_786_838).abs() < 1e-6);
    }

    #[test]
    fn test_summarize_failures() {
        assert!(matches!(summarize(&seq(&[])), Err(StatsError::EmptySequence)));
        assert!(matches!(
            summarize(&seq(&[1.0])),
            Err(StatsError::InsufficientData { required: 2, found: 1 })
        ));
    }

    #[test]
    fn test_report_shows_no_mode_marker() {
        let summary = summarize(&seq(&[1.0, 2.0, 3.0])).unwrap();
        let text = summary.report("Manual Input", 2);
        assert!(text.starts_with("Manual Input:\n"));
        assert!(text.contains("Mean: 2.00"));
        assert!(text.contains("Mode: none (no unique mode)"));
    }
}
