use serde::Serialize;

use crate::data::normalize::NumericSequence;
use crate::error::{StatsError, StatsResult};

/// Whisker reach in IQRs used when nothing else is configured.
pub const DEFAULT_WHISKER: f64 = 1.5;

/// Everything needed to draw a horizontal boxplot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    /// Lowest data point within `whisker * iqr` below `q1`.
    pub whisker_low: f64,
    /// Highest data point within `whisker * iqr` above `q3`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Quantile of sorted data by linear interpolation between order statistics.
pub(crate) fn quantile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn boxplot(seq: &NumericSequence, whisker: f64) -> StatsResult<BoxplotStats> {
    if seq.is_empty() {
        return Err(StatsError::EmptySequence);
    }
    let sorted = seq.sorted();

    let q1 = quantile_of_sorted(&sorted, 0.25);
    let median = quantile_of_sorted(&sorted, 0.5);
    let q3 = quantile_of_sorted(&sorted, 0.75);
    let iqr = q3 - q1;

    let low_fence = q1 - whisker * iqr;
    let high_fence = q3 + whisker * iqr;

    // Whiskers never retreat inside the box.
    let whisker_low = sorted
        .iter()
        .copied()
        .find(|&v| v >= low_fence)
        .map_or(q1, |v| v.min(q1));
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= high_fence)
        .map_or(q3, |v| v.max(q3));

    let outliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < whisker_low || v > whisker_high)
        .collect();

    Ok(BoxplotStats {
        q1,
        median,
        q3,
        iqr,
        whisker_low,
        whisker_high,
        outliers,
    })
}
