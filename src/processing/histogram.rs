use serde::{Deserialize, Serialize};

use crate::data::normalize::NumericSequence;
use crate::error::{StatsError, StatsResult};
use crate::processing::boxplot::quantile_of_sorted;

/// Upper bound on the bin count for every rule.
pub const MAX_BINS: usize = 10_000;

/// How the number of histogram bins is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinRule {
    /// Narrower of the Sturges and Freedman-Diaconis widths.
    #[default]
    Auto,
    Sturges,
    Fixed(usize),
}

/// Bin edges and counts. `edges` has one more entry than `counts`; every
/// bin is half-open except the last, which includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

fn sturges_width(range: f64, n: usize) -> f64 {
    range / ((n as f64).log2() + 1.0)
}

fn freedman_diaconis_width(sorted: &[f64]) -> f64 {
    let iqr = quantile_of_sorted(sorted, 0.75) - quantile_of_sorted(sorted, 0.25);
    2.0 * iqr * (sorted.len() as f64).powf(-1.0 / 3.0)
}

fn bins_for_width(range: f64, width: f64) -> usize {
    if width > 0.0 {
        ((range / width).ceil() as usize).max(1)
    } else {
        1
    }
}

pub fn histogram(seq: &NumericSequence, rule: BinRule) -> StatsResult<Histogram> {
    if seq.is_empty() {
        return Err(StatsError::EmptySequence);
    }
    let sorted = seq.sorted();
    let (mut lo, mut hi) = (sorted[0], sorted[sorted.len() - 1]);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let range = hi - lo;

    // A far outlier with a tight IQR shrinks the width towards zero.
    let bins = match rule {
        BinRule::Fixed(k) => k,
        BinRule::Sturges => bins_for_width(range, sturges_width(range, sorted.len())),
        BinRule::Auto => {
            let sturges = sturges_width(range, sorted.len());
            let fd = freedman_diaconis_width(&sorted);
            let width = if fd > 0.0 { fd.min(sturges) } else { sturges };
            bins_for_width(range, width)
        }
    }
    .clamp(1, MAX_BINS);

    let edges: Vec<f64> = (0..=bins)
        .map(|i| lo + range * i as f64 / bins as f64)
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in &sorted {
        let idx = (((v - lo) / range) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    Ok(Histogram { edges, counts })
}
