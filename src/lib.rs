//! Descriptive statistics over a one-dimensional numeric dataset.
//!
//! Data comes either from a typed comma-separated list ([`analyze_manual`])
//! or from a numeric column of a loaded table ([`analyze_column`]). Both
//! produce a [`StatisticsSummary`]; the `prepare_*` variants also hand back
//! the cleaned values and histogram/boxplot data for charting.
//!
//! ```
//! use descstats::{analyze_manual, Mode};
//!
//! let summary = analyze_manual("2,4,4,4,5,5,7,9").unwrap();
//! assert_eq!(summary.mean, 5.0);
//! assert_eq!(summary.median, 4.5);
//! assert_eq!(summary.mode, Mode::Value(4.0));
//! ```

pub mod data;
pub mod error;
pub mod processing;
pub mod report;
pub mod state;

use serde::Serialize;

pub use data::loader::load_file;
pub use data::normalize::{detect_numeric_columns, extract_column, parse_manual, NumericSequence};
pub use data::table::{Cell, Column, ColumnKind, Table};
pub use error::{StatsError, StatsResult};
pub use processing::boxplot::BoxplotStats;
pub use processing::histogram::{BinRule, Histogram, MAX_BINS};
pub use processing::statistics::{summarize, Mode, StatisticsSummary};
pub use state::settings::Settings;

use processing::{boxplot, histogram};

/// Label used for typed input in reports.
pub const MANUAL_LABEL: &str = "Manual Input";

pub fn analyze_manual(raw_text: &str) -> StatsResult<StatisticsSummary> {
    summarize(&parse_manual(raw_text)?)
}

pub fn analyze_column(table: &Table, column_name: &str) -> StatsResult<StatisticsSummary> {
    summarize(&extract_column(table, column_name)?)
}

pub fn list_numeric_columns(table: &Table) -> Vec<String> {
    detect_numeric_columns(table)
}

/// Summary plus everything a presentation layer needs to draw charts.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub label: String,
    pub summary: StatisticsSummary,
    pub values: NumericSequence,
    pub histogram: Histogram,
    pub boxplot: BoxplotStats,
}

impl Analysis {
    pub fn build(
        label: impl Into<String>,
        values: NumericSequence,
        settings: &Settings,
    ) -> StatsResult<Self> {
        let summary = summarize(&values)?;
        let histogram = histogram::histogram(&values, settings.bins)?;
        let boxplot = boxplot::boxplot(&values, settings.whisker)?;
        Ok(Self {
            label: label.into(),
            summary,
            values,
            histogram,
            boxplot,
        })
    }
}

pub fn prepare_manual(raw_text: &str, settings: &Settings) -> StatsResult<Analysis> {
    Analysis::build(MANUAL_LABEL, parse_manual(raw_text)?, settings)
}

pub fn prepare_column(
    table: &Table,
    column_name: &str,
    settings: &Settings,
) -> StatsResult<Analysis> {
    Analysis::build(column_name, extract_column(table, column_name)?, settings)
}
