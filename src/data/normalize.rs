//! Cleaning raw input into a [`NumericSequence`].

use serde::Serialize;

use crate::data::table::Table;
use crate::error::{StatsError, StatsResult};

/// Ordered finite real numbers, ready for the statistics engine.
///
/// Only built by the normalizer, so no entry is ever missing, NaN or infinite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NumericSequence(Vec<f64>);

impl NumericSequence {
    /// Keep the finite values of `values`, dropping everything else.
    pub fn from_finite(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().filter(|v| v.is_finite()).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy of the values in ascending order.
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.0.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for NumericSequence {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Parse a comma-separated list of numbers. The first token that is not a
/// finite number fails the whole input. Blank input gives an empty sequence.
pub fn parse_manual(text: &str) -> StatsResult<NumericSequence> {
    if text.trim().is_empty() {
        return Ok(NumericSequence::default());
    }

    let values = text
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(StatsError::Parse {
                    token: token.to_string(),
                }),
            }
        })
        .collect::<StatsResult<Vec<f64>>>()?;

    Ok(NumericSequence(values))
}

/// Names of the numeric columns, in table order.
pub fn detect_numeric_columns(table: &Table) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| c.is_numeric())
        .map(|c| c.name().to_string())
        .collect()
}

/// Values of a numeric column with missing cells dropped.
pub fn extract_column(table: &Table, column_name: &str) -> StatsResult<NumericSequence> {
    if !table.columns().iter().any(|c| c.is_numeric()) {
        return Err(StatsError::NoNumericColumns);
    }

    let column = table
        .column(column_name)
        .ok_or_else(|| StatsError::ColumnNotFound {
            column: column_name.to_string(),
        })?;

    if !column.is_numeric() {
        return Err(StatsError::NonNumericColumn {
            column: column_name.to_string(),
        });
    }

    Ok(NumericSequence::from_finite(
        column.cells().iter().filter_map(|c| c.as_number()),
    ))
}
