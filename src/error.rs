use thiserror::Error;

/// Every way an analysis request can fail.
///
/// Each variant carries enough context (offending token, column name,
/// required size) for a caller to render a message without re-inspecting
/// the input.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("cannot parse {token:?} as a number")]
    Parse { token: String },
    #[error("column {column:?} not found")]
    ColumnNotFound { column: String },
    #[error("no numeric columns found in the table")]
    NoNumericColumns,
    #[error("column {column:?} is not numeric")]
    NonNumericColumn { column: String },
    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },
    #[error("no values to analyze")]
    EmptySequence,
    #[error("need at least {required} values, found {found}")]
    InsufficientData { required: usize, found: usize },
    #[error("no data found in file")]
    EmptyFile,
    #[error("cannot read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("cannot read workbook: {0}")]
    Workbook(#[from] calamine::Error),
}

pub type StatsResult<T> = std::result::Result<T, StatsError>;
