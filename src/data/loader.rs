use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::data::table::{Cell, Table};
use crate::error::{StatsError, StatsResult};

/// Source formats the loader understands, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Spreadsheet,
}

impl FileFormat {
    /// Reject anything that is not a CSV or spreadsheet extension before
    /// the file is touched.
    pub fn from_path(path: &Path) -> StatsResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(FileFormat::Spreadsheet),
            _ => Err(StatsError::UnsupportedFormat { extension: ext }),
        }
    }
}

/// Load a CSV or spreadsheet file into a typed table. The first row is the header.
pub fn load_file(path: &Path) -> StatsResult<Table> {
    let table = match FileFormat::from_path(path)? {
        FileFormat::Csv => load_csv(path)?,
        FileFormat::Spreadsheet => load_spreadsheet(path)?,
    };
    tracing::info!(
        "Loaded {:?}: {} columns, {} rows",
        path,
        table.columns().len(),
        table.row_count()
    );
    for column in table.columns() {
        tracing::debug!("Column {:?} classified as {}", column.name(), column.kind().label());
    }
    Ok(table)
}

fn load_csv(path: &Path) -> StatsResult<Table> {
    let content = std::fs::read(path)?;
    // Fall back to latin1 (each byte maps to the same code point) for non-UTF-8 exports.
    let text = match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };
    parse_csv(&text)
}

/// Parse CSV text into a table. Blank lines are skipped and ragged rows are padded.
pub fn parse_csv(text: &str) -> StatsResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(|s| s.to_string()).collect(),
        None => return Err(StatsError::EmptyFile),
    };

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for record in records {
        let record = record?;
        if record.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(Table::from_rows(header, rows))
}

fn load_spreadsheet(path: &Path) -> StatsResult<Table> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(StatsError::EmptyFile)?;

    let range = workbook.worksheet_range(&sheet_name)?;
    tracing::debug!("Reading sheet {:?} of {:?}", sheet_name, path);
    table_from_range(&range)
}

/// Build a table from a worksheet range: first row is the header, fully
/// blank rows are skipped.
pub fn table_from_range(range: &Range<Data>) -> StatsResult<Table> {
    let mut rows = range.rows();
    let header: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(header_text).collect(),
        None => return Err(StatsError::EmptyFile),
    };

    let rows: Vec<Vec<Cell>> = rows
        .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(Table::from_rows(header, rows))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

/// Convert a workbook cell. Only real numbers count as numeric; booleans,
/// dates and durations are kept as text.
pub fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(f) if f.is_finite() => Cell::Number(*f),
        Data::Float(f) => Cell::Text(f.to_string()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::String(s) => Cell::from_text(s),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
