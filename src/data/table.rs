use std::collections::HashSet;

use serde::Serialize;

/// Cell markers read as missing rather than as text.
const MISSING_MARKERS: [&str; 7] = ["na", "n/a", "nan", "null", "none", "-", "#n/a"];

/// A single cell after loading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Classify a raw text cell: blanks and missing markers become `Empty`,
    /// finite numbers become `Number`, anything else stays `Text`.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || MISSING_MARKERS.iter().any(|m| trimmed.eq_ignore_ascii_case(m)) {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// Per-column type tag, computed once when the column is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Cell>,
}

impl Column {
    /// A column with at least one row is numeric when none of its cells is
    /// text, so an all-blank column still counts as numeric.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        let has_text = cells.iter().any(|c| matches!(c, Cell::Text(_)));
        let kind = if cells.is_empty() || has_text {
            ColumnKind::Text
        } else {
            ColumnKind::Numeric
        };
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

/// Rows x named columns, stored column-major.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        let row_count = columns.iter().map(|c| c.cells.len()).max().unwrap_or(0);
        Self { columns, row_count }
    }

    /// Build a table from a header row and row-major cells. Short rows are
    /// padded with `Empty`, blank headers get a positional name and repeated
    /// names get a `.1`, `.2`, ... suffix.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let row_count = rows.len();
        let mut column_cells: Vec<Vec<Cell>> = vec![Vec::with_capacity(row_count); header.len()];
        for row in rows {
            let mut row = row.into_iter();
            for col in column_cells.iter_mut() {
                col.push(row.next().unwrap_or(Cell::Empty));
            }
        }

        let mut seen: HashSet<String> = HashSet::new();
        let columns = header
            .into_iter()
            .zip(column_cells)
            .enumerate()
            .map(|(idx, (name, cells))| {
                let name = name.trim();
                let base = if name.is_empty() {
                    format!("Unnamed: {idx}")
                } else {
                    name.to_string()
                };
                let mut name = base.clone();
                let mut suffix = 1;
                while seen.contains(&name) {
                    name = format!("{base}.{suffix}");
                    suffix += 1;
                }
                seen.insert(name.clone());
                Column::new(name, cells)
            })
            .collect();

        Self { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
