use crate::metrics::Value;
use std::fmt;

pub mod extract;

pub use extract::{extract, TableSelectors, Template};

/// Header of the row-label column, both on screen and in cache files.
pub const INDEX: &str = "index";

/// A scraped table: metric names down the side, periods across the top.
///
/// Row and column labels are unique and keep the order they were first seen
/// in. Every row holds exactly one cell per column; `None` is a missing value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub label: String,
    pub cells: Vec<Option<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table with the given period columns; repeated labels collapse.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for col in columns {
            table.column_index(&col.into());
        }
        table
    }

    /// Period labels, excluding the `index` column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    pub fn row(&self, label: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.label == label)
    }

    pub fn cell(&self, row: &str, col: &str) -> Option<&str> {
        let c = self.columns.iter().position(|label| label == col)?;
        self.row(row)?.cells[c].as_deref()
    }

    /// No rows or no period columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Store `value` under (`row`, `col`), adding the row or column when new.
    pub fn set(&mut self, row: &str, col: &str, value: Option<String>) {
        let c = self.column_index(col);
        let r = match self.rows.iter().position(|r| r.label == row) {
            Some(r) => r,
            None => {
                self.rows.push(Row {
                    label: row.to_string(),
                    cells: vec![None; self.columns.len()],
                });
                self.rows.len() - 1
            }
        };
        self.rows[r].cells[c] = value;
    }

    /// Add an empty row unless `label` is already present.
    pub fn push_row(&mut self, label: &str) {
        if self.row(label).is_none() {
            self.rows.push(Row {
                label: label.to_string(),
                cells: vec![None; self.columns.len()],
            });
        }
    }

    /// Turn every cell equal to `marker` into a missing value.
    pub fn replace_with_missing(&mut self, marker: &str) {
        for cell in self.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
            if cell.as_deref() == Some(marker) {
                *cell = None;
            }
        }
    }

    /// Cells of one row, parsed to numbers where they parse.
    pub fn values(&self, label: &str) -> Option<Vec<Value>> {
        self.row(label)
            .map(|row| row.cells.iter().map(|cell| Value::parse(cell.as_deref())).collect())
    }

    /// A copy holding only the last `n` period columns.
    pub fn tail(&self, n: usize) -> Table {
        let skip = self.columns.len().saturating_sub(n);
        Table {
            columns: self.columns[skip..].to_vec(),
            rows: self
                .rows
                .iter()
                .map(|row| Row {
                    label: row.label.clone(),
                    cells: row.cells[skip..].to_vec(),
                })
                .collect(),
        }
    }

    fn column_index(&mut self, col: &str) -> usize {
        match self.columns.iter().position(|label| label == col) {
            Some(c) => c,
            None => {
                self.columns.push(col.to_string());
                for row in self.rows.iter_mut() {
                    row.cells.push(None);
                }
                self.columns.len() - 1
            }
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAN: &str = "NaN";

        let label_width = self
            .row_labels()
            .map(|label| label.chars().count())
            .chain(std::iter::once(INDEX.len()))
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, col)| {
                self.rows
                    .iter()
                    .map(|row| row.cells[c].as_deref().unwrap_or(NAN).chars().count())
                    .chain(std::iter::once(col.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{INDEX:<label_width$}")?;
        for (col, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {col:>width$}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:<label_width$}", row.label)?;
            for (cell, width) in row.cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", cell.as_deref().unwrap_or(NAN))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
