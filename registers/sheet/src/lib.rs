// Licensed under the Apache-2.0 license.

//! Reads register tables out of spreadsheets into a plain grid of cells.

mod cell;
mod error;
mod table_source;

pub use cell::Cell;
pub use error::SheetError;
pub use table_source::{FsTableSource, MemTableSource, TableSource};

/// A two-dimensional table exactly as it was read; row 0 is the header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Convenience constructor for tables built from string literals.
    ///
    /// Each value goes through [`Cell::from_text`], so `"0"` becomes an
    /// integer and `""` becomes [`Cell::Empty`], the same typing a CSV file
    /// gets.
    pub fn from_strs(rows: &[&[&str]]) -> Self {
        Self {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| Cell::from_text(s)).collect())
                .collect(),
        }
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(Vec::as_slice)
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().skip(1).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
