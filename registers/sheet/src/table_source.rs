// Licensed under the Apache-2.0 license.

use crate::{Cell, RawTable, SheetError};
use calamine::{open_workbook_auto, Reader};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait TableSource {
    fn read_table(&self, path: &Path) -> Result<RawTable, SheetError>;
}

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads tables from files on disk, choosing the reader from the extension.
#[derive(Clone, Debug, Default)]
pub struct FsTableSource {
    sheet: Option<String>,
}

impl FsTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the named worksheet instead of the first one. Ignored for CSV.
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    fn read_workbook(&self, path: &Path) -> Result<RawTable, SheetError> {
        let wb_err = |err| SheetError::Workbook {
            path: path.to_path_buf(),
            err,
        };
        let mut workbook = open_workbook_auto(path).map_err(wb_err)?;
        let range = match &self.sheet {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(SheetError::NoWorksheet {
                        path: path.to_path_buf(),
                        sheet: Some(name.clone()),
                    });
                }
                workbook.worksheet_range(name).map_err(wb_err)?
            }
            None => workbook
                .worksheet_range_at(0)
                .ok_or_else(|| SheetError::NoWorksheet {
                    path: path.to_path_buf(),
                    sheet: None,
                })?
                .map_err(wb_err)?,
        };
        Ok(RawTable::from_rows(
            range
                .rows()
                .map(|row| row.iter().map(Cell::from).collect())
                .collect(),
        ))
    }

    fn read_csv(&self, path: &Path) -> Result<RawTable, SheetError> {
        let file = std::fs::File::open(path).map_err(|err| SheetError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);
        let mut rows = vec![];
        for record in reader.records() {
            let record = record.map_err(|err| SheetError::Csv {
                path: path.to_path_buf(),
                err,
            })?;
            rows.push(record.iter().map(Cell::from_text).collect());
        }
        Ok(RawTable::from_rows(rows))
    }
}

impl TableSource for FsTableSource {
    fn read_table(&self, path: &Path) -> Result<RawTable, SheetError> {
        if !path.exists() {
            return Err(SheetError::NotFound(path.to_path_buf()));
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if ext == "csv" {
            self.read_csv(path)
        } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            self.read_workbook(path)
        } else {
            Err(SheetError::UnsupportedFormat(path.to_path_buf()))
        }
    }
}

/// Serves tables that are already in memory, keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemTableSource {
    map: HashMap<PathBuf, RawTable>,
}

impl MemTableSource {
    pub fn from_entries(entries: &[(PathBuf, RawTable)]) -> Self {
        Self {
            map: entries.iter().cloned().collect(),
        }
    }
}

impl TableSource for MemTableSource {
    fn read_table(&self, path: &Path) -> Result<RawTable, SheetError> {
        self.map
            .get(path)
            .cloned()
            .ok_or_else(|| SheetError::NotFound(path.to_path_buf()))
    }
}
