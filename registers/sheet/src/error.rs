// Licensed under the Apache-2.0 license.

use std::fmt::Display;
use std::path::PathBuf;

#[derive(Debug)]
pub enum SheetError {
    UnsupportedFormat(PathBuf),
    NoWorksheet {
        path: PathBuf,
        sheet: Option<String>,
    },
    NotFound(PathBuf),
    Io {
        path: PathBuf,
        err: std::io::Error,
    },
    Workbook {
        path: PathBuf,
        err: calamine::Error,
    },
    Csv {
        path: PathBuf,
        err: csv::Error,
    },
}

impl std::error::Error for SheetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            Self::Workbook { err, .. } => Some(err),
            Self::Csv { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl Display for SheetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat(path) => write!(
                f,
                "{path:?}: unsupported table format (expected .xlsx, .xlsm, .xlsb, .xls, .ods or .csv)"
            ),
            Self::NoWorksheet { path, sheet: None } => {
                write!(f, "{path:?}: workbook contains no worksheets")
            }
            Self::NoWorksheet {
                path,
                sheet: Some(sheet),
            } => write!(f, "{path:?}: worksheet {sheet:?} not found"),
            Self::NotFound(path) => write!(f, "{path:?}: no such table"),
            Self::Io { path, err } => write!(f, "{path:?}: {err}"),
            Self::Workbook { path, err } => write!(f, "{path:?}: {err}"),
            Self::Csv { path, err } => write!(f, "{path:?}: {err}"),
        }
    }
}
