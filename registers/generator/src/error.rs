// Licensed under the Apache-2.0 license

use registers_sheet::SheetError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a `Fields` cell did not produce a field.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("does not start with an identifier")]
    NotAnIdentifier,
    #[error("bit index {0} does not fit in 32 bits")]
    IndexOverflow(String),
    #[error("range [{msb}:{lsb}] has zero width")]
    ZeroWidth { msb: u32, lsb: u32 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("table is empty; expected a header row")]
    EmptyTable,
    #[error("register {register:?}: field {field:?} {reason}")]
    MalformedField {
        register: String,
        field: String,
        reason: FieldParseError,
    },
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("failed to write {path:?}: {err}")]
    Write { path: PathBuf, err: std::io::Error },
    #[error("failed to read config {path:?}: {err}")]
    ConfigRead { path: PathBuf, err: std::io::Error },
    #[error("invalid config {path:?}: {err}")]
    ConfigParse {
        path: PathBuf,
        err: toml::de::Error,
    },
}
