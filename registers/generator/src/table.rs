// Licensed under the Apache-2.0 license.

use crate::error::Error;
use registers_sheet::{Cell, RawTable};

/// The columns every register table must provide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    RegisterName,
    Offset,
    ReadWrite,
    Fields,
    DefaultValue,
    ResetValue,
    Description,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::RegisterName,
        Column::Offset,
        Column::ReadWrite,
        Column::Fields,
        Column::DefaultValue,
        Column::ResetValue,
        Column::Description,
    ];

    /// Header text as it appears in the spreadsheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::RegisterName => "Register Name",
            Column::Offset => "Offset",
            Column::ReadWrite => "Read/Write",
            Column::Fields => "Fields",
            Column::DefaultValue => "Default value",
            Column::ResetValue => "Reset value",
            Column::Description => "Description",
        }
    }
}

/// A data row keyed by canonical column.
///
/// `register_name` and `fields` are text with missing values as `""`; every
/// other column keeps the raw cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterRow {
    pub register_name: String,
    pub offset: Cell,
    pub read_write: Cell,
    pub fields: String,
    pub default_value: Cell,
    pub reset_value: Cell,
    pub description: Cell,
}

/// Maps the header onto the canonical columns and returns the data rows.
///
/// Header matching ignores surrounding whitespace but is case-sensitive.
pub fn normalize(table: &RawTable) -> Result<Vec<RegisterRow>, Error> {
    let header = table.header().ok_or(Error::EmptyTable)?;
    let header: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();

    let mut indices = [0usize; 7];
    let mut missing = vec![];
    for (slot, col) in indices.iter_mut().zip(Column::ALL) {
        match header.iter().position(|h| h == col.header()) {
            Some(i) => *slot = i,
            None => missing.push(col.header().to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }

    let [name, offset, read_write, fields, default_value, reset_value, description] = indices;
    Ok(table
        .data_rows()
        .map(|row| {
            let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
            RegisterRow {
                register_name: cell(name).text_or_empty(),
                offset: cell(offset),
                read_write: cell(read_write),
                fields: cell(fields).text_or_empty(),
                default_value: cell(default_value),
                reset_value: cell(reset_value),
                description: cell(description),
            }
        })
        .collect())
}
