/*++
Licensed under the Apache-2.0 license.
--*/

use crate::error::FieldParseError;
use registers_sheet::Cell;
use serde::Serialize;
use std::collections::HashSet;

/// One bit-field within a register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    pub msb: u32,
    pub lsb: u32,
}

impl FieldSpec {
    /// `msb - lsb + 1`. Negative for reversed ranges; those are emitted as-is.
    pub fn width(&self) -> i64 {
        i64::from(self.msb) - i64::from(self.lsb) + 1
    }
}

/// A `Fields` cell that did not yield a [`FieldSpec`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedField {
    pub raw: String,
    #[serde(serialize_with = "serialize_display")]
    pub reason: FieldParseError,
}

/// One addressable register, assembled from its opening row and any
/// continuation rows that follow it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterSpec {
    pub name: String,
    /// Carried through from the table; the memory map does not use it.
    pub offset: Cell,
    /// Applied to every field of the register, verbatim.
    pub access: String,
    pub default_value: Cell,
    pub fields: Vec<FieldSpec>,
    pub skipped: Vec<SkippedField>,
}

impl RegisterSpec {
    /// Reset value as it appears in the generated text; blank is `0`.
    pub fn reset_literal(&self) -> String {
        if self.default_value.is_blank() {
            "0".to_string()
        } else {
            self.default_value.to_string()
        }
    }
}

/// All registers of one table, in first-appearance order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegisterTable {
    pub registers: Vec<RegisterSpec>,
}

impl RegisterTable {
    /// Register names with duplicates removed, keeping the first occurrence.
    pub fn unique_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.registers
            .iter()
            .map(|r| r.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

fn serialize_display<T: std::fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
