// Licensed under the Apache-2.0 license.

//! Groups normalized rows into registers.
//!
//! A row with a register name opens a register; following rows with an
//! empty name contribute more fields to it. The open register is flushed
//! into the [`RegisterTable`] when the next name appears or input ends.

use crate::config::FieldPolicy;
use crate::error::Error;
use crate::field::parse_field;
use crate::schema::{RegisterSpec, RegisterTable, SkippedField};
use crate::table::RegisterRow;
use registers_sheet::Cell;

/// A register whose rows are still being read.
#[derive(Clone, Debug, PartialEq)]
struct OpenRegister {
    name: String,
    offset: Cell,
    access: String,
    default_value: Cell,
    raw_fields: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum ScanState {
    #[default]
    NoOpenRegister,
    RegisterOpen(OpenRegister),
}

#[derive(Debug, Default)]
pub struct RegisterScanner {
    state: ScanState,
    policy: FieldPolicy,
    table: RegisterTable,
}

impl RegisterScanner {
    pub fn new(policy: FieldPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn has_open_register(&self) -> bool {
        matches!(self.state, ScanState::RegisterOpen(_))
    }

    /// Registers flushed so far; the open one is not included.
    pub fn flushed(&self) -> &RegisterTable {
        &self.table
    }

    pub fn push_row(&mut self, row: &RegisterRow) -> Result<(), Error> {
        let name = row.register_name.trim();
        if !name.is_empty() {
            self.flush()?;
            self.state = ScanState::RegisterOpen(OpenRegister {
                name: name.to_string(),
                offset: row.offset.clone(),
                access: row.read_write.text_or_empty(),
                default_value: row.default_value.clone(),
                raw_fields: vec![],
            });
        }
        match &mut self.state {
            ScanState::RegisterOpen(open) => {
                let fields = row.fields.trim();
                if !fields.is_empty() {
                    open.raw_fields.push(fields.to_string());
                }
            }
            ScanState::NoOpenRegister => {
                if !row.fields.trim().is_empty() {
                    log::debug!("Ignoring field {:?} before any register", row.fields);
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<RegisterTable, Error> {
        self.flush()?;
        Ok(self.table)
    }

    fn flush(&mut self) -> Result<(), Error> {
        let ScanState::RegisterOpen(open) = std::mem::take(&mut self.state) else {
            return Ok(());
        };
        let mut fields = vec![];
        let mut skipped = vec![];
        for raw in open.raw_fields {
            match parse_field(&raw) {
                Ok(field) => fields.push(field),
                Err(reason) => {
                    if self.policy == FieldPolicy::Error {
                        return Err(Error::MalformedField {
                            register: open.name,
                            field: raw,
                            reason,
                        });
                    }
                    skipped.push(SkippedField { raw, reason });
                }
            }
        }
        log::debug!(
            "Register {} with {} field(s), {} skipped",
            open.name,
            fields.len(),
            skipped.len()
        );
        self.table.registers.push(RegisterSpec {
            name: open.name,
            offset: open.offset,
            access: open.access,
            default_value: open.default_value,
            fields,
            skipped,
        });
        Ok(())
    }
}

/// Runs every row through a [`RegisterScanner`].
pub fn scan_rows<'a>(
    rows: impl IntoIterator<Item = &'a RegisterRow>,
    policy: FieldPolicy,
) -> Result<RegisterTable, Error> {
    rows.into_iter()
        .try_fold(RegisterScanner::new(policy), |mut scanner, row| {
            scanner.push_row(row)?;
            Ok::<_, Error>(scanner)
        })?
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldParseError;
    use crate::schema::FieldSpec;

    fn row(name: &str, access: &str, fields: &str, default: Cell) -> RegisterRow {
        RegisterRow {
            register_name: name.into(),
            read_write: Cell::from_text(access),
            fields: fields.into(),
            default_value: default,
            ..Default::default()
        }
    }

    fn field(name: &str, msb: u32, lsb: u32) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            msb,
            lsb,
        }
    }

    #[test]
    fn test_continuation_rows() {
        let rows = [
            row("CTRL_REG", "RW", "ENABLE [0:0]", Cell::Int(0)),
            row("", "", "MODE [2:1]", Cell::Empty),
        ];
        let table = scan_rows(&rows, FieldPolicy::Skip).unwrap();
        assert_eq!(table.registers.len(), 1);
        let reg = &table.registers[0];
        assert_eq!(reg.name, "CTRL_REG");
        assert_eq!(reg.fields, vec![field("ENABLE", 0, 0), field("MODE", 2, 1)]);
        assert_eq!(reg.fields[1].width(), 2);
    }

    #[test]
    fn test_flush_on_transition() {
        let mut scanner = RegisterScanner::new(FieldPolicy::Skip);
        assert!(!scanner.has_open_register());
        scanner.push_row(&row("A", "RW", "X", Cell::Empty)).unwrap();
        assert!(scanner.has_open_register());
        assert!(scanner.flushed().registers.is_empty());
        scanner.push_row(&row("", "", "Y [3:1]", Cell::Empty)).unwrap();
        assert!(scanner.flushed().registers.is_empty());
        scanner.push_row(&row("B", "RO", "", Cell::Empty)).unwrap();
        assert_eq!(scanner.flushed().registers.len(), 1);
        assert_eq!(scanner.flushed().registers[0].fields.len(), 2);
        let table = scanner.finish().unwrap();
        assert_eq!(table.registers.len(), 2);
        assert_eq!(table.registers[1].name, "B");
        assert!(table.registers[1].fields.is_empty());
    }

    #[test]
    fn test_metadata_comes_from_opening_row() {
        let rows = [
            row("STATUS_REG", "RO", "BUSY [0:0]", Cell::Int(1)),
            row("", "WO", "ERROR [1:1]", Cell::Int(9)),
            row("DATA_REG", "RW", "DATA [31:0]", Cell::Empty),
        ];
        let table = scan_rows(&rows, FieldPolicy::Skip).unwrap();
        assert_eq!(table.registers[0].access, "RO");
        assert_eq!(table.registers[0].default_value, Cell::Int(1));
        assert_eq!(table.registers[1].access, "RW");
        assert!(table.registers[1].default_value.is_blank());
    }

    #[test]
    fn test_leading_rows_without_register_are_dropped() {
        let rows = [
            row("", "", "ORPHAN [1:0]", Cell::Empty),
            row("REG", "RW", "", Cell::Empty),
            row("", "", "KEPT", Cell::Empty),
        ];
        let table = scan_rows(&rows, FieldPolicy::Skip).unwrap();
        assert_eq!(table.registers.len(), 1);
        assert_eq!(table.registers[0].fields, vec![field("KEPT", 0, 0)]);
    }

    #[test]
    fn test_names_and_fields_are_trimmed() {
        let rows = [row("  REG  ", "RW", "  F [1:0]  ", Cell::Empty)];
        let table = scan_rows(&rows, FieldPolicy::Skip).unwrap();
        assert_eq!(table.registers[0].name, "REG");
        assert_eq!(table.registers[0].fields, vec![field("F", 1, 0)]);
    }

    #[test]
    fn test_malformed_fields_are_skipped() {
        let rows = [
            row("REG", "RW", "123abc", Cell::Empty),
            row("", "", "OK [7:0]", Cell::Empty),
            row("", "", "EMPTY [0:1]", Cell::Empty),
        ];
        let table = scan_rows(&rows, FieldPolicy::Skip).unwrap();
        let reg = &table.registers[0];
        assert_eq!(reg.fields, vec![field("OK", 7, 0)]);
        assert_eq!(
            reg.skipped,
            vec![
                SkippedField {
                    raw: "123abc".into(),
                    reason: FieldParseError::NotAnIdentifier
                },
                SkippedField {
                    raw: "EMPTY [0:1]".into(),
                    reason: FieldParseError::ZeroWidth { msb: 0, lsb: 1 }
                },
            ]
        );
    }

    #[test]
    fn test_malformed_field_error_policy() {
        let rows = [
            row("REG", "RW", "OK", Cell::Empty),
            row("", "", "9LIVES", Cell::Empty),
        ];
        match scan_rows(&rows, FieldPolicy::Error) {
            Err(Error::MalformedField {
                register,
                field,
                reason,
            }) => {
                assert_eq!(register, "REG");
                assert_eq!(field, "9LIVES");
                assert_eq!(reason, FieldParseError::NotAnIdentifier);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_are_emitted_separately() {
        let rows = [
            row("A", "RW", "X", Cell::Empty),
            row("B", "RW", "Y", Cell::Empty),
            row("A", "RO", "Z", Cell::Empty),
        ];
        let table = scan_rows(&rows, FieldPolicy::Skip).unwrap();
        let names: Vec<_> = table.registers.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "A"]);
        assert_eq!(table.registers[2].fields, vec![field("Z", 0, 0)]);
        assert_eq!(table.unique_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_input() {
        let rows: [RegisterRow; 0] = [];
        let table = scan_rows(&rows, FieldPolicy::Skip).unwrap();
        assert!(table.registers.is_empty());
    }
}
