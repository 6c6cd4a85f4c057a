// Licensed under the Apache-2.0 license

use crate::error::FieldParseError;
use crate::schema::RegisterTable;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;

/// Something in the table that the generated model does not reflect.
///
/// None of these change the output; they are reported so a caller can
/// decide whether to trust it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    SkippedField {
        register: String,
        field: String,
        reason: String,
    },
    DuplicateRegister {
        name: String,
    },
    /// The table asks for an offset or access mode that the memory map,
    /// which always uses offset 0 and "RW", does not apply.
    MapEntryIgnored {
        register: String,
        offset: String,
        access: String,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SkippedField {
                register,
                field,
                reason,
            } => write!(f, "register {register:?}: skipped field {field:?} ({reason})"),
            Self::DuplicateRegister { name } => write!(
                f,
                "register {name:?} is defined more than once; only one instance is added to the block"
            ),
            Self::MapEntryIgnored {
                register,
                offset,
                access,
            } => write!(
                f,
                "register {register:?}: table offset {offset:?} / access {access:?} is not used; mapped at 'h0 with \"RW\""
            ),
        }
    }
}

fn skipped(register: &str, field: &str, reason: &FieldParseError) -> Diagnostic {
    Diagnostic::SkippedField {
        register: register.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

pub fn diagnose(table: &RegisterTable) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for reg in table.registers.iter() {
        for s in reg.skipped.iter() {
            diagnostics.push(skipped(&reg.name, &s.raw, &s.reason));
        }
        if !seen.insert(reg.name.as_str()) {
            if reported.insert(reg.name.as_str()) {
                diagnostics.push(Diagnostic::DuplicateRegister {
                    name: reg.name.clone(),
                });
            }
            continue;
        }
        let offset_is_zero = reg.offset.is_blank() || reg.offset.as_u64() == Some(0);
        let access_is_rw = reg.access.trim().eq_ignore_ascii_case("rw");
        if !offset_is_zero || !access_is_rw {
            diagnostics.push(Diagnostic::MapEntryIgnored {
                register: reg.name.clone(),
                offset: reg.offset.text_or_empty(),
                access: reg.access.clone(),
            });
        }
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, RegisterSpec, SkippedField};
    use registers_sheet::Cell;

    fn reg(name: &str, offset: Cell, access: &str) -> RegisterSpec {
        RegisterSpec {
            name: name.into(),
            offset,
            access: access.into(),
            default_value: Cell::Empty,
            fields: vec![FieldSpec {
                name: "F".into(),
                msb: 0,
                lsb: 0,
            }],
            skipped: vec![],
        }
    }

    #[test]
    fn test_clean_table() {
        let table = RegisterTable {
            registers: vec![
                reg("A", Cell::Text("0x00".into()), "RW"),
                reg("B", Cell::Empty, "rw"),
                reg("C", Cell::Int(0), " RW "),
            ],
        };
        assert!(diagnose(&table).is_empty());
    }

    #[test]
    fn test_map_entry_ignored() {
        let table = RegisterTable {
            registers: vec![
                reg("CTRL_REG", Cell::Text("0x00".into()), "RW"),
                reg("STATUS_REG", Cell::Text("0x04".into()), "RO"),
                reg("DATA_REG", Cell::Text("0x08".into()), "RW"),
                reg("ID_REG", Cell::Empty, "RO"),
            ],
        };
        assert_eq!(
            diagnose(&table),
            vec![
                Diagnostic::MapEntryIgnored {
                    register: "STATUS_REG".into(),
                    offset: "0x04".into(),
                    access: "RO".into()
                },
                Diagnostic::MapEntryIgnored {
                    register: "DATA_REG".into(),
                    offset: "0x08".into(),
                    access: "RW".into()
                },
                Diagnostic::MapEntryIgnored {
                    register: "ID_REG".into(),
                    offset: "".into(),
                    access: "RO".into()
                },
            ]
        );
    }

    #[test]
    fn test_skipped_and_duplicates() {
        let mut a = reg("A", Cell::Empty, "RW");
        a.skipped.push(SkippedField {
            raw: "1BAD".into(),
            reason: FieldParseError::NotAnIdentifier,
        });
        let table = RegisterTable {
            registers: vec![
                a,
                reg("A", Cell::Empty, "RW"),
                reg("A", Cell::Empty, "RW"),
            ],
        };
        let diagnostics = diagnose(&table);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics[0].to_string(),
            "register \"A\": skipped field \"1BAD\" (does not start with an identifier)"
        );
        assert_eq!(
            diagnostics[1],
            Diagnostic::DuplicateRegister { name: "A".into() }
        );
    }
}
