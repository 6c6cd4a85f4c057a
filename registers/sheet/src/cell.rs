// Licensed under the Apache-2.0 license.

use calamine::Data;
use serde::Serialize;
use std::fmt::Display;

/// A single spreadsheet value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Error(String),
}

impl Cell {
    /// Types a textual value the way a spreadsheet would: blank text is a
    /// missing value, plain decimal numbers are numbers, anything else stays
    /// text (so `0x04` is still `Text("0x04")`).
    pub fn from_text(s: &str) -> Cell {
        if s.trim().is_empty() {
            return Cell::Empty;
        }
        let t = s.trim();
        if let Ok(i) = t.parse::<i64>() {
            return Cell::Int(i);
        }
        if t.chars().any(|c| c.is_ascii_digit()) && t.chars().all(|c| "0123456789.-+eE".contains(c))
        {
            if let Ok(f) = t.parse::<f64>() {
                return Cell::Float(f);
            }
        }
        Cell::Text(s.to_string())
    }

    /// True for missing values.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// The cell rendered as text, with missing values as the empty string.
    pub fn text_or_empty(&self) -> String {
        if self.is_blank() {
            String::new()
        } else {
            self.to_string()
        }
    }

    /// Reads the cell as a non-negative integer, accepting `0x` hex text.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Cell::Int(i) => u64::try_from(*i).ok(),
            Cell::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64 => {
                Some(*f as u64)
            }
            Cell::Text(s) => {
                let s = s.trim().replace('_', "");
                if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                    u64::from_str_radix(hex, 16).ok()
                } else {
                    s.parse().ok()
                }
            }
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(i) => write!(f, "{i}"),
            // f64's Display already drops a zero fraction: 5.0 prints as "5"
            Cell::Float(x) => write!(f, "{x}"),
            Cell::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Error(e) => write!(f, "{e}"),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Float(*f),
            Data::Bool(b) => Cell::Bool(*b),
            Data::String(s) if s.trim().is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Error(e) => Cell::Error(e.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}
