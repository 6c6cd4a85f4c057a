// Licensed under the Apache-2.0 license

//! Turns a spreadsheet register table into a UVM register model.
//!
//! The pipeline is [`normalize`] (header check and column mapping),
//! [`scan_rows`] (grouping rows into registers), [`render`] (text) and
//! [`diagnose`] (what the text does not reflect). [`generate`] runs all of
//! them and writes the result.

mod codegen;
mod config;
mod diagnostics;
mod error;
mod field;
mod generate;
mod scan;
mod schema;
mod table;

pub use codegen::*;
pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use field::*;
pub use generate::*;
pub use scan::*;
pub use schema::*;
pub use table::*;
