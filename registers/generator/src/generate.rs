// Licensed under the Apache-2.0 license

use crate::codegen::render;
use crate::config::GeneratorConfig;
use crate::diagnostics::{diagnose, Diagnostic};
use crate::error::Error;
use crate::scan::scan_rows;
use crate::schema::RegisterTable;
use crate::table::normalize;
use registers_sheet::{FsTableSource, RawTable, TableSource};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The result of running a table through the whole pipeline, before
/// anything is written.
#[derive(Clone, Debug)]
pub struct Generated {
    pub table: RegisterTable,
    pub diagnostics: Vec<Diagnostic>,
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub registers: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalizes, groups and renders an in-memory table.
pub fn generate_text(raw: &RawTable, config: &GeneratorConfig) -> Result<Generated, Error> {
    let rows = normalize(raw)?;
    let table = scan_rows(&rows, config.on_malformed_field)?;
    let diagnostics = diagnose(&table);
    let text = render(&table, config);
    Ok(Generated {
        table,
        diagnostics,
        text,
    })
}

/// Reads `input` from `source` and runs it through [`generate_text`].
pub fn load(
    source: &impl TableSource,
    input: &Path,
    config: &GeneratorConfig,
) -> Result<Generated, Error> {
    let raw = source.read_table(input)?;
    generate_text(&raw, config)
}

/// Generates the register model for `input` and writes it to `output`.
///
/// The text is rendered completely before the destination is touched and is
/// then moved into place from a temporary file in the same directory, so on
/// any error no output file is created and an existing one is left alone.
/// Two calls writing the same `output` at once are not coordinated; the
/// last one to finish wins.
pub fn generate(
    source: &impl TableSource,
    input: &Path,
    output: &Path,
    config: &GeneratorConfig,
) -> Result<GenerateReport, Error> {
    let generated = load(source, input, config)?;
    for diagnostic in generated.diagnostics.iter() {
        log::warn!("{diagnostic}");
    }
    write_file(output, &generated.text)?;
    log::info!("UVM RAL file generated: {}", output.display());
    Ok(GenerateReport {
        output: output.to_path_buf(),
        registers: generated.table.registers.len(),
        diagnostics: generated.diagnostics,
    })
}

/// Reads a spreadsheet from disk and writes the register model with the
/// default configuration.
///
/// Failures are logged and swallowed: the only sign of one is that
/// `output` was not created.
pub fn excel_to_uvm_ral(input: &Path, output: &Path) {
    if let Err(e) = generate(
        &FsTableSource::new(),
        input,
        output,
        &GeneratorConfig::default(),
    ) {
        log::error!("Error: {e}");
    }
}

fn write_file(dest: &Path, contents: &str) -> Result<(), Error> {
    let write_err = |err| Error::Write {
        path: dest.to_path_buf(),
        err,
    };
    let dir = match dest.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(dest).map_err(|e| write_err(e.error))?;
    Ok(())
}
