// Licensed under the Apache-2.0 license

use anyhow::{bail, Result};
use registers_generator::{
    generate, load, Diagnostic, FieldPolicy, GeneratorConfig, RegisterTable,
};
use registers_sheet::FsTableSource;
use serde::Serialize;
use std::path::Path;

pub(crate) fn load_config(
    path: Option<&Path>,
    strict: bool,
    block_name: &Option<String>,
    sheet: &Option<String>,
) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if strict {
        config.on_malformed_field = FieldPolicy::Error;
    }
    if let Some(block_name) = block_name {
        config.block_name = block_name.clone();
    }
    if sheet.is_some() {
        config.sheet = sheet.clone();
    }
    Ok(config)
}

fn source(config: &GeneratorConfig) -> FsTableSource {
    FsTableSource::new().with_sheet(config.sheet.clone())
}

pub(crate) fn autogen(
    check: bool,
    input: &Path,
    output: &Path,
    config: &GeneratorConfig,
) -> Result<()> {
    if check {
        let generated = load(&source(config), input, config)?;
        for diagnostic in generated.diagnostics.iter() {
            log::warn!("{diagnostic}");
        }
        file_check_contents(input, output, &generated.text)
    } else {
        let report = generate(&source(config), input, output, config)?;
        log::debug!(
            "{} registers, {} diagnostics",
            report.registers,
            report.diagnostics.len()
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct Inspection<'a> {
    #[serde(flatten)]
    table: &'a RegisterTable,
    diagnostics: &'a [Diagnostic],
}

pub(crate) fn inspect(input: &Path, config: &GeneratorConfig) -> Result<()> {
    println!("{}", inspect_json(input, config)?);
    Ok(())
}

fn inspect_json(input: &Path, config: &GeneratorConfig) -> Result<String> {
    let generated = load(&source(config), input, config)?;
    Ok(serde_json::to_string_pretty(&Inspection {
        table: &generated.table,
        diagnostics: &generated.diagnostics,
    })?)
}

fn file_check_contents(input: &Path, dest_file: &Path, expected_contents: &str) -> Result<()> {
    log::info!("Checking file {dest_file:?}");
    let actual_contents = std::fs::read(dest_file)?;
    if actual_contents != expected_contents.as_bytes() {
        bail!(
            "{dest_file:?} does not match the register model generated from {input:?}. \
            Run \"cargo xtask ral-autogen\" without --check to update this file."
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTERS: &str = "Register Name,Offset,Read/Write,Fields,Default value,Reset value,Description\n\
        CTRL_REG,0x00,RW,ENABLE [0:0],0,0,Control Register\n\
        ,,,MODE [2:1],0,0,Operating Mode\n\
        STATUS_REG,0x04,RO,BUSY [0:0],0,0,Busy Status\n";

    #[test]
    fn test_check_mode() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("regs.csv");
        let output = dir.path().join("uvm_ral_model.sv");
        std::fs::write(&input, REGISTERS).unwrap();
        let config = GeneratorConfig::default();

        // nothing to compare against yet
        assert!(autogen(true, &input, &output, &config).is_err());
        autogen(false, &input, &output, &config).unwrap();
        autogen(true, &input, &output, &config).unwrap();

        std::fs::write(&output, "stale").unwrap();
        let err = autogen(true, &input, &output, &config).unwrap_err();
        assert!(err.to_string().contains("does not match"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "stale");
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ral.toml");
        std::fs::write(&path, "block_name = \"from_file\"\nsheet = \"Regs\"\n").unwrap();

        let config = load_config(Some(&path), false, &None, &None).unwrap();
        assert_eq!(config.block_name, "from_file");
        assert_eq!(config.on_malformed_field, FieldPolicy::Skip);

        let config =
            load_config(Some(&path), true, &Some("from_flag".into()), &None).unwrap();
        assert_eq!(config.block_name, "from_flag");
        assert_eq!(config.sheet.as_deref(), Some("Regs"));
        assert_eq!(config.on_malformed_field, FieldPolicy::Error);
    }

    #[test]
    fn test_inspect_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("regs.csv");
        std::fs::write(&input, REGISTERS).unwrap();
        let json = inspect_json(&input, &GeneratorConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["registers"].as_array().unwrap().len(), 2);
        assert_eq!(value["registers"][0]["name"], "CTRL_REG");
        assert_eq!(value["registers"][0]["fields"][1]["msb"], 2);
        assert_eq!(value["diagnostics"][0]["kind"], "map_entry_ignored");
        assert_eq!(value["diagnostics"][0]["register"], "STATUS_REG");
    }
}
