// Licensed under the Apache-2.0 license

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a `Fields` cell that cannot be parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Drop the field and keep going; the drop is reported as a diagnostic.
    #[default]
    Skip,
    /// Fail the whole generation.
    Error,
}

/// Names used in the generated register model, plus input options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Class name of the generated `uvm_reg_block`.
    pub block_name: String,
    /// Name passed to `create_map`.
    pub map_name: String,
    /// Macro used for the `ifndef/define include guard.
    pub include_guard: String,
    /// Worksheet to read; the first one when unset.
    pub sheet: Option<String>,
    pub on_malformed_field: FieldPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            block_name: "dma_reg_model".into(),
            map_name: "my_map".into(),
            include_guard: "REG_MODEL".into(),
            sheet: None,
            on_malformed_field: FieldPolicy::Skip,
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml(path: &Path, contents: &str) -> Result<Self, Error> {
        toml::from_str(contents).map_err(|err| Error::ConfigParse {
            path: path.to_path_buf(),
            err,
        })
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|err| Error::ConfigRead {
            path: path.to_path_buf(),
            err,
        })?;
        Self::from_toml(path, &contents)
    }
}
