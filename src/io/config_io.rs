use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::config::PlannerConfig;

pub const CONFIG_FILE: &str = "planner.toml";

/// Error type for planner.toml I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse planner.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit planner.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
}

/// Read planner.toml from `dir`. A missing file means all defaults.
pub fn read_config(dir: &Path) -> Result<PlannerConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(PlannerConfig::default()),
        Err(e) => Err(ConfigError::ReadError { path, source: e }),
    }
}

/// Parse config text as an editable document, keeping comments and layout.
pub fn parse_config_doc(text: &str) -> Result<toml_edit::DocumentMut, ConfigError> {
    Ok(text.parse::<toml_edit::DocumentMut>()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(dir: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let path = dir.join(CONFIG_FILE);
    fs::write(&path, doc.to_string()).map_err(|e| ConfigError::WriteError { path, source: e })
}

/// Point the store at a different data file.
pub fn set_data_file(doc: &mut toml_edit::DocumentMut, file: &str) {
    if !doc.contains_key("store") {
        doc["store"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["store"]["file"] = toml_edit::value(file);
}
