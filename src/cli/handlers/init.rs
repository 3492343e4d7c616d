use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io::{self, CONFIG_FILE};
use crate::model::config::DEFAULT_DATA_FILE;

pub const PLANNER_TOML_TEMPLATE: &str = include_str!("../../templates/planner.toml");

/// The planner.toml document, pointing the store at `file` when given.
pub fn planner_doc(file: Option<&str>) -> Result<toml_edit::DocumentMut, config_io::ConfigError> {
    let mut doc = config_io::parse_config_doc(PLANNER_TOML_TEMPLATE)?;
    if let Some(file) = file {
        config_io::set_data_file(&mut doc, file);
    }
    Ok(doc)
}

pub fn cmd_init(dir: &Path, args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )
        .into());
    }
    if let Some(file) = args.file.as_deref()
        && file.trim().is_empty()
    {
        return Err("--file cannot be empty".into());
    }

    let doc = planner_doc(args.file.as_deref())?;
    config_io::write_config(dir, &doc)?;

    println!(
        "Initialized {} (guest list: {})",
        config_path.display(),
        args.file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    );
    Ok(())
}
