use serde::{Deserialize, Serialize};

use super::guest::{CATEGORIES, EVENTS};

/// Configuration from planner.toml. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub guests: GuestRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Default: see src/templates/planner.toml
    #[serde(default = "default_data_file")]
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            file: default_data_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Suggested name for the downloadable copy
    #[serde(default = "default_export_name")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            file_name: default_export_name(),
        }
    }
}

/// Choices the input boundary offers for the enum-like text columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRules {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default = "default_events")]
    pub events: Vec<String>,
}

impl Default for GuestRules {
    fn default() -> Self {
        GuestRules {
            categories: default_categories(),
            events: default_events(),
        }
    }
}

pub const DEFAULT_DATA_FILE: &str = "guest_list.csv";
pub const EXPORT_FILE_NAME: &str = "wedding_guests.csv";
pub const EXPORT_MEDIA_TYPE: &str = "text/csv";

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_export_name() -> String {
    EXPORT_FILE_NAME.to_string()
}

fn default_categories() -> Vec<String> {
    CATEGORIES.iter().map(|s| s.to_string()).collect()
}

fn default_events() -> Vec<String> {
    EVENTS.iter().map(|s| s.to_string()).collect()
}
