//! Dashboard settings.
//!
//! Defaults, then an optional JSON file, then the `SUNSPOT_CSV` environment variable.

use crate::charts::DEFAULT_VALUE_COLUMN;
use crate::data::LoaderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "sunspot_dashboard.json";

/// Environment variable overriding the data source path.
pub const CSV_PATH_ENV: &str = "SUNSPOT_CSV";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// User settings for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub csv_path: String,
    pub year_column: String,
    pub value_column: String,
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        let loader = LoaderOptions::default();
        Self {
            csv_path: "data/sunspots.csv".to_string(),
            year_column: loader.year_column,
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
            export_width: 1500,
            export_height: 1200,
        }
    }
}

impl DashboardSettings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply a data path override, ignoring blank values.
    pub fn with_csv_override(mut self, csv_path: Option<String>) -> Self {
        if let Some(path) = csv_path.filter(|p| !p.trim().is_empty()) {
            log::info!("Using data path from {}: {}", CSV_PATH_ENV, path);
            self.csv_path = path;
        }
        self
    }

    /// Settings file plus environment overrides.
    pub fn resolve(path: &Path) -> Result<Self, SettingsError> {
        Ok(Self::load_or_default(path)?.with_csv_override(std::env::var(CSV_PATH_ENV).ok()))
    }

    /// Columns the loader must find. The plotted column is always required.
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            year_column: self.year_column.clone(),
            activity_column: self.value_column.clone(),
        }
    }

    pub fn export_size(&self) -> (u32, u32) {
        (self.export_width.max(1), self.export_height.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_dataset() {
        let settings = DashboardSettings::default();
        assert_eq!(settings.csv_path, "data/sunspots.csv");
        assert_eq!(settings.value_column, "SUNACTIVITY");
        assert_eq!(settings.export_size(), (1500, 1200));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings =
            DashboardSettings::load_or_default(Path::new("no/such/settings.json")).unwrap();
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings: DashboardSettings =
            serde_json::from_str(r#"{ "value_column": "SMOOTHED" }"#).unwrap();
        assert_eq!(settings.value_column, "SMOOTHED");
        assert_eq!(settings.year_column, "YEAR");
        assert_eq!(settings.loader_options().activity_column, "SMOOTHED");
    }

    #[test]
    fn csv_override_ignores_blank() {
        let settings = DashboardSettings::default().with_csv_override(Some("  ".to_string()));
        assert_eq!(settings.csv_path, "data/sunspots.csv");

        let settings = DashboardSettings::default().with_csv_override(Some("other.csv".into()));
        assert_eq!(settings.csv_path, "other.csv");
    }
}
