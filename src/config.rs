//! Dashboard Configuration
//! Data locations and display settings, optionally read from a JSON file.

use crate::data::{SourcePaths, INCOME_STEP};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the three source files.
    pub data_dir: PathBuf,
    pub obesity_file: String,
    pub household_file: String,
    pub gdp_file: String,
    /// Step of the income range slider.
    pub income_step: f64,
    /// Diameter in pixels of the bubble for the largest GDP.
    pub bubble_size_max: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            obesity_file: "Obesity.csv".to_string(),
            household_file: "Household.csv".to_string(),
            gdp_file: "GDP.csv".to_string(),
            income_step: INCOME_STEP,
            bubble_size_max: 60.0,
            window_width: 1400.0,
            window_height: 900.0,
        }
    }
}

impl DashboardConfig {
    /// Load a JSON config file. Relative data directories resolve against
    /// the file's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: DashboardConfig = serde_json::from_str(&text)?;
        if config.data_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.data_dir = parent.join(&config.data_dir);
            }
        }
        Ok(config)
    }

    /// Build from command-line arguments (program name excluded).
    ///
    /// A `.json` argument is a config file; anything else is a data directory.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        match args.into_iter().next() {
            Some(arg) if arg.ends_with(".json") => Self::load(Path::new(&arg)),
            Some(arg) => Ok(Self {
                data_dir: PathBuf::from(arg),
                ..Default::default()
            }),
            None => Ok(Self::default()),
        }
    }

    pub fn source_paths(&self) -> SourcePaths {
        SourcePaths {
            obesity: self.data_dir.join(&self.obesity_file),
            household: self.data_dir.join(&self.household_file),
            gdp: self.data_dir.join(&self.gdp_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.income_step, 5000.0);
        assert_eq!(config.source_paths(), SourcePaths::in_dir(Path::new(".")));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "gdp_file": "gdp_by_state.csv", "income_step": 1000 }"#)
                .unwrap();

        assert_eq!(config.gdp_file, "gdp_by_state.csv");
        assert_eq!(config.income_step, 1000.0);
        assert_eq!(config.obesity_file, "Obesity.csv");
        assert_eq!(config.source_paths().gdp, PathBuf::from("./gdp_by_state.csv"));
    }

    #[test]
    fn test_invalid_json() {
        let result: Result<DashboardConfig, _> = serde_json::from_str("{ not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_args_data_dir() {
        let config = DashboardConfig::from_args(vec!["/srv/data".to_string()]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));

        let config = DashboardConfig::from_args(Vec::new()).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_args_missing_config_file() {
        let result = DashboardConfig::from_args(vec!["nowhere/dashboard.json".to_string()]);
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
