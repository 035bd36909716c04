//! Plot settings
//!
//! Settings are resolved in layers: built-in defaults, then an optional JSON
//! settings file, then command line flags (see [`crate::cli`]).

use crate::plots::RenderOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default outcome files: 50 formulas of height 16, pruning factors 0.2 and 0.5.
pub const DEFAULT_INPUTS: [&str; 2] = [
    "50_16_1/50.0_20.0_16.0_1.0_1000.0_0.2_1000.0_1.0.csv",
    "50_16_1/50.0_20.0_16.0_1.0_1000.0_0.5_1000.0_1.0.csv",
];

/// Default legend labels, one per memoization heuristic (row).
pub const DEFAULT_LABELS: [&str; 6] = [
    "h_{memo}^{single}",
    "h_{memo}^{multi}=0",
    "h_{memo}^{multi}=1",
    "h_{memo}^{multi}=2",
    "h_{memo}^{multi}=4",
    "h_{memo}^{multi}=8",
];

/// Errors that can occur while loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Everything that controls a plotting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotSettings {
    /// Outcome CSV files, one table each, in plotting order.
    pub inputs: Vec<PathBuf>,
    /// Output file; the extension selects the format.
    pub output: PathBuf,
    /// Number of x samples per line. [`None`] uses the column count.
    pub samples: Option<usize>,
    /// Number of leading tables to plot. [`None`] plots every input.
    pub table_count: Option<usize>,
    /// Legend labels by row index.
    pub labels: Vec<String>,
    pub legend_columns: usize,
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: u32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            inputs: DEFAULT_INPUTS.iter().map(PathBuf::from).collect(),
            output: PathBuf::from("cumulative_time.png"),
            samples: None,
            table_count: None,
            labels: DEFAULT_LABELS.iter().map(|label| label.to_string()).collect(),
            legend_columns: render.legend_columns,
            width_inches: render.width_inches,
            height_inches: render.height_inches,
            dpi: render.dpi,
        }
    }
}

impl PlotSettings {
    /// Loads settings from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SettingsError::JsonParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of tables that will be plotted.
    pub fn effective_table_count(&self) -> usize {
        self.table_count.unwrap_or(self.inputs.len())
    }
}

impl From<&PlotSettings> for RenderOptions {
    fn from(settings: &PlotSettings) -> Self {
        RenderOptions {
            width_inches: settings.width_inches,
            height_inches: settings.height_inches,
            dpi: settings.dpi,
            legend_columns: settings.legend_columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_describe_the_pruning_factor_comparison() {
        let settings = PlotSettings::default();
        assert_eq!(settings.inputs.len(), 2);
        assert_eq!(settings.effective_table_count(), 2);
        assert_eq!(settings.labels.len(), 6);
        assert_eq!(settings.legend_columns, 1);
        assert_eq!(RenderOptions::from(&settings).pixel_size(), (520, 320));
    }

    #[test]
    fn json_file_overrides_only_given_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "inputs": ["a.csv"], "legend_columns": 3, "output": "figure.pgf" }"#,
        )
        .unwrap();

        let settings = PlotSettings::from_json_file(&path).unwrap();
        assert_eq!(settings.inputs, vec![PathBuf::from("a.csv")]);
        assert_eq!(settings.legend_columns, 3);
        assert_eq!(settings.output, PathBuf::from("figure.pgf"));
        assert_eq!(settings.labels, PlotSettings::default().labels);
        assert_eq!(settings.dpi, 80);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "colour": "red" }"#).unwrap();

        assert!(matches!(
            PlotSettings::from_json_file(&path),
            Err(SettingsError::JsonParse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            PlotSettings::from_json_file(&dir.path().join("missing.json")),
            Err(SettingsError::FileRead { .. })
        ));
    }
}
