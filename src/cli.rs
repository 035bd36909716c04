//! Command line flags
//!
//! Flags are the last settings layer and override both the built-in defaults
//! and the JSON settings file.

use crate::settings::{PlotSettings, SettingsError};
use argh::FromArgs;
use std::path::PathBuf;

/// Plots cumulative model-checking time from benchmark outcome CSVs
#[derive(FromArgs, Debug, Default)]
pub struct Args {
    /// settings file (JSON); keys it omits keep their defaults
    #[argh(option)]
    pub config: Option<PathBuf>,

    /// input CSV file, repeat once per table (replaces the configured inputs)
    #[argh(option, short = 'i')]
    pub input: Vec<PathBuf>,

    /// output file; the extension selects png, bmp, jpg, svg or pgf
    #[argh(option, short = 'o')]
    pub output: Option<PathBuf>,

    /// number of x-axis samples per line (must equal the column count)
    #[argh(option, short = 'x')]
    pub samples: Option<usize>,

    /// number of leading tables to plot (default: all inputs)
    #[argh(option, short = 'n')]
    pub tables: Option<usize>,

    /// legend label, repeat once per row (replaces the configured labels)
    #[argh(option, short = 'l')]
    pub label: Vec<String>,

    /// number of legend columns
    #[argh(option, short = 'c')]
    pub legend_columns: Option<usize>,

    /// output resolution in dots per inch
    #[argh(option)]
    pub dpi: Option<u32>,

    /// print the final cumulative time of every series
    #[argh(switch, short = 's')]
    pub summary: bool,
}

impl Args {
    /// Resolves defaults, the optional settings file and these flags into [`PlotSettings`].
    pub fn to_settings(&self) -> Result<PlotSettings, SettingsError> {
        let mut settings = match &self.config {
            Some(path) => PlotSettings::from_json_file(path)?,
            None => PlotSettings::default(),
        };

        if !self.input.is_empty() {
            settings.inputs = self.input.clone();
        }
        if !self.label.is_empty() {
            settings.labels = self.label.clone();
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if self.samples.is_some() {
            settings.samples = self.samples;
        }
        if self.tables.is_some() {
            settings.table_count = self.tables;
        }
        if let Some(columns) = self.legend_columns {
            settings.legend_columns = columns;
        }
        if let Some(dpi) = self.dpi {
            settings.dpi = dpi;
        }

        Ok(settings)
    }
}
