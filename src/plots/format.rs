//! Output format selection

use super::{PlotError, Result};
use std::path::Path;

/// File formats a chart can be written as, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raster image (`png`, `bmp`, `jpg`, `jpeg`); encoding follows the extension.
    Bitmap,
    /// Scalable vector graphics.
    Svg,
    /// PGF picture for `\input` into LaTeX documents.
    Pgf,
}

impl OutputFormat {
    /// Picks the format from the extension of `path` (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png" | "bmp" | "jpg" | "jpeg") => Ok(OutputFormat::Bitmap),
            Some("svg") => Ok(OutputFormat::Svg),
            Some("pgf") => Ok(OutputFormat::Pgf),
            _ => Err(PlotError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Whether text is typeset by LaTeX, so math markup is kept as-is.
    pub fn typesets_latex(self) -> bool {
        self == OutputFormat::Pgf
    }
}
