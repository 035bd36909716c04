//! Chart rendering for cumulative time series
//!
//! Charts are planned first ([`plan_chart`]) and then drawn with the
//! [`plotters`] crate onto a bitmap, SVG or PGF backend ([`render_chart`]).

pub mod dash;
pub mod format;
pub mod pgf;
pub mod plan;
pub mod render;
pub mod style;

pub use format::OutputFormat;
pub use plan::{legend_layout, plan_chart, ChartPlan, LegendEntry, SeriesSpec};
pub use render::{render_chart, RenderOptions};
pub use style::{LineStyle, PALETTE};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during plot generation
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("No tables to plot")]
    NothingToPlot,

    #[error("Table {index} requested but only {available} were loaded")]
    MissingTable { index: usize, available: usize },

    #[error("Table {table} has no color, the palette holds {colors}")]
    PaletteExhausted { table: usize, colors: usize },

    #[error("Row {row} has no line style, only {styles} are available")]
    StylesExhausted { row: usize, styles: usize },

    #[error("Table {table} has {columns} columns but {samples} x samples were requested")]
    ShapeMismatch {
        table: usize,
        samples: usize,
        columns: usize,
    },

    #[error("Row {row} has no legend label, only {labels} were given")]
    MissingLabel { row: usize, labels: usize },

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Figure of {width_inches}x{height_inches} in at {dpi} dpi has no drawable area")]
    InvalidFigure {
        width_inches: f64,
        height_inches: f64,
        dpi: u32,
    },

    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),
}

type Result<T> = core::result::Result<T, PlotError>;
