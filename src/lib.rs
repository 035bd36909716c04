//! # outcomes-plotter
//! Cumulative model-checking time charts from benchmark outcome CSVs.
//!
//! Each input file is a table whose rows are benchmark configurations and whose
//! columns are the times spent on successive formulas. Every row is turned into
//! a running total and drawn as one line: the table picks the color, the row
//! picks the dash pattern.

pub mod cli;
pub mod parsing;
pub mod pipeline;
pub mod settings;
pub mod summary;
pub mod table;

/// Chart planning and rendering.
pub mod plots;

pub use pipeline::{run, PipelineError};
pub use settings::PlotSettings;
pub use table::Table;
