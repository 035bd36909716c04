//! Command line entry point: set up logging, resolve settings, plot.

use outcomes_plotter::cli::Args;
use outcomes_plotter::settings::SettingsError;
use outcomes_plotter::summary::{format_summary_table, summarize};
use outcomes_plotter::{run, PipelineError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors that can end a run
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Args = argh::from_env();
    let settings = args.to_settings()?;
    let plan = run(&settings)?;

    if args.summary {
        println!("{}", format_summary_table(&summarize(&plan)));
    }

    Ok(())
}
