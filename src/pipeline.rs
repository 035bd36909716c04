//! Load → aggregate → plan → render

use crate::parsing::{load_tables, ParsingError};
use crate::plots::{plan_chart, render_chart, ChartPlan, PlotError, RenderOptions};
use crate::settings::PlotSettings;
use crate::table::Table;
use thiserror::Error;
use tracing::info;

/// Errors that can occur during a plotting run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("Plotting error: {0}")]
    Plot(#[from] PlotError),
}

/// Runs the whole pipeline for `settings` and returns the plan that was drawn
///
/// # Returns
/// * `Ok(ChartPlan)` - If the chart was written to `settings.output`
/// * `Err(PipelineError)` - On the first load, planning or drawing failure
pub fn run(settings: &PlotSettings) -> Result<ChartPlan, PipelineError> {
    let tables = load_tables(&settings.inputs)?;
    let aggregated: Vec<Table> = tables.iter().map(Table::cumulative_sum).collect();

    let table_count = settings.effective_table_count();
    info!(
        loaded = aggregated.len(),
        plotted = table_count,
        "Aggregated cumulative times"
    );

    let plan = plan_chart(&aggregated, table_count, settings.samples, &settings.labels)?;
    render_chart(&plan, &RenderOptions::from(settings), &settings.output)?;
    Ok(plan)
}
