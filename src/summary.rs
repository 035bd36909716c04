//! Console summary of a planned chart
//!
//! One line per series with its final cumulative time, formatted as an ASCII
//! table using the [`tabled`] crate.

use crate::plots::ChartPlan;
use tabled::{Table, Tabled};

/// Final cumulative value of a single series
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct SeriesSummary {
    #[tabled(rename = "Table")]
    pub table: usize,
    #[tabled(rename = "Row")]
    pub row: usize,
    /// Legend label of the row, `-` if the legend has no entry for it.
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Points")]
    pub points: usize,
    #[tabled(rename = "Total")]
    pub total: String,
}

/// Summarizes every series of a plan, in drawing order.
pub fn summarize(plan: &ChartPlan) -> Vec<SeriesSummary> {
    plan.series
        .iter()
        .map(|series| SeriesSummary {
            table: series.table,
            row: series.row,
            label: plan
                .legend
                .get(series.row)
                .map_or_else(|| "-".to_string(), |entry| entry.label.clone()),
            points: series.points.len(),
            total: series
                .points
                .last()
                .map_or_else(|| "-".to_string(), |(_, total)| format!("{total:.3}")),
        })
        .collect()
}

/// Formats summaries as an ASCII table
pub fn format_summary_table(summaries: &[SeriesSummary]) -> String {
    if summaries.is_empty() {
        return "No series plotted".to_string();
    }

    let title = "Cumulative Time per Series";
    format!(
        "{}\n{}\n{}",
        title,
        "=".repeat(title.len()),
        Table::new(summaries)
    )
}
