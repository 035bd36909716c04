//! Series and legend planning
//!
//! Planning maps every row of every aggregated table onto a line with a fixed
//! color and dash style before any backend is touched, so the mapping can be
//! inspected (and tested) without producing an image.

use super::style::{LineStyle, PALETTE};
use super::{PlotError, Result};
use crate::table::{linspace, Table};
use plotters::style::RGBColor;
use tracing::debug;

/// Fraction of the data range added on each side of the axes.
const AXIS_MARGIN: f64 = 0.05;

/// A single line on the chart: one row of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    /// Index of the source table.
    pub table: usize,
    /// Row within the source table.
    pub row: usize,
    pub color: RGBColor,
    pub style: LineStyle,
    /// `(x, cumulative value)` pairs.
    pub points: Vec<(f64, f64)>,
}

/// A legend entry. Always drawn in black, independent of series colors.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub style: LineStyle,
}

/// Everything needed to draw the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub series: Vec<SeriesSpec>,
    pub legend: Vec<LegendEntry>,
}

/// Plans the chart for a list of row-wise cumulative tables
///
/// # Arguments
/// * `tables` - Aggregated tables, in plotting order
/// * `table_count` - How many of the leading tables to plot
/// * `samples` - Number of x samples per line; [`None`] uses each table's column count
/// * `labels` - Legend labels by row index
///
/// # Returns
/// * `Ok(ChartPlan)` - One series per row of every plotted table and one legend
///   entry per row of the last plotted table
/// * `Err(PlotError)` - If a table, color, style or label is missing, or the
///   sample count does not match the column count
pub fn plan_chart(
    tables: &[Table],
    table_count: usize,
    samples: Option<usize>,
    labels: &[String],
) -> Result<ChartPlan> {
    if table_count == 0 {
        return Err(PlotError::NothingToPlot);
    }

    let mut series = Vec::new();
    let mut last_rows = 0;

    for table_index in 0..table_count {
        let table = tables.get(table_index).ok_or(PlotError::MissingTable {
            index: table_index,
            available: tables.len(),
        })?;
        let color = *PALETTE
            .get(table_index)
            .ok_or(PlotError::PaletteExhausted {
                table: table_index,
                colors: PALETTE.len(),
            })?;

        let columns = table.columns();
        let sample_count = samples.unwrap_or(columns);
        if sample_count != columns {
            return Err(PlotError::ShapeMismatch {
                table: table_index,
                samples: sample_count,
                columns,
            });
        }

        let xs = linspace(1.0, columns as f64, sample_count);
        for (row_index, row) in table.iter_rows().enumerate() {
            let style = line_style(row_index)?;
            debug!(
                table = table_index,
                row = row_index,
                style = style.name(),
                "Planned series"
            );

            series.push(SeriesSpec {
                table: table_index,
                row: row_index,
                color,
                style,
                points: xs.iter().copied().zip(row.iter().copied()).collect(),
            });
        }

        last_rows = table.rows();
    }

    // Legend rows follow whichever table was plotted last.
    let legend = (0..last_rows)
        .map(|row| {
            let label = labels.get(row).ok_or(PlotError::MissingLabel {
                row,
                labels: labels.len(),
            })?;
            Ok(LegendEntry {
                label: label.clone(),
                style: line_style(row)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ChartPlan { series, legend })
}

fn line_style(row: usize) -> Result<LineStyle> {
    LineStyle::ALL
        .get(row)
        .copied()
        .ok_or(PlotError::StylesExhausted {
            row,
            styles: LineStyle::ALL.len(),
        })
}

impl ChartPlan {
    /// Axis ranges `(x, y)` fitted to all finite points, with a small margin.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points = self
            .series
            .iter()
            .flat_map(|series| series.points.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let mut x_range: Option<(f64, f64)> = None;
        let mut y_range: Option<(f64, f64)> = None;
        for &(x, y) in points {
            x_range = Some(x_range.map_or((x, x), |(lo, hi)| (lo.min(x), hi.max(x))));
            y_range = Some(y_range.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))));
        }

        (
            with_margin(x_range.unwrap_or((0.0, 1.0))),
            with_margin(y_range.unwrap_or((0.0, 1.0))),
        )
    }
}

fn with_margin((low, high): (f64, f64)) -> (f64, f64) {
    let span = high - low;
    if span <= 0.0 {
        let pad = if low == 0.0 { 0.5 } else { low.abs() * AXIS_MARGIN };
        return (low - pad, high + pad);
    }

    (low - span * AXIS_MARGIN, high + span * AXIS_MARGIN)
}

/// Cell `(column, row)` of every legend entry for a given number of columns.
///
/// Entries fill columns top to bottom. When the entries do not divide evenly,
/// the leftmost columns hold one extra entry.
pub fn legend_layout(entries: usize, columns: usize) -> Vec<(usize, usize)> {
    let columns = columns.max(1);
    let base = entries / columns;
    let extra = entries % columns;

    let mut cells = Vec::with_capacity(entries);
    for column in 0..columns {
        let height = base + usize::from(column < extra);
        cells.extend((0..height).map(|row| (column, row)));
    }

    cells
}
