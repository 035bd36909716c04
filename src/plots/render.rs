//! Drawing of planned charts
//!
//! Lines are stroked in pixel space on the root drawing area so that dash
//! patterns keep their physical length regardless of the axis scales.
//!
//! # Fonts
//! Bitmap output rasterizes its text with the system `serif` font, so a missing
//! font surfaces as [`PlotError::Drawing`]. PGF stores text verbatim and leaves
//! typesetting to LaTeX.

use super::dash::dash_segments;
use super::pgf::PgfBackend;
use super::plan::{legend_layout, ChartPlan, LegendEntry};
use super::{OutputFormat, PlotError, Result};
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tracing::info;

/// Line width of every series, in points.
const LINE_WIDTH_PT: f64 = 1.0;

/// Axis description font size, in points.
const AXIS_LABEL_PT: f64 = 22.0;

/// Tick label font size, in points.
const TICK_LABEL_PT: f64 = 18.0;

/// Legend font size, in points.
const LEGEND_PT: f64 = 18.0;

/// Padding around the figure, in points.
const FIGURE_PAD_PT: f64 = 8.0;

const FONT_FAMILY: &str = "serif";

const LEGEND_EDGE: RGBColor = RGBColor(204, 204, 204);

/// Figure geometry and legend options.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: u32,
    pub legend_columns: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width_inches: 6.5,
            height_inches: 4.0,
            dpi: 80,
            legend_columns: 1,
        }
    }
}

impl RenderOptions {
    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f64;
        (
            (self.width_inches * dpi).round() as u32,
            (self.height_inches * dpi).round() as u32,
        )
    }

    /// Rejects geometry that would leave nothing to draw on.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.pixel_size();
        let finite = self.width_inches.is_finite() && self.height_inches.is_finite();
        if !finite || self.dpi == 0 || width == 0 || height == 0 {
            return Err(PlotError::InvalidFigure {
                width_inches: self.width_inches,
                height_inches: self.height_inches,
                dpi: self.dpi,
            });
        }

        Ok(())
    }

    fn pixels(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    fn stroke_width(&self) -> u32 {
        self.pixels(LINE_WIDTH_PT).round().max(1.0) as u32
    }
}

/// Draws a planned chart and saves it to `output_path`
///
/// The file format follows the extension of `output_path`, see [`OutputFormat`].
///
/// # Returns
/// * `Ok(())` - If the chart was drawn and written
/// * `Err(PlotError)` - If the format is unsupported, the figure has no area,
///   or drawing failed
pub fn render_chart(plan: &ChartPlan, options: &RenderOptions, output_path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(output_path)?;
    options.validate()?;
    let size = options.pixel_size();

    match format {
        OutputFormat::Bitmap => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_chart(root, plan, options, format)?;
        }
        OutputFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_chart(root, plan, options, format)?;
        }
        OutputFormat::Pgf => {
            let root = PgfBackend::new(output_path, size, options.dpi as f64).into_drawing_area();
            draw_chart(root, plan, options, format)?;
        }
    }

    info!(
        path = %output_path.display(),
        series = plan.series.len(),
        legend_entries = plan.legend.len(),
        "Chart written"
    );
    Ok(())
}

fn draw_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    plan: &ChartPlan,
    options: &RenderOptions,
    format: OutputFormat,
) -> Result<()> {
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let ((x_min, x_max), (y_min, y_max)) = plan.bounds();
    let tick_px = options.pixels(TICK_LABEL_PT);
    let axis_px = options.pixels(AXIS_LABEL_PT);

    // Fit the label areas to the text they hold.
    let tick_chars = format!("{y_max:.1}").len().max(format!("{y_min:.1}").len()) as f64;
    let mut chart = ChartBuilder::on(&root)
        .margin(options.pixels(FIGURE_PAD_PT).round() as u32)
        .x_label_area_size((tick_px + axis_px * 1.5).round() as u32)
        .y_label_area_size((tick_chars * tick_px * 0.6 + axis_px * 1.5).round() as u32)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(6)
        .y_labels(6)
        .x_desc(x_axis_label(format))
        .y_desc("Cumulative time")
        .axis_desc_style((FONT_FAMILY, axis_px.round() as u32))
        .label_style((FONT_FAMILY, tick_px.round() as u32))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let dpi = options.dpi as f64;
    for series in &plan.series {
        let pixels: Vec<(f64, f64)> = series
            .points
            .iter()
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|point| {
                let (x, y) = chart.as_coord_spec().translate(point);
                (x as f64, y as f64)
            })
            .collect();

        draw_dashed(
            &root,
            &pixels,
            &series.style.pixel_pattern(dpi, LINE_WIDTH_PT),
            series.color.stroke_width(options.stroke_width()),
        )?;
    }

    let plot_area = chart.plotting_area().get_pixel_range();
    draw_legend(&root, plot_area, &plan.legend, options, format)?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

fn draw_dashed<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    path: &[(f64, f64)],
    pattern: &[f64],
    style: ShapeStyle,
) -> Result<()> {
    for piece in dash_segments(path, pattern) {
        let coords: Vec<(i32, i32)> = piece
            .iter()
            .map(|&(x, y)| (x.round() as i32, y.round() as i32))
            .collect();
        area.draw(&PathElement::new(coords, style))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

/// Boxed legend in the upper left corner of the plot area. Handles are black,
/// only the dash pattern tells the rows apart.
fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    (plot_x, plot_y): (Range<i32>, Range<i32>),
    legend: &[LegendEntry],
    options: &RenderOptions,
    format: OutputFormat,
) -> Result<()> {
    if legend.is_empty() {
        return Ok(());
    }

    let font_px = options.pixels(LEGEND_PT);
    let font = (FONT_FAMILY, font_px.round() as u32)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    let handle_length = font_px * 2.0;
    let handle_gap = font_px * 0.8;
    let border_pad = font_px * 0.4;
    let row_height = font_px * 1.5;
    let column_gap = font_px * 2.0;

    let labels: Vec<String> = legend
        .iter()
        .map(|entry| display_label(&entry.label, format))
        .collect();
    let cells = legend_layout(legend.len(), options.legend_columns);
    let columns = cells.iter().map(|(column, _)| column + 1).max().unwrap_or(1);
    let rows = cells.iter().map(|(_, row)| row + 1).max().unwrap_or(1);

    let mut column_widths = vec![0.0_f64; columns];
    for (&(column, _), label) in cells.iter().zip(&labels) {
        let (text_width, _) = root
            .estimate_text_size(label, &font)
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
        let width = handle_length + handle_gap + text_width as f64;
        column_widths[column] = column_widths[column].max(width);
    }

    let left = plot_x.start as f64 + border_pad;
    let top = plot_y.start as f64 + border_pad;
    let width = border_pad * 2.0
        + column_widths.iter().sum::<f64>()
        + column_gap * (columns - 1) as f64;
    let height = border_pad * 2.0 + row_height * rows as f64;
    let frame = [
        (left.round() as i32, top.round() as i32),
        ((left + width).round() as i32, (top + height).round() as i32),
    ];

    root.draw(&Rectangle::new(frame, WHITE.mix(0.8).filled()))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    root.draw(&Rectangle::new(frame, LEGEND_EDGE.stroke_width(1)))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    let dpi = options.dpi as f64;
    for ((&(column, row), entry), label) in cells.iter().zip(legend).zip(labels) {
        let x = left
            + border_pad
            + column_widths[..column].iter().sum::<f64>()
            + column_gap * column as f64;
        let y = top + border_pad + row_height * (row as f64 + 0.5);

        draw_dashed(
            root,
            &[(x, y), (x + handle_length, y)],
            &entry.style.pixel_pattern(dpi, LINE_WIDTH_PT),
            BLACK.stroke_width(options.stroke_width()),
        )?;

        let anchor = ((x + handle_length + handle_gap).round() as i32, y.round() as i32);
        root.draw(&Text::new(label, anchor, font.clone()))
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    Ok(())
}

fn x_axis_label(format: OutputFormat) -> &'static str {
    if format.typesets_latex() {
        "$i$-th formula"
    } else {
        "i-th formula"
    }
}

/// Legend text for the target format.
///
/// LaTeX output wraps labels in inline math. Everything else strips the TeX
/// grouping and math markup, so `h_{memo}^{single}` reads `h_memo^single`.
fn display_label(label: &str, format: OutputFormat) -> String {
    if format.typesets_latex() {
        if label.contains('$') {
            label.to_string()
        } else {
            format!("${label}$")
        }
    } else {
        label
            .chars()
            .filter(|c| !matches!(c, '$' | '{' | '}' | '\\'))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::plan_chart;
    use crate::table::Table;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn sample_plan() -> ChartPlan {
        let tables = [
            Table::from_rows(vec![vec![1.0, 2.0, 3.0], vec![2.0, 2.0, 2.0]])
                .unwrap()
                .cumulative_sum(),
            Table::from_rows(vec![vec![0.5, 0.5, 4.0], vec![1.0, 1.0, 1.0]])
                .unwrap()
                .cumulative_sum(),
        ];
        let labels = vec!["h_{memo}^{single}".to_string(), "h_{memo}^{multi}=0".to_string()];
        plan_chart(&tables, 2, None, &labels).unwrap()
    }

    #[test]
    fn pixel_size_follows_inches_and_dpi() {
        assert_eq!(RenderOptions::default().pixel_size(), (520, 320));

        let options = RenderOptions {
            dpi: 100,
            ..RenderOptions::default()
        };
        assert_eq!(options.pixel_size(), (650, 400));
    }

    #[rstest]
    #[case::zero_dpi(6.5, 4.0, 0)]
    #[case::zero_width(0.0, 4.0, 80)]
    #[case::negative_height(6.5, -1.0, 80)]
    #[case::not_a_number(f64::NAN, 4.0, 80)]
    fn empty_figures_are_rejected(
        #[case] width_inches: f64,
        #[case] height_inches: f64,
        #[case] dpi: u32,
    ) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.pgf");
        let options = RenderOptions {
            width_inches,
            height_inches,
            dpi,
            ..RenderOptions::default()
        };

        let result = render_chart(&sample_plan(), &options, &path);
        assert!(matches!(result, Err(PlotError::InvalidFigure { .. })));
        assert!(!path.exists());
    }

    #[rstest]
    #[case("h_{memo}^{single}", OutputFormat::Pgf, "$h_{memo}^{single}$")]
    #[case("$x$", OutputFormat::Pgf, "$x$")]
    #[case("h_{memo}^{single}", OutputFormat::Bitmap, "h_memo^single")]
    #[case("h_{memo}^{multi}=2", OutputFormat::Svg, "h_memo^multi=2")]
    fn labels_follow_output_format(
        #[case] label: &str,
        #[case] format: OutputFormat,
        #[case] expected: &str,
    ) {
        assert_eq!(display_label(label, format), expected);
    }

    #[test]
    fn renders_svg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");

        render_chart(&sample_plan(), &RenderOptions::default(), &path).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Cumulative time"));
        assert!(svg.contains("h_memo^single"));
    }

    #[test]
    fn renders_pgf_with_latex_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.pgf");

        let options = RenderOptions {
            legend_columns: 2,
            ..RenderOptions::default()
        };
        render_chart(&sample_plan(), &options, &path).unwrap();

        let pgf = fs::read_to_string(&path).unwrap();
        assert!(pgf.contains("\\begin{pgfpicture}"));
        assert!(pgf.contains("$i$-th formula"));
        assert!(pgf.contains("$h_{memo}^{multi}=0$"));
        // Series colors for both tables.
        assert!(pgf.contains("{rgb}{0.0000,0.0000,1.0000}"));
        assert!(pgf.contains("{rgb}{1.0000,0.0000,0.0000}"));
    }

    #[test]
    fn legend_handles_are_black_whatever_the_series_colors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.pgf");
        render_chart(&sample_plan(), &RenderOptions::default(), &path).unwrap();
        let pgf = fs::read_to_string(&path).unwrap();

        // Everything stroked after the legend frame belongs to the legend handles.
        let frame = pgf
            .find("\\definecolor{currentstroke}{rgb}{0.8000,0.8000,0.8000}")
            .unwrap();
        let handle_strokes: Vec<&str> = pgf[frame..]
            .lines()
            .skip(1)
            .filter(|line| line.starts_with("\\definecolor{currentstroke}"))
            .collect();

        assert!(handle_strokes.len() >= 2);
        for stroke in handle_strokes {
            assert_eq!(stroke, "\\definecolor{currentstroke}{rgb}{0.0000,0.0000,0.0000}%");
        }
    }

    #[test]
    fn renders_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.png");

        render_chart(&sample_plan(), &RenderOptions::default(), &path).unwrap();

        let written = fs::metadata(&path).unwrap();
        assert!(written.len() > 0);
    }

    #[test]
    fn unsupported_extension_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.pdf");

        let result = render_chart(&sample_plan(), &RenderOptions::default(), &path);
        assert!(matches!(result, Err(PlotError::UnsupportedFormat(_))));
        assert!(!path.exists());
    }
}
