use outcomes_plotter::plots::PlotError;
use outcomes_plotter::{run, PipelineError, PlotSettings};
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn two_single_row_tables(dir: &TempDir) -> Vec<PathBuf> {
    [("first.csv", "1,2"), ("second.csv", "3,4")]
        .iter()
        .map(|(name, contents)| {
            let path = dir.path().join(name);
            fs::write(&path, contents).unwrap();
            path
        })
        .collect()
}

#[rstest]
#[case::png("chart.png")]
#[case::svg("chart.svg")]
#[case::pgf("chart.pgf")]
fn writes_non_empty_chart(#[case] output: &str) {
    let dir = TempDir::new().unwrap();
    let settings = PlotSettings {
        inputs: two_single_row_tables(&dir),
        output: dir.path().join(output),
        table_count: Some(1),
        labels: vec!["h_{memo}^{single}".to_string()],
        ..PlotSettings::default()
    };

    let plan = run(&settings).unwrap();
    assert_eq!(plan.series.len(), 1);
    assert_eq!(plan.legend.len(), 1);

    let written = fs::metadata(&settings.output).unwrap();
    assert!(written.len() > 0);
}

#[test]
fn both_tables_share_one_chart() {
    let dir = TempDir::new().unwrap();
    let settings = PlotSettings {
        inputs: two_single_row_tables(&dir),
        output: dir.path().join("both.svg"),
        samples: Some(2),
        labels: vec!["h_{memo}^{single}".to_string()],
        ..PlotSettings::default()
    };

    let plan = run(&settings).unwrap();
    let last_points: Vec<(f64, f64)> = plan
        .series
        .iter()
        .map(|series| *series.points.last().unwrap())
        .collect();
    assert_eq!(last_points, vec![(2.0, 3.0), (2.0, 7.0)]);
    assert_ne!(plan.series[0].color, plan.series[1].color);
    assert_eq!(plan.legend.len(), 1);
}

#[test]
fn unsupported_output_extension_fails() {
    let dir = TempDir::new().unwrap();
    let settings = PlotSettings {
        inputs: two_single_row_tables(&dir),
        output: dir.path().join("chart.eps"),
        labels: vec!["only".to_string()],
        ..PlotSettings::default()
    };

    assert!(matches!(
        run(&settings),
        Err(PipelineError::Plot(PlotError::UnsupportedFormat(_)))
    ));
}

#[test]
fn zero_dpi_is_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let settings = PlotSettings {
        inputs: two_single_row_tables(&dir),
        output: dir.path().join("chart.pgf"),
        labels: vec!["only".to_string()],
        dpi: 0,
        ..PlotSettings::default()
    };

    assert!(matches!(
        run(&settings),
        Err(PipelineError::Plot(PlotError::InvalidFigure { dpi: 0, .. }))
    ));
    assert!(!settings.output.exists());
}
