//! Fixed palette and line styles
//!
//! Tables are told apart by color, rows (benchmark configurations) by dash
//! pattern. Both lists are positional: table `i` is drawn in `PALETTE[i]` and
//! row `r` with `LineStyle::ALL[r]`.

use plotters::style::RGBColor;

/// Series colors by table index: blue, red, cyan, magenta, yellow, black.
pub const PALETTE: [RGBColor; 6] = [
    RGBColor(0, 0, 255),
    RGBColor(255, 0, 0),
    RGBColor(0, 191, 191),
    RGBColor(191, 0, 191),
    RGBColor(191, 191, 0),
    RGBColor(0, 0, 0),
];

/// Dash style of a line, selected by row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    LooselyDotted,
    Dashed,
    DashDotted,
    Dotted,
    DenselyDashed,
}

impl LineStyle {
    /// Styles by row index.
    pub const ALL: [LineStyle; 6] = [
        LineStyle::Solid,
        LineStyle::LooselyDotted,
        LineStyle::Dashed,
        LineStyle::DashDotted,
        LineStyle::Dotted,
        LineStyle::DenselyDashed,
    ];

    /// Human readable name of the style.
    pub fn name(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::LooselyDotted => "loosely dotted",
            LineStyle::Dashed => "dashed",
            LineStyle::DashDotted => "dashdotted",
            LineStyle::Dotted => "dotted",
            LineStyle::DenselyDashed => "densely dashed",
        }
    }

    /// Alternating on/off lengths in points, starting with "on".
    /// An empty pattern is a continuous line.
    pub fn dash_pattern(self) -> &'static [f64] {
        match self {
            LineStyle::Solid => &[],
            LineStyle::LooselyDotted => &[1.0, 5.0],
            LineStyle::Dashed => &[7.0, 7.0],
            LineStyle::DashDotted => &[3.0, 5.0, 1.0, 5.0],
            LineStyle::Dotted => &[1.0, 1.0],
            LineStyle::DenselyDashed => &[5.0, 3.0],
        }
    }

    /// Dash pattern converted to pixels for a given resolution and line width (in points).
    pub fn pixel_pattern(self, dpi: f64, line_width_pt: f64) -> Vec<f64> {
        let scale = dpi / 72.0 * line_width_pt;
        self.dash_pattern()
            .iter()
            .map(|length| length * scale)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_are_distinct() {
        for (index, style) in LineStyle::ALL.iter().enumerate() {
            for other in &LineStyle::ALL[index + 1..] {
                assert_ne!(style.dash_pattern(), other.dash_pattern());
                assert_ne!(style.name(), other.name());
            }
        }
    }

    #[test]
    fn patterns_alternate_on_and_off() {
        for style in LineStyle::ALL {
            assert_eq!(style.dash_pattern().len() % 2, 0, "{}", style.name());
            assert!(style.dash_pattern().iter().all(|length| *length > 0.0));
        }
    }

    #[test]
    fn pixel_pattern_scales_with_resolution() {
        assert_eq!(LineStyle::Dashed.pixel_pattern(72.0, 1.0), vec![7.0, 7.0]);
        assert_eq!(LineStyle::Dotted.pixel_pattern(144.0, 1.0), vec![2.0, 2.0]);
        assert_eq!(LineStyle::DenselyDashed.pixel_pattern(72.0, 2.0), vec![10.0, 6.0]);
        assert!(LineStyle::Solid.pixel_pattern(80.0, 1.0).is_empty());
    }
}
