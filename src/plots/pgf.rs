//! PGF drawing backend
//!
//! Emits a `pgfpicture` that can be pulled into a LaTeX document with
//! `\input{chart.pgf}` (after `\usepackage{pgf}` and `\usepackage{xcolor}`,
//! which provides `\definecolor`). Text is passed through
//! untouched, so labels may contain math such as `$h_{memo}^{single}$` and are
//! typeset by LaTeX in the document's own fonts.
//!
//! Pixel coordinates are converted to inches using the backend's resolution;
//! PGF's y axis points up, plotters' points down.

use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend,
    DrawingErrorKind, FontTransform,
};
use std::fmt::Write as _;
use std::path::Path;

/// Average glyph width relative to the font size, used for text extents.
const GLYPH_ASPECT: f64 = 0.5;

/// A drawing backend that writes a PGF picture when presented.
pub struct PgfBackend<'a> {
    path: &'a Path,
    size: (u32, u32),
    dpi: f64,
    body: String,
}

impl<'a> PgfBackend<'a> {
    /// Creates a backend of `size` pixels at `dpi` dots per inch, saved to `path`.
    pub fn new<T: AsRef<Path> + ?Sized>(path: &'a T, size: (u32, u32), dpi: f64) -> Self {
        Self {
            path: path.as_ref(),
            size,
            dpi,
            body: String::new(),
        }
    }

    /// The complete picture as it would be written to disk.
    pub fn document(&self) -> String {
        let mut document = String::new();
        document.push_str("%% Creator: outcomes-plotter\n");
        document.push_str("%% Use \\input{<file>.pgf} after \\usepackage{pgf} and \\usepackage{xcolor}\n");
        document.push_str("\\begingroup%\n\\makeatletter%\n\\begin{pgfpicture}%\n");
        let _ = writeln!(
            document,
            "\\pgfpathrectangle{{\\pgfpointorigin}}{{\\pgfqpoint{{{:.4}in}}{{{:.4}in}}}}%",
            self.size.0 as f64 / self.dpi,
            self.size.1 as f64 / self.dpi
        );
        document.push_str("\\pgfusepath{use as bounding box, clip}%\n");
        document.push_str(&self.body);
        document.push_str("\\end{pgfpicture}%\n\\makeatother%\n\\endgroup%\n");
        document
    }

    fn inches(&self, pixels: f64) -> f64 {
        pixels / self.dpi
    }

    fn points(&self, pixels: f64) -> f64 {
        pixels * 72.0 / self.dpi
    }

    fn point(&self, (x, y): BackendCoord) -> String {
        format!(
            "\\pgfqpoint{{{:.4}in}}{{{:.4}in}}",
            self.inches(x as f64),
            self.inches(self.size.1 as f64 - y as f64)
        )
    }

    fn begin_scope(&mut self) {
        self.body.push_str("\\begin{pgfscope}%\n");
    }

    fn end_scope(&mut self) {
        self.body.push_str("\\end{pgfscope}%\n");
    }

    fn set_color(&mut self, name: &str, color: BackendColor) {
        let (r, g, b) = color.rgb;
        let _ = writeln!(
            self.body,
            "\\definecolor{{{name}}}{{rgb}}{{{:.4},{:.4},{:.4}}}%",
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0
        );
    }

    fn set_stroke<S: BackendStyle>(&mut self, style: &S) {
        let width = self.points(style.stroke_width() as f64);
        let _ = writeln!(self.body, "\\pgfsetlinewidth{{{width:.4}pt}}%");
        self.set_color("currentstroke", style.color());
        self.body.push_str("\\pgfsetstrokecolor{currentstroke}%\n");
        let _ = writeln!(
            self.body,
            "\\pgfsetstrokeopacity{{{:.4}}}%",
            style.color().alpha
        );
    }

    fn set_fill<S: BackendStyle>(&mut self, style: &S) {
        self.set_color("currentfill", style.color());
        self.body.push_str("\\pgfsetfillcolor{currentfill}%\n");
        let _ = writeln!(
            self.body,
            "\\pgfsetfillopacity{{{:.4}}}%",
            style.color().alpha
        );
    }

    /// Appends a move/line path through `points`; returns false when there is nothing to draw.
    fn path_through<I: IntoIterator<Item = BackendCoord>>(&mut self, points: I) -> bool {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return false;
        };

        let moveto = self.point(first);
        let _ = writeln!(self.body, "\\pgfpathmoveto{{{moveto}}}%");
        let mut segments = 0;
        for point in points {
            let lineto = self.point(point);
            let _ = writeln!(self.body, "\\pgfpathlineto{{{lineto}}}%");
            segments += 1;
        }

        segments > 0
    }

    fn use_path(&mut self, fill: bool) {
        if fill {
            self.body.push_str("\\pgfusepath{fill}%\n");
        } else {
            self.body.push_str("\\pgfusepath{stroke}%\n");
        }
    }
}

impl DrawingBackend for PgfBackend<'_> {
    type ErrorType = std::io::Error;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        std::fs::write(self.path, self.document()).map_err(DrawingErrorKind::DrawingError)
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        if color.alpha == 0.0 {
            return Ok(());
        }

        self.draw_rect(point, (point.0 + 1, point.1 + 1), &color, true)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.draw_path([from, to], style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }

        self.begin_scope();
        if fill {
            self.set_fill(style);
        } else {
            self.set_stroke(style);
        }

        let lower_left = self.point((upper_left.0, bottom_right.1));
        let width = self.inches((bottom_right.0 - upper_left.0) as f64);
        let height = self.inches((bottom_right.1 - upper_left.1) as f64);
        let _ = writeln!(
            self.body,
            "\\pgfpathrectangle{{{lower_left}}}{{\\pgfqpoint{{{width:.4}in}}{{{height:.4}in}}}}%"
        );
        self.use_path(fill);
        self.end_scope();
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }

        self.begin_scope();
        self.set_stroke(style);
        if self.path_through(path) {
            self.use_path(false);
        }
        self.end_scope();
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }

        self.begin_scope();
        if fill {
            self.set_fill(style);
        } else {
            self.set_stroke(style);
        }

        let center = self.point(center);
        let radius = self.inches(radius as f64);
        let _ = writeln!(self.body, "\\pgfpathcircle{{{center}}}{{{radius:.4}in}}%");
        self.use_path(fill);
        self.end_scope();
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }

        self.begin_scope();
        self.set_fill(style);
        if self.path_through(vert) {
            self.body.push_str("\\pgfpathclose%\n");
            self.use_path(true);
        }
        self.end_scope();
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        let color = style.color();
        if color.alpha == 0.0 || text.trim().is_empty() {
            return Ok(());
        }

        let anchor = style.anchor();
        let horizontal = match anchor.h_pos {
            HPos::Left => ",left",
            HPos::Center => "",
            HPos::Right => ",right",
        };
        let vertical = match anchor.v_pos {
            VPos::Top => ",top",
            VPos::Center => "",
            VPos::Bottom => ",bottom",
        };
        // PGF rotates counter-clockwise, plotters clockwise.
        let rotate = match style.transform() {
            FontTransform::None => 0,
            FontTransform::Rotate90 => 270,
            FontTransform::Rotate180 => 180,
            FontTransform::Rotate270 => 90,
        };

        let x = self.inches(pos.0 as f64);
        let y = self.inches(self.size.1 as f64 - pos.1 as f64);
        let font_size = self.points(style.size());

        self.begin_scope();
        self.set_color("textcolor", color);
        let _ = writeln!(
            self.body,
            "\\pgftext[x={x:.4}in,y={y:.4}in{horizontal}{vertical},rotate={rotate}]{{\\color{{textcolor}}\\fontsize{{{font_size:.2}}}{{{:.2}}}\\selectfont {text}}}%",
            font_size * 1.2
        );
        self.end_scope();
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        // LaTeX sets the text, so only an estimate is possible here.
        let size = style.size();
        let width = text.chars().count() as f64 * size * GLYPH_ASPECT;
        let (width, height) = (width.ceil() as u32, size.ceil() as u32);
        Ok(match style.transform() {
            FontTransform::Rotate90 | FontTransform::Rotate270 => (height, width),
            _ => (width, height),
        })
    }
}
