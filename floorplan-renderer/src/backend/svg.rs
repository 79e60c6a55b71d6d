//! SVG backend.
//!
//! Turns the draw call stream into a standalone SVG document. Paths are
//! accumulated until [`stroke`](DrawSurface::stroke) and emitted as a
//! single `<path>` element.

use std::f32::consts::{PI, TAU};
use std::fmt::Write;
use std::path::Path;

use super::{DrawSurface, TextAlign};
use crate::{BackendType, RenderError, RenderResult};

/// Surface that writes SVG markup.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f32,
    height: f32,
    stroke_color: String,
    fill_color: String,
    line_width: f32,
    font_size: f32,
    text_align: TextAlign,
    path: String,
    body: String,
    document: Option<String>,
}

impl SvgSurface {
    /// Create a surface with the given logical size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            stroke_color: "#000".to_string(),
            fill_color: "#000".to_string(),
            line_width: 1.0,
            font_size: 10.0,
            text_align: TextAlign::Left,
            path: String::new(),
            body: String::with_capacity(4096),
            document: None,
        }
    }

    /// The last presented document.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotPresented`] if no frame was presented.
    pub fn document(&self) -> RenderResult<&str> {
        self.document.as_deref().ok_or(RenderError::NotPresented)
    }

    /// Write the last presented document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if no frame was presented or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let document = self.document()?;
        std::fs::write(path.as_ref(), document)?;
        tracing::debug!("wrote SVG to {}", path.as_ref().display());
        Ok(())
    }

    fn covers_surface(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height
    }

    fn anchor(&self) -> &'static str {
        match self.text_align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        }
    }
}

impl DrawSurface for SvgSurface {
    fn backend_type(&self) -> BackendType {
        BackendType::Svg
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.covers_surface(x, y, width, height) {
            self.body.clear();
            return;
        }
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#fff\"/>",
            num(x),
            num(y),
            num(width),
            num(height),
        );
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.stroke_color = escape_xml(color);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.fill_color = escape_xml(color);
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let _ = write!(self.path, "M{} {} ", num(x), num(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let command = if self.path.is_empty() { 'M' } else { 'L' };
        let _ = write!(self.path, "{command}{} {} ", num(x), num(y));
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) {
        let start = (
            radius.mul_add(start_angle.cos(), cx),
            radius.mul_add(start_angle.sin(), cy),
        );
        // A canvas arc joins the current point to its start with a line.
        self.line_to(start.0, start.1);

        let sweep = end_angle - start_angle;
        let sweep_flag = u8::from(sweep >= 0.0);
        if sweep.abs() >= TAU {
            // SVG cannot draw a closed arc in one segment.
            let mid = (
                radius.mul_add((start_angle + PI).cos(), cx),
                radius.mul_add((start_angle + PI).sin(), cy),
            );
            for point in [mid, start] {
                let _ = write!(
                    self.path,
                    "A{r} {r} 0 0 {sweep_flag} {} {} ",
                    num(point.0),
                    num(point.1),
                    r = num(radius),
                );
            }
            return;
        }

        let end = (
            radius.mul_add(end_angle.cos(), cx),
            radius.mul_add(end_angle.sin(), cy),
        );
        let large_arc = u8::from(sweep.abs() > PI);
        let _ = write!(
            self.path,
            "A{r} {r} 0 {large_arc} {sweep_flag} {} {} ",
            num(end.0),
            num(end.1),
            r = num(radius),
        );
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            self.path.trim_end(),
            self.stroke_color,
            num(self.line_width),
        );
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            num(x),
            num(y),
            num(width),
            num(height),
            self.fill_color,
        );
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let _ = write!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            num(x),
            num(y),
            num(width),
            num(height),
            self.stroke_color,
            num(self.line_width),
        );
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"{}\" font-family=\"sans-serif\">{}</text>",
            num(x),
            num(y),
            num(self.font_size),
            self.fill_color,
            self.anchor(),
            escape_xml(text),
        );
    }

    fn present(&mut self) -> RenderResult<()> {
        let (w, h) = (num(self.width), num(self.height));
        let mut svg = String::with_capacity(self.body.len() + 256);
        write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        )
        .map_err(|e| RenderError::Surface(format!("SVG write failed: {e}")))?;
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"#fff\"/>");
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        self.document = Some(svg);
        Ok(())
    }
}

/// Format a coordinate with at most two decimals.
fn num(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0".
    let rounded = if rounded.abs() < f32::EPSILON {
        0.0
    } else {
        rounded
    };
    format!("{rounded}")
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
