//! Drawing surface contract and its implementations.

pub mod recording;
pub mod svg;

use crate::{BackendType, RenderResult};

/// Horizontal anchor for [`DrawSurface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Text starts at the anchor.
    #[default]
    Left,
    /// Text is centred on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

/// A 2D immediate-mode drawing context.
///
/// Colours are CSS colour strings. Angles are radians, measured clockwise
/// from the positive x axis since y grows downward.
pub trait DrawSurface {
    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Clear a rectangle.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Set the colour used by stroke calls.
    fn set_stroke_color(&mut self, color: &str);

    /// Set the colour used by fill calls.
    fn set_fill_color(&mut self, color: &str);

    /// Set the stroke width.
    fn set_line_width(&mut self, width: f32);

    /// Set the font size used by [`fill_text`](Self::fill_text).
    fn set_font_size(&mut self, size: f32);

    /// Set the horizontal text anchor.
    fn set_text_align(&mut self, align: TextAlign);

    /// Start a new path, discarding the current one.
    fn begin_path(&mut self);

    /// Move the pen without drawing.
    fn move_to(&mut self, x: f32, y: f32);

    /// Add a straight segment to the current path.
    fn line_to(&mut self, x: f32, y: f32);

    /// Add a circular arc to the current path.
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32);

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Fill a rectangle with the fill colour.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Outline a rectangle with the stroke colour and width.
    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Draw text at an anchor point on the alphabetic baseline.
    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    /// Flush the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot produce the frame.
    fn present(&mut self) -> RenderResult<()>;
}
