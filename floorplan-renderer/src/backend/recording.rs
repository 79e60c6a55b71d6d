//! Recording backend.
//!
//! Captures every draw call in order. Used by tests and by hosts that
//! replay the command stream on their own canvas.

use serde::{Deserialize, Serialize};

use super::{DrawSurface, TextAlign};
use crate::{BackendType, RenderResult};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    SetStrokeColor { color: String },
    SetFillColor { color: String },
    SetLineWidth { width: f32 },
    SetFontSize { size: f32 },
    SetTextAlign { align: TextAlign },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    Arc {
        cx: f32,
        cy: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Stroke,
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    StrokeRect { x: f32, y: f32, width: f32, height: f32 },
    FillText { text: String, x: f32, y: f32 },
    Present,
}

/// Surface that records draw calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recording empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Serialize the recording as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(&self.commands)?)
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl DrawSurface for RecordingSurface {
    fn backend_type(&self) -> BackendType {
        BackendType::Recording
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.push(DrawCommand::SetStrokeColor {
            color: color.to_string(),
        });
    }

    fn set_fill_color(&mut self, color: &str) {
        self.push(DrawCommand::SetFillColor {
            color: color.to_string(),
        });
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(DrawCommand::SetLineWidth { width });
    }

    fn set_font_size(&mut self, size: f32) {
        self.push(DrawCommand::SetFontSize { size });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::SetTextAlign { align });
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start_angle: f32, end_angle: f32) {
        self.push(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push(DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn present(&mut self) -> RenderResult<()> {
        self.push(DrawCommand::Present);
        Ok(())
    }
}
