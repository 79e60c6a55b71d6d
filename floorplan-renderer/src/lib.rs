//! # Floorplan Renderer
//!
//! Maps a scene snapshot to 2D draw calls on a fixed-size surface.
//!
//! ## Rendering Backends
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            DrawSurface Trait                │
//! ├──────────────────────┬──────────────────────┤
//! │ Recording            │ SVG                  │
//! │ (command list/JSON)  │ (standalone doc)     │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Every call to [`Renderer::render`] redraws the full scene. There is no
//! incremental diffing; the same snapshot always yields the same calls.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
mod paint;

pub use backend::recording::{DrawCommand, RecordingSurface};
pub use backend::svg::SvgSurface;
pub use backend::{DrawSurface, TextAlign};
pub use error::{RenderError, RenderResult};
pub use paint::{device_slot, DEVICE_BADGE_COLUMNS, DEVICE_BADGE_PITCH, DEVICE_BADGE_SIZE};

use floorplan_core::{Scene, CANVAS_HEIGHT, CANVAS_WIDTH};
use serde::{Deserialize, Serialize};

/// Colours and stroke widths used when painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Grid line colour.
    pub grid_color: String,
    /// Grid line width.
    pub grid_line_width: f32,
    /// Wall colour.
    pub wall_color: String,
    /// Room fill when not selected.
    pub room_fill: String,
    /// Room fill when selected.
    pub room_fill_selected: String,
    /// Room border when not selected.
    pub room_border: String,
    /// Room border when selected.
    pub room_border_selected: String,
    /// Room border width when not selected.
    pub room_border_width: f32,
    /// Room border width when selected.
    pub room_border_width_selected: f32,
    /// Room label colour.
    pub label_color: String,
    /// Room label font size.
    pub label_font_size: f32,
    /// Device badge background.
    pub device_fill: String,
    /// Device badge border.
    pub device_border: String,
    /// Device badge border width.
    pub device_border_width: f32,
    /// Device glyph font size.
    pub device_font_size: f32,
    /// Door fill and swing colour.
    pub door_color: String,
    /// Door swing width.
    pub door_line_width: f32,
    /// Window fill.
    pub window_fill: String,
    /// Window outline and divider.
    pub window_stroke: String,
    /// Window outline width.
    pub window_line_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            grid_color: "#f0f0f0".to_string(),
            grid_line_width: 0.5,
            wall_color: "#666".to_string(),
            room_fill: "rgba(0, 122, 255, 0.1)".to_string(),
            room_fill_selected: "rgba(0, 122, 255, 0.2)".to_string(),
            room_border: "#ccc".to_string(),
            room_border_selected: "#007AFF".to_string(),
            room_border_width: 2.0,
            room_border_width_selected: 3.0,
            label_color: "#333".to_string(),
            label_font_size: 14.0,
            device_fill: "#fff".to_string(),
            device_border: "#007AFF".to_string(),
            device_border_width: 1.0,
            device_font_size: 12.0,
            door_color: "#8B4513".to_string(),
            door_line_width: 2.0,
            window_fill: "#87CEEB".to_string(),
            window_stroke: "#4682B4".to_string(),
            window_line_width: 2.0,
        }
    }
}

/// Configuration for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Surface width in canvas units.
    pub width: f32,
    /// Surface height in canvas units.
    pub height: f32,
    /// Grid spacing.
    pub grid_size: f32,
    /// Colours and stroke widths.
    pub theme: Theme,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            grid_size: 20.0,
            theme: Theme::default(),
        }
    }
}

/// Available drawing backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// In-memory command list.
    Recording,
    /// SVG document.
    Svg,
}

/// The main renderer interface.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RendererConfig,
    frame_count: u64,
}

impl Renderer {
    /// Create a new renderer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface size or grid spacing is not positive.
    pub fn new(config: RendererConfig) -> RenderResult<Self> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(config.width) || !positive(config.height) {
            return Err(RenderError::InvalidConfig(format!(
                "surface size {}x{}",
                config.width, config.height
            )));
        }
        if !positive(config.grid_size) {
            return Err(RenderError::InvalidConfig(format!(
                "grid size {}",
                config.grid_size
            )));
        }
        Ok(Self {
            config,
            frame_count: 0,
        })
    }

    /// Render a frame: paint the whole scene and present it.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface fails to present.
    pub fn render(&mut self, scene: &Scene, surface: &mut dyn DrawSurface) -> RenderResult<()> {
        tracing::trace!(
            "{:?} render: {} rooms, {} walls, {} doors, {} windows",
            surface.backend_type(),
            scene.rooms.len(),
            scene.walls.len(),
            scene.doors.len(),
            scene.windows.len()
        );
        paint::paint_scene(&self.config, scene, surface);
        surface.present()?;
        self.frame_count += 1;
        Ok(())
    }

    /// Render a frame into a fresh recording and return its commands.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_commands(&mut self, scene: &Scene) -> RenderResult<Vec<DrawCommand>> {
        let mut surface = RecordingSurface::new();
        self.render(scene, &mut surface)?;
        Ok(surface.take_commands())
    }

    /// Render a frame to a standalone SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_svg(&mut self, scene: &Scene) -> RenderResult<String> {
        let mut surface = SvgSurface::new(self.config.width, self.config.height);
        self.render(scene, &mut surface)?;
        Ok(surface.document()?.to_string())
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            config: RendererConfig::default(),
            frame_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_config() {
        let zero_grid = RendererConfig {
            grid_size: 0.0,
            ..RendererConfig::default()
        };
        assert!(matches!(
            Renderer::new(zero_grid),
            Err(RenderError::InvalidConfig(_))
        ));

        let no_height = RendererConfig {
            height: -1.0,
            ..RendererConfig::default()
        };
        assert!(Renderer::new(no_height).is_err());
    }

    #[test]
    fn test_frame_count_increments() {
        let mut renderer = Renderer::default();
        let scene = Scene::new();
        renderer.render_commands(&scene).expect("render");
        renderer.render_svg(&scene).expect("render");
        assert_eq!(renderer.frame_count(), 2);
    }

    #[test]
    fn test_empty_scene_draws_only_grid() {
        let mut renderer = Renderer::default();
        let commands = renderer.render_commands(&Scene::new()).expect("render");

        assert_eq!(
            commands.first(),
            Some(&DrawCommand::ClearRect {
                x: 0.0,
                y: 0.0,
                width: 375.0,
                height: 300.0
            })
        );
        assert_eq!(commands.last(), Some(&DrawCommand::Present));
        // 19 vertical (0..=360) and 16 horizontal (0..=300) lines
        let strokes = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count();
        assert_eq!(strokes, 35);
    }

    #[test]
    fn test_theme_deserializes_partially() {
        let config: RendererConfig =
            serde_json::from_str(r##"{"grid_size": 10, "theme": {"wall_color": "#000"}}"##)
                .expect("config");
        assert!((config.grid_size - 10.0).abs() < f32::EPSILON);
        assert_eq!(config.theme.wall_color, "#000");
        assert_eq!(config.theme.grid_color, "#f0f0f0");
    }
}
