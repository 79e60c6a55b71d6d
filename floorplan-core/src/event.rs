//! Input events delivered to the design canvas.

use serde::{Deserialize, Serialize};

/// Phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    /// Finger down.
    Start,
    /// Finger dragging.
    Move,
    /// Finger up.
    End,
    /// Touch cancelled by the platform.
    Cancel,
}

/// A single touch point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Touch identifier (for multi-touch).
    pub id: u32,
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
}

/// A touch event with one or more touch points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Phase of this touch event.
    pub phase: TouchPhase,
    /// All current touch points.
    pub touches: Vec<TouchPoint>,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub fn new(phase: TouchPhase, touches: Vec<TouchPoint>) -> Self {
        Self { phase, touches }
    }

    /// A single-finger touch start at a point.
    #[must_use]
    pub fn tap(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Start, vec![TouchPoint { id: 0, x, y }])
    }

    /// Get the primary (first) touch point.
    #[must_use]
    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}

/// All input events the design canvas can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum InputEvent {
    /// Raw touch event.
    Touch(TouchEvent),

    /// Pointer (mouse) event.
    Pointer {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
        /// Mouse button (0 = left, 1 = middle, 2 = right).
        button: u8,
        /// Whether the button is pressed.
        pressed: bool,
    },
}

impl InputEvent {
    /// The point this event acts on, if it is a tap or primary click.
    ///
    /// Only touch starts and primary-button presses count; a touch start
    /// with several fingers uses the first one.
    #[must_use]
    pub fn tap_point(&self) -> Option<(f32, f32)> {
        match self {
            Self::Touch(touch) if touch.phase == TouchPhase::Start => {
                touch.primary_touch().map(|p| (p.x, p.y))
            }
            Self::Pointer {
                x,
                y,
                button: 0,
                pressed: true,
            } => Some((*x, *y)),
            _ => None,
        }
    }
}
