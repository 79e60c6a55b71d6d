//! The floor plan scene: rooms, walls, doors, windows, selection and tool.

use serde::{Deserialize, Serialize};

use crate::{Door, ElementId, PlanError, PlanResult, Room, Tool, Wall, Window};

/// Logical canvas width in spatial units.
pub const CANVAS_WIDTH: f32 = 375.0;

/// Logical canvas height in spatial units.
pub const CANVAS_HEIGHT: f32 = 300.0;

/// A snapshot of everything drawn on the design canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Rooms in insertion order. Earlier rooms win hit-tests.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Walls in insertion order.
    #[serde(default)]
    pub walls: Vec<Wall>,
    /// Doors in insertion order.
    #[serde(default)]
    pub doors: Vec<Door>,
    /// Windows in insertion order.
    #[serde(default)]
    pub windows: Vec<Window>,
    /// ID of the selected room, if any.
    #[serde(default)]
    pub selected_room: Option<ElementId>,
    /// Active editing tool.
    #[serde(default)]
    pub current_tool: Tool,
}

impl Scene {
    /// Create an empty scene with the room tool active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the first room containing the given point.
    #[must_use]
    pub fn room_at(&self, x: f32, y: f32) -> Option<&Room> {
        self.rooms.iter().find(|r| r.contains_point(x, y))
    }

    /// Get a room by ID.
    #[must_use]
    pub fn room(&self, id: &ElementId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == *id)
    }

    /// The selected room, resolved against the current rooms.
    #[must_use]
    pub fn selected(&self) -> Option<&Room> {
        self.selected_room.as_ref().and_then(|id| self.room(id))
    }

    /// Whether the room with this ID is selected.
    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected_room.as_ref() == Some(id)
    }

    /// Total number of spatial elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.rooms.len() + self.walls.len() + self.doors.len() + self.windows.len()
    }

    /// Check if the scene has no spatial elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PlanResult<String> {
        serde_json::to_string(self).map_err(PlanError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        serde_json::from_str(json).map_err(PlanError::Serialization)
    }
}
