//! Floor plan elements - the building blocks of scenes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PlanError, PlanResult};

/// Unique identifier for an element.
///
/// Template ids such as `"r1"` are kept verbatim; generated ids carry a
/// kind prefix followed by a v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a new unique element ID with the given prefix.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}_{}", Uuid::new_v4().simple()))
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of a spatial element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// A room rectangle.
    Room,
    /// A wall segment.
    Wall,
    /// A door opening.
    Door,
    /// A window opening.
    Window,
}

impl ElementKind {
    /// Prefix used for generated IDs of this kind.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Wall => "wall",
            Self::Door => "door",
            Self::Window => "window",
        }
    }
}

/// Functional type of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Living or dining room.
    Living,
    /// Bedroom.
    Bedroom,
    /// Kitchen.
    Kitchen,
    /// Bathroom.
    Bathroom,
    /// Study.
    Study,
    /// Anything else.
    #[default]
    Other,
}

impl RoomType {
    /// Localized display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Living => "客厅",
            Self::Bedroom => "卧室",
            Self::Kitchen => "厨房",
            Self::Bathroom => "卫生间",
            Self::Study => "书房",
            Self::Other => "其他",
        }
    }
}

/// Orientation of a door or window opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Along the x axis.
    #[default]
    Horizontal,
    /// Along the y axis.
    Vertical,
}

/// A catalog device placed inside a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedDevice {
    /// Catalog device id.
    pub device_id: u32,
    /// Device name at placement time.
    pub name: String,
    /// Icon glyph drawn on the canvas.
    #[serde(default)]
    pub icon: String,
}

impl PlacedDevice {
    /// Glyph used when a device carries no icon.
    pub const FALLBACK_ICON: &'static str = "📱";

    /// The glyph to draw for this device.
    #[must_use]
    pub fn glyph(&self) -> &str {
        if self.icon.is_empty() {
            Self::FALLBACK_ICON
        } else {
            &self.icon
        }
    }
}

/// A rectangular room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: ElementId,
    /// Label drawn at the room's centre.
    pub name: String,
    /// Functional type.
    #[serde(rename = "type", default)]
    pub room_type: RoomType,
    /// X position of the top-left corner.
    pub x: f32,
    /// Y position of the top-left corner.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Placed devices in placement order.
    #[serde(default)]
    pub devices: Vec<PlacedDevice>,
}

impl Room {
    /// Create a room, rejecting non-positive or non-finite sizes.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidGeometry`] if `width` or `height` is not
    /// a finite positive number.
    pub fn try_new(
        id: ElementId,
        name: impl Into<String>,
        room_type: RoomType,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> PlanResult<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(PlanError::InvalidGeometry(format!(
                "room {id} has size {width}x{height}"
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            room_type,
            x,
            y,
            width,
            height,
            devices: Vec::new(),
        })
    }

    /// Check if a point lies within this room, boundaries included.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    /// Floor area in square metres, rounded to two decimals.
    ///
    /// One spatial unit squared counts as 1/100 m².
    #[must_use]
    pub fn area(&self) -> f32 {
        (self.width * self.height / 100.0).round() / 100.0
    }

    /// Merge a partial update into this room.
    pub fn apply_patch(&mut self, patch: RoomPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(room_type) = patch.room_type {
            self.room_type = room_type;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(devices) = patch.devices {
            self.devices = devices;
        }
    }
}

/// A partial room update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct RoomPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<PlacedDevice>>,
}

/// A wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Unique identifier.
    pub id: ElementId,
    /// Start X.
    pub x1: f32,
    /// Start Y.
    pub y1: f32,
    /// End X.
    pub x2: f32,
    /// End Y.
    pub y2: f32,
    /// Stroke width.
    #[serde(default = "Wall::default_thickness")]
    pub thickness: f32,
}

impl Wall {
    /// Stroke width used when none is given.
    pub const DEFAULT_THICKNESS: f32 = 8.0;

    const fn default_thickness() -> f32 {
        Self::DEFAULT_THICKNESS
    }

    /// Segment length. Zero-length walls are allowed.
    #[must_use]
    pub fn length(&self) -> f32 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}

/// A door opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    /// Unique identifier.
    pub id: ElementId,
    /// X position of the top-left corner.
    pub x: f32,
    /// Y position of the top-left corner.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Swing orientation.
    #[serde(default)]
    pub orientation: Orientation,
}

/// A window opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Unique identifier.
    pub id: ElementId,
    /// X position of the top-left corner.
    pub x: f32,
    /// Y position of the top-left corner.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Pane orientation.
    #[serde(default)]
    pub orientation: Orientation,
}
