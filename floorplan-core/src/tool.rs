//! Tool controller: turns a tap into a store mutation.

use serde::{Deserialize, Serialize};

use crate::store::SceneStore;
use crate::{Door, ElementId, ElementKind, InputEvent, Orientation, Room, RoomType, Wall, Window};

/// Size of a room created by tapping empty space.
pub const NEW_ROOM_SIZE: (f32, f32) = (100.0, 80.0);

/// Name given to rooms created by tapping.
pub const NEW_ROOM_NAME: &str = "新房间";

/// Length of a wall created by tapping.
pub const NEW_WALL_LENGTH: f32 = 100.0;

/// Size of a door created by tapping.
pub const NEW_DOOR_SIZE: (f32, f32) = (30.0, 10.0);

/// Size of a window created by tapping.
pub const NEW_WINDOW_SIZE: (f32, f32) = (40.0, 10.0);

/// Active editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select rooms or create new ones.
    #[default]
    Room,
    /// Draw walls.
    Wall,
    /// Place doors.
    Door,
    /// Place windows.
    Window,
    /// Device placement. Taps are ignored; devices are chosen from the catalog.
    Device,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub const ALL: [Self; 5] = [Self::Room, Self::Wall, Self::Door, Self::Window, Self::Device];

    /// Localized toolbar label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Room => "房间",
            Self::Wall => "墙壁",
            Self::Door => "门",
            Self::Window => "窗户",
            Self::Device => "设备",
        }
    }

    /// Hint shown under the canvas while this tool is active.
    #[must_use]
    pub const fn guide(self) -> &'static str {
        match self {
            Self::Room => "💡 点击画布添加房间，点击房间选中编辑",
            Self::Wall => "🧱 点击画布添加墙壁",
            Self::Door => "🚪 点击画布添加门",
            Self::Window => "🪟 点击画布添加窗户",
            Self::Device => "📱 在设备列表中选择设备",
        }
    }
}

impl std::str::FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(Self::Room),
            "wall" => Ok(Self::Wall),
            "door" => Ok(Self::Door),
            "window" => Ok(Self::Window),
            "device" => Ok(Self::Device),
            other => Err(format!("unknown tool: {other}")),
        }
    }
}

/// What a tap did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// An existing room was selected.
    Selected(ElementId),
    /// A new element was created.
    Created(ElementKind, ElementId),
    /// Nothing happened.
    Ignored,
}

/// Interprets taps under the active tool.
///
/// Holds no scene state of its own; hit-testing reads the store it is
/// given and every change goes through the store's operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolController;

impl ToolController {
    /// Create a controller.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Dispatch an input event. Non-tap events are ignored.
    #[allow(clippy::unused_self)]
    pub fn handle_event(&self, store: &mut SceneStore, event: &InputEvent) -> ToolOutcome {
        match event.tap_point() {
            Some((x, y)) => self.apply(store, x, y),
            None => {
                tracing::trace!("ignoring non-tap event {event:?}");
                ToolOutcome::Ignored
            }
        }
    }

    /// Apply the store's active tool at a point.
    #[allow(clippy::unused_self)]
    pub fn apply(&self, store: &mut SceneStore, x: f32, y: f32) -> ToolOutcome {
        let tool = store.current_tool();
        tracing::debug!("{tool:?} tap at ({x}, {y})");
        match tool {
            Tool::Room => Self::select_or_create_room(store, x, y),
            Tool::Wall => {
                let wall = Self::wall_at(x, y);
                let id = wall.id.clone();
                store.add_wall(wall);
                ToolOutcome::Created(ElementKind::Wall, id)
            }
            Tool::Door => {
                let door = Self::door_at(x, y);
                let id = door.id.clone();
                store.add_door(door);
                ToolOutcome::Created(ElementKind::Door, id)
            }
            Tool::Window => {
                let window = Self::window_at(x, y);
                let id = window.id.clone();
                store.add_window(window);
                ToolOutcome::Created(ElementKind::Window, id)
            }
            Tool::Device => ToolOutcome::Ignored,
        }
    }

    fn select_or_create_room(store: &mut SceneStore, x: f32, y: f32) -> ToolOutcome {
        if let Some(id) = store.scene().room_at(x, y).map(|r| r.id.clone()) {
            store.set_selected_room(Some(id.clone()));
            return ToolOutcome::Selected(id);
        }
        let room = Self::room_at(x, y);
        let id = room.id.clone();
        store.add_room(room);
        store.set_selected_room(Some(id.clone()));
        ToolOutcome::Created(ElementKind::Room, id)
    }

    /// A new room centred on the point, anchor clamped to the origin.
    #[must_use]
    pub fn room_at(x: f32, y: f32) -> Room {
        let (width, height) = NEW_ROOM_SIZE;
        Room {
            id: ElementId::generate(ElementKind::Room.id_prefix()),
            name: NEW_ROOM_NAME.to_string(),
            room_type: RoomType::Other,
            x: (x - width / 2.0).max(0.0),
            y: (y - height / 2.0).max(0.0),
            width,
            height,
            devices: Vec::new(),
        }
    }

    /// A new horizontal wall centred on the point.
    #[must_use]
    pub fn wall_at(x: f32, y: f32) -> Wall {
        let half = NEW_WALL_LENGTH / 2.0;
        Wall {
            id: ElementId::generate(ElementKind::Wall.id_prefix()),
            x1: (x - half).max(0.0),
            y1: y,
            x2: (x + half).max(0.0),
            y2: y,
            thickness: Wall::DEFAULT_THICKNESS,
        }
    }

    /// A new horizontal door centred on the point.
    #[must_use]
    pub fn door_at(x: f32, y: f32) -> Door {
        let (width, height) = NEW_DOOR_SIZE;
        Door {
            id: ElementId::generate(ElementKind::Door.id_prefix()),
            x: (x - width / 2.0).max(0.0),
            y: (y - height / 2.0).max(0.0),
            width,
            height,
            orientation: Orientation::Horizontal,
        }
    }

    /// A new horizontal window centred on the point.
    #[must_use]
    pub fn window_at(x: f32, y: f32) -> Window {
        let (width, height) = NEW_WINDOW_SIZE;
        Window {
            id: ElementId::generate(ElementKind::Window.id_prefix()),
            x: (x - width / 2.0).max(0.0),
            y: (y - height / 2.0).max(0.0),
            width,
            height,
            orientation: Orientation::Horizontal,
        }
    }
}
