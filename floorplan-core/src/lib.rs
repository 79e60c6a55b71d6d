//! # Floorplan Core
//!
//! Floor plan editing core for the smart-home designer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                floorplan-core               │
//! ├─────────────────────────────────────────────┤
//! │  Spatial Model   │  Tool Controller         │
//! │  - Rooms, walls  │  - Hit-test rooms        │
//! │  - Doors, windows│  - Synthesize elements   │
//! ├─────────────────────────────────────────────┤
//! │  Scene Store     │  Catalog / Orders        │
//! │  - Single owner  │  - Devices, templates    │
//! │  - Observers     │  - Quotes, work orders   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Taps go through [`ToolController`], which reads the [`SceneStore`] for
//! hit-testing and writes back through its operations. The store notifies
//! observers after every mutation so a renderer can redraw.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod element;
pub mod error;
pub mod event;
pub mod order;
pub mod scene;
pub mod store;
pub mod tool;

pub use catalog::{
    Catalog, Device, DeviceCategory, SelectedDevice, Solution, Template, WHOLE_HOUSE,
};
pub use element::{
    Door, ElementId, ElementKind, Orientation, PlacedDevice, Room, RoomPatch, RoomType, Wall,
    Window,
};
pub use error::{PlanError, PlanResult};
pub use event::{InputEvent, TouchEvent, TouchPhase, TouchPoint};
pub use order::{format_price, Order, OrderFilter, OrderStatus, Quote};
pub use scene::{Scene, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use store::{SceneStore, SubscriptionId};
pub use tool::{Tool, ToolController, ToolOutcome};

/// Floorplan core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
