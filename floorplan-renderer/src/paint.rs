//! Scene to draw call mapping.
//!
//! Layers are painted back to front: grid, walls, rooms with their device
//! badges, doors, then windows.

use std::f32::consts::FRAC_PI_2;

use floorplan_core::{Door, Orientation, Room, Scene, Wall, Window};

use crate::backend::{DrawSurface, TextAlign};
use crate::{RendererConfig, Theme};

/// Side length of a device badge.
pub const DEVICE_BADGE_SIZE: f32 = 20.0;

/// Distance between neighbouring device badges.
pub const DEVICE_BADGE_PITCH: f32 = 30.0;

/// Device badges per row inside a room.
pub const DEVICE_BADGE_COLUMNS: usize = 3;

/// Top-left corner of the `index`th device badge inside a room.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn device_slot(room: &Room, index: usize) -> (f32, f32) {
    let column = (index % DEVICE_BADGE_COLUMNS) as f32;
    let row = (index / DEVICE_BADGE_COLUMNS) as f32;
    (
        room.x + 10.0 + column * DEVICE_BADGE_PITCH,
        room.y + 20.0 + row * DEVICE_BADGE_PITCH,
    )
}

pub(crate) fn paint_scene(config: &RendererConfig, scene: &Scene, surface: &mut dyn DrawSurface) {
    let theme = &config.theme;
    surface.clear_rect(0.0, 0.0, config.width, config.height);
    paint_grid(config, surface);
    for wall in &scene.walls {
        paint_wall(theme, wall, surface);
    }
    for room in &scene.rooms {
        paint_room(theme, room, scene.is_selected(&room.id), surface);
    }
    for door in &scene.doors {
        paint_door(theme, door, surface);
    }
    for window in &scene.windows {
        paint_window(theme, window, surface);
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn paint_grid(config: &RendererConfig, surface: &mut dyn DrawSurface) {
    let step = config.grid_size;
    surface.set_stroke_color(&config.theme.grid_color);
    surface.set_line_width(config.theme.grid_line_width);

    let columns = (config.width / step).floor() as u32;
    for i in 0..=columns {
        let x = i as f32 * step;
        surface.begin_path();
        surface.move_to(x, 0.0);
        surface.line_to(x, config.height);
        surface.stroke();
    }

    let rows = (config.height / step).floor() as u32;
    for i in 0..=rows {
        let y = i as f32 * step;
        surface.begin_path();
        surface.move_to(0.0, y);
        surface.line_to(config.width, y);
        surface.stroke();
    }
}

fn paint_wall(theme: &Theme, wall: &Wall, surface: &mut dyn DrawSurface) {
    let thickness = if wall.thickness > 0.0 {
        wall.thickness
    } else {
        Wall::DEFAULT_THICKNESS
    };
    surface.set_stroke_color(&theme.wall_color);
    surface.set_line_width(thickness);
    surface.begin_path();
    surface.move_to(wall.x1, wall.y1);
    surface.line_to(wall.x2, wall.y2);
    surface.stroke();
}

fn paint_room(theme: &Theme, room: &Room, selected: bool, surface: &mut dyn DrawSurface) {
    let (fill, border, border_width) = if selected {
        (
            &theme.room_fill_selected,
            &theme.room_border_selected,
            theme.room_border_width_selected,
        )
    } else {
        (&theme.room_fill, &theme.room_border, theme.room_border_width)
    };

    surface.set_fill_color(fill);
    surface.fill_rect(room.x, room.y, room.width, room.height);
    surface.set_stroke_color(border);
    surface.set_line_width(border_width);
    surface.stroke_rect(room.x, room.y, room.width, room.height);

    surface.set_fill_color(&theme.label_color);
    surface.set_font_size(theme.label_font_size);
    surface.set_text_align(TextAlign::Center);
    surface.fill_text(
        &room.name,
        room.x + room.width / 2.0,
        room.y + room.height / 2.0,
    );

    for (index, device) in room.devices.iter().enumerate() {
        let (x, y) = device_slot(room, index);
        surface.set_fill_color(&theme.device_fill);
        surface.fill_rect(x, y, DEVICE_BADGE_SIZE, DEVICE_BADGE_SIZE);
        surface.set_stroke_color(&theme.device_border);
        surface.set_line_width(theme.device_border_width);
        surface.stroke_rect(x, y, DEVICE_BADGE_SIZE, DEVICE_BADGE_SIZE);
        surface.set_font_size(theme.device_font_size);
        surface.fill_text(device.glyph(), x + 10.0, y + 15.0);
    }
}

fn paint_door(theme: &Theme, door: &Door, surface: &mut dyn DrawSurface) {
    surface.set_fill_color(&theme.door_color);
    surface.fill_rect(door.x, door.y, door.width, door.height);

    surface.set_stroke_color(&theme.door_color);
    surface.set_line_width(theme.door_line_width);
    surface.begin_path();
    match door.orientation {
        Orientation::Horizontal => surface.arc(
            door.x,
            door.y + door.height / 2.0,
            door.width,
            -FRAC_PI_2,
            0.0,
        ),
        Orientation::Vertical => surface.arc(
            door.x + door.width / 2.0,
            door.y,
            door.height,
            0.0,
            FRAC_PI_2,
        ),
    }
    surface.stroke();
}

fn paint_window(theme: &Theme, window: &Window, surface: &mut dyn DrawSurface) {
    surface.set_fill_color(&theme.window_fill);
    surface.fill_rect(window.x, window.y, window.width, window.height);
    surface.set_stroke_color(&theme.window_stroke);
    surface.set_line_width(theme.window_line_width);
    surface.stroke_rect(window.x, window.y, window.width, window.height);

    // Divider runs across the short side.
    surface.begin_path();
    match window.orientation {
        Orientation::Horizontal => {
            let mid = window.x + window.width / 2.0;
            surface.move_to(mid, window.y);
            surface.line_to(mid, window.y + window.height);
        }
        Orientation::Vertical => {
            let mid = window.y + window.height / 2.0;
            surface.move_to(window.x, mid);
            surface.line_to(window.x + window.width, mid);
        }
    }
    surface.stroke();
}
