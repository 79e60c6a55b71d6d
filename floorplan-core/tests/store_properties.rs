//! Store Property Tests
//!
//! Checks the scene store against a reference reducer and exercises the
//! device selection rules with generated operation sequences.

use floorplan_core::{
    Catalog, ElementId, Room, RoomPatch, RoomType, SceneStore, Tool, ToolController,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum RoomOp {
    Add(u8),
    Update(u8, Option<String>, Option<f32>),
    Remove(u8),
}

fn room(tag: u8) -> Room {
    Room::try_new(
        ElementId::from(format!("r{tag}")),
        format!("room {tag}"),
        RoomType::Other,
        f32::from(tag),
        f32::from(tag),
        10.0,
        10.0,
    )
    .expect("valid room")
}

fn room_op() -> impl Strategy<Value = RoomOp> {
    prop_oneof![
        (0u8..6).prop_map(RoomOp::Add),
        (
            0u8..6,
            proptest::option::of("[a-z]{1,6}"),
            proptest::option::of(1.0f32..500.0)
        )
            .prop_map(|(t, name, width)| RoomOp::Update(t, name, width)),
        (0u8..6).prop_map(RoomOp::Remove),
    ]
}

/// Fold operations over a plain vector the obvious way.
fn reference(ops: &[RoomOp]) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::new();
    for op in ops {
        match op {
            RoomOp::Add(t) => rooms.push(room(*t)),
            RoomOp::Update(t, name, width) => {
                let id = ElementId::from(format!("r{t}"));
                rooms = rooms
                    .into_iter()
                    .map(|mut r| {
                        if r.id == id {
                            if let Some(name) = name {
                                r.name = name.clone();
                            }
                            if let Some(width) = width {
                                r.width = *width;
                            }
                        }
                        r
                    })
                    .collect();
            }
            RoomOp::Remove(t) => {
                let id = ElementId::from(format!("r{t}"));
                rooms.retain(|r| r.id != id);
            }
        }
    }
    rooms
}

proptest! {
    #[test]
    fn prop_room_ops_match_reference(ops in proptest::collection::vec(room_op(), 0..40)) {
        let mut store = SceneStore::new();
        for op in &ops {
            match op {
                RoomOp::Add(t) => store.add_room(room(*t)),
                RoomOp::Update(t, name, width) => store.update_room(
                    &ElementId::from(format!("r{t}")),
                    RoomPatch {
                        name: name.clone(),
                        width: *width,
                        ..RoomPatch::default()
                    },
                ),
                RoomOp::Remove(t) => store.remove_room(&ElementId::from(format!("r{t}"))),
            }
        }
        prop_assert_eq!(&store.scene().rooms, &reference(&ops));
    }

    #[test]
    fn prop_select_device_never_duplicates(ids in proptest::collection::vec(1u32..=8, 0..50)) {
        let catalog = Catalog::builtin();
        let mut store = SceneStore::new();
        for id in &ids {
            store.select_device(catalog.device_by_id(*id).expect("device"));
        }

        let mut seen: Vec<u32> = store.selected_devices().iter().map(|d| d.device.id).collect();
        let total = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), total);
        prop_assert_eq!(store.device_count(), ids.len() as u64);
    }

    #[test]
    fn prop_clear_after_any_template(
        index in 0usize..3,
        taps in proptest::collection::vec((0.0f32..375.0, 0.0f32..300.0), 0..10),
    ) {
        let catalog = Catalog::builtin();
        let mut store = SceneStore::new();
        let controller = ToolController::new();
        for (x, y) in &taps {
            controller.apply(&mut store, *x, *y);
        }
        store.load_template(&catalog.templates[index]);
        store.clear_canvas();

        prop_assert!(store.scene().rooms.is_empty());
        prop_assert!(store.scene().walls.is_empty());
        prop_assert!(store.scene().doors.is_empty());
        prop_assert!(store.scene().windows.is_empty());
        prop_assert!(store.scene().selected_room.is_none());
    }
}

#[test]
fn test_design_session_end_to_end() {
    let catalog = Catalog::builtin();
    let mut store = SceneStore::with_seed_orders();
    let controller = ToolController::new();

    store.load_template(catalog.template_by_name("一室一厅").expect("template"));

    // Tap inside the living room selects it.
    controller.apply(&mut store, 60.0, 60.0);
    assert_eq!(store.selected_room().map(|r| r.name.as_str()), Some("客厅"));
    assert_eq!(store.scene().rooms.len(), 4);

    store.set_current_tool(Tool::Wall);
    controller.apply(&mut store, 200.0, 280.0);
    assert_eq!(store.scene().walls.len(), 5);

    store.set_current_tool(Tool::Window);
    controller.apply(&mut store, 120.0, 28.0);
    assert_eq!(store.scene().windows.len(), 2);

    store.select_device(catalog.device_by_id(1).expect("bulb"));
    store.select_device(catalog.device_by_id(1).expect("bulb"));
    store.select_device(catalog.device_by_id(7).expect("switch"));

    let quote = store.quote();
    // 2*89 + 159 = 337; design 400; install 3*50; service 200
    assert_eq!(quote.device_total, 337);
    assert_eq!(quote.design_fee, 400);
    assert_eq!(quote.installation_fee, 150);
    assert_eq!(quote.total(), 1087);
}
