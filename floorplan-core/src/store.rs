//! The scene store: single owner of the editable scene.
//!
//! [`SceneStore`] owns the current [`Scene`], the device selection and the
//! order list. Its methods are the only mutation surface; every mutation
//! notifies subscribed observers with the settled scene.

use chrono::NaiveDateTime;

use crate::{
    Device, Door, ElementId, Order, Quote, Room, RoomPatch, Scene, SelectedDevice, Template, Tool,
    Wall, Window,
};

/// Observer called with the scene after each mutation.
pub type Observer = Box<dyn FnMut(&Scene)>;

/// Handle returned by [`SceneStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owned application state for the designer.
///
/// # Example
///
/// ```
/// use floorplan_core::store::SceneStore;
/// use floorplan_core::{Room, RoomType};
///
/// let mut store = SceneStore::new();
/// let room = Room::try_new("r1".into(), "客厅", RoomType::Living, 0.0, 0.0, 100.0, 80.0)
///     .unwrap();
/// store.add_room(room);
/// assert_eq!(store.scene().rooms.len(), 1);
/// ```
#[derive(Default)]
pub struct SceneStore {
    scene: Scene,
    selected_devices: Vec<SelectedDevice>,
    orders: Vec<Order>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
}

impl std::fmt::Debug for SceneStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneStore")
            .field("scene", &self.scene)
            .field("selected_devices", &self.selected_devices)
            .field("orders", &self.orders)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SceneStore {
    /// Create a store with an empty scene and no orders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the example orders.
    #[must_use]
    pub fn with_seed_orders() -> Self {
        Self {
            orders: Order::seeded(),
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The current scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The active tool.
    #[must_use]
    pub fn current_tool(&self) -> Tool {
        self.scene.current_tool
    }

    /// The selected room, if it still exists.
    #[must_use]
    pub fn selected_room(&self) -> Option<&Room> {
        self.scene.selected()
    }

    /// Devices chosen for purchase, in selection order.
    #[must_use]
    pub fn selected_devices(&self) -> &[SelectedDevice] {
        &self.selected_devices
    }

    /// Total number of device units selected.
    #[must_use]
    pub fn device_count(&self) -> u64 {
        self.selected_devices
            .iter()
            .map(|d| u64::from(d.quantity))
            .sum()
    }

    /// Work orders, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Price breakdown for the current rooms and device selection.
    #[must_use]
    pub fn quote(&self) -> Quote {
        Quote::new(self.scene.rooms.len(), &self.selected_devices)
    }

    // -----------------------------------------------------------------------
    // Observers
    // -----------------------------------------------------------------------

    /// Register an observer called after every mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&Scene) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.scene);
        }
    }

    // -----------------------------------------------------------------------
    // Spatial elements
    // -----------------------------------------------------------------------

    /// Append a room. IDs are not checked for duplicates.
    pub fn add_room(&mut self, room: Room) {
        tracing::debug!("add room {} at ({}, {})", room.id, room.x, room.y);
        self.scene.rooms.push(room);
        self.notify();
    }

    /// Merge a partial update into every room with this ID. No-op if absent.
    pub fn update_room(&mut self, id: &ElementId, patch: RoomPatch) {
        let mut matched = 0usize;
        for room in self.scene.rooms.iter_mut().filter(|r| r.id == *id) {
            room.apply_patch(patch.clone());
            matched += 1;
        }
        if matched == 0 {
            tracing::debug!("update room {id}: not found");
        } else {
            tracing::debug!("update room {id} ({matched} matched)");
        }
        self.notify();
    }

    /// Remove the room with this ID. No-op if absent.
    pub fn remove_room(&mut self, id: &ElementId) {
        tracing::debug!("remove room {id}");
        self.scene.rooms.retain(|r| r.id != *id);
        self.notify();
    }

    /// Set or clear the room selection.
    pub fn set_selected_room(&mut self, id: Option<ElementId>) {
        tracing::debug!("select room {:?}", id.as_ref().map(ElementId::as_str));
        self.scene.selected_room = id;
        self.notify();
    }

    /// Append a wall.
    pub fn add_wall(&mut self, wall: Wall) {
        tracing::debug!(
            "add wall {} ({}, {})-({}, {})",
            wall.id,
            wall.x1,
            wall.y1,
            wall.x2,
            wall.y2
        );
        self.scene.walls.push(wall);
        self.notify();
    }

    /// Remove the wall with this ID. No-op if absent.
    pub fn remove_wall(&mut self, id: &ElementId) {
        tracing::debug!("remove wall {id}");
        self.scene.walls.retain(|w| w.id != *id);
        self.notify();
    }

    /// Append a door.
    pub fn add_door(&mut self, door: Door) {
        tracing::debug!("add door {} at ({}, {})", door.id, door.x, door.y);
        self.scene.doors.push(door);
        self.notify();
    }

    /// Append a window.
    pub fn add_window(&mut self, window: Window) {
        tracing::debug!("add window {} at ({}, {})", window.id, window.x, window.y);
        self.scene.windows.push(window);
        self.notify();
    }

    /// Replace all spatial collections with the template's and clear the
    /// selection. The active tool is kept.
    pub fn load_template(&mut self, template: &Template) {
        tracing::debug!(
            "load template {:?}: {} rooms, {} walls, {} doors, {} windows",
            template.name,
            template.rooms.len(),
            template.walls.len(),
            template.doors.len(),
            template.windows.len()
        );
        self.scene.rooms = template.rooms.clone();
        self.scene.walls = template.walls.clone();
        self.scene.doors = template.doors.clone();
        self.scene.windows = template.windows.clone();
        self.scene.selected_room = None;
        self.notify();
    }

    /// Empty all spatial collections and clear the selection.
    pub fn clear_canvas(&mut self) {
        tracing::debug!("clear canvas");
        self.scene.rooms.clear();
        self.scene.walls.clear();
        self.scene.doors.clear();
        self.scene.windows.clear();
        self.scene.selected_room = None;
        self.notify();
    }

    /// Set the active tool.
    pub fn set_current_tool(&mut self, tool: Tool) {
        tracing::debug!("tool -> {tool:?}");
        self.scene.current_tool = tool;
        self.notify();
    }

    // -----------------------------------------------------------------------
    // Device selection
    // -----------------------------------------------------------------------

    /// Add one unit of a catalog device to the selection.
    ///
    /// An existing entry for the same id has its quantity incremented; a
    /// catalog id never appears twice.
    pub fn select_device(&mut self, device: &Device) {
        match self
            .selected_devices
            .iter_mut()
            .find(|d| d.device.id == device.id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(1);
                tracing::debug!("device {} quantity -> {}", device.id, existing.quantity);
            }
            None => {
                tracing::debug!("select device {} ({})", device.id, device.name);
                self.selected_devices.push(SelectedDevice {
                    device: device.clone(),
                    quantity: 1,
                });
            }
        }
        self.notify();
    }

    /// Remove a device from the selection regardless of quantity.
    pub fn unselect_device(&mut self, device_id: u32) {
        tracing::debug!("unselect device {device_id}");
        self.selected_devices.retain(|d| d.device.id != device_id);
        self.notify();
    }

    /// Set a device's quantity exactly. Zero or negative removes it.
    pub fn update_device_quantity(&mut self, device_id: u32, quantity: i64) {
        if quantity <= 0 {
            self.unselect_device(device_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(entry) = self
            .selected_devices
            .iter_mut()
            .find(|d| d.device.id == device_id)
        {
            tracing::debug!("device {device_id} quantity -> {quantity}");
            entry.quantity = quantity;
        }
        self.notify();
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    /// Replace the order list.
    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
        self.notify();
    }

    /// Insert an order at the front of the list.
    pub fn add_order(&mut self, order: Order) {
        tracing::debug!("add order {}", order.id);
        self.orders.insert(0, order);
        self.notify();
    }

    /// Quote the current design and file it as a new pending order.
    pub fn submit_quote(&mut self, now: NaiveDateTime) -> Order {
        let order = Order::from_quote(&self.quote(), now);
        tracing::info!("submitted order {} for {}", order.id, order.formatted_amount());
        self.add_order(order.clone());
        order
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{Catalog, OrderStatus, RoomType};

    fn room(id: &str) -> Room {
        Room::try_new(id.into(), id, RoomType::Other, 0.0, 0.0, 10.0, 10.0).expect("valid room")
    }

    fn device(id: u32) -> Device {
        Catalog::builtin().device_by_id(id).expect("device").clone()
    }

    #[test]
    fn test_add_update_remove_room() {
        let mut store = SceneStore::new();
        store.add_room(room("a"));
        store.add_room(room("b"));

        store.update_room(
            &"b".into(),
            RoomPatch {
                name: Some("书房".to_string()),
                room_type: Some(RoomType::Study),
                ..RoomPatch::default()
            },
        );
        let b = store.scene().room(&"b".into()).expect("b");
        assert_eq!(b.name, "书房");
        assert_eq!(b.room_type, RoomType::Study);

        store.remove_room(&"a".into());
        let ids: Vec<_> = store.scene().rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    fn wall(id: &str) -> Wall {
        Wall {
            id: id.into(),
            x1: 0.0,
            y1: 0.0,
            x2: 10.0,
            y2: 0.0,
            thickness: Wall::DEFAULT_THICKNESS,
        }
    }

    fn count_notifications(store: &mut SceneStore) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        store.subscribe(move |_| *sink.borrow_mut() += 1);
        count
    }

    #[test]
    fn test_update_reaches_every_duplicate_id() {
        let mut store = SceneStore::new();
        store.add_room(room("dup"));
        store.add_room(room("other"));
        store.add_room(room("dup"));

        store.update_room(
            &"dup".into(),
            RoomPatch {
                name: Some("a".to_string()),
                ..RoomPatch::default()
            },
        );

        let names: Vec<_> = store.scene().rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "other", "a"]);
    }

    #[test]
    fn test_remove_wall_keeps_order() {
        let mut store = SceneStore::new();
        for id in ["w1", "w2", "w3", "w4"] {
            store.add_wall(wall(id));
        }
        let notified = count_notifications(&mut store);

        store.remove_wall(&"w2".into());
        let ids: Vec<_> = store.scene().walls.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "w3", "w4"]);
        assert_eq!(*notified.borrow(), 1);

        store.remove_wall(&"zzz".into());
        assert_eq!(store.scene().walls.len(), 3);
        assert_eq!(*notified.borrow(), 2);
    }

    #[test]
    fn test_set_orders_replaces_list() {
        let mut store = SceneStore::with_seed_orders();
        let notified = count_notifications(&mut store);
        let kept = store.orders()[1].clone();

        store.set_orders(vec![kept.clone()]);
        assert_eq!(store.orders(), &[kept]);
        assert_eq!(*notified.borrow(), 1);

        store.set_orders(Vec::new());
        assert!(store.orders().is_empty());
        assert_eq!(*notified.borrow(), 2);
    }

    #[test]
    fn test_missing_ids_are_noops() {
        let mut store = SceneStore::new();
        store.add_room(room("a"));
        let before = store.scene().clone();

        store.update_room(&"zzz".into(), RoomPatch::default());
        store.remove_room(&"zzz".into());
        store.unselect_device(42);
        store.update_device_quantity(42, 3);

        assert_eq!(store.scene(), &before);
        assert!(store.selected_devices().is_empty());
    }

    #[test]
    fn test_select_device_twice_increments() {
        let mut store = SceneStore::new();
        store.select_device(&device(1));
        store.select_device(&device(1));
        assert_eq!(store.selected_devices().len(), 1);
        assert_eq!(store.selected_devices()[0].quantity, 2);

        store.select_device(&device(3));
        assert_eq!(store.selected_devices().len(), 2);
        assert_eq!(store.device_count(), 3);
    }

    #[test]
    fn test_update_device_quantity() {
        let mut store = SceneStore::new();
        store.select_device(&device(1));
        store.select_device(&device(2));

        store.update_device_quantity(1, 3);
        assert_eq!(store.selected_devices()[0].quantity, 3);
        store.update_device_quantity(1, 3);
        assert_eq!(store.selected_devices()[0].quantity, 3);

        store.update_device_quantity(1, 0);
        assert!(store.selected_devices().iter().all(|d| d.device.id != 1));

        store.update_device_quantity(2, -5);
        assert!(store.selected_devices().is_empty());
    }

    #[test]
    fn test_unselect_ignores_quantity() {
        let mut store = SceneStore::new();
        store.select_device(&device(4));
        store.update_device_quantity(4, 10);
        store.unselect_device(4);
        assert!(store.selected_devices().is_empty());
    }

    #[test]
    fn test_load_template_replaces_and_clears_selection() {
        let catalog = Catalog::builtin();
        let mut store = SceneStore::new();
        store.add_room(room("mine"));
        store.set_selected_room(Some("mine".into()));
        store.set_current_tool(Tool::Door);

        let template = catalog.template_by_name("三室两厅").expect("template");
        store.load_template(template);

        assert_eq!(store.scene().rooms, template.rooms);
        assert_eq!(store.scene().walls, template.walls);
        assert_eq!(store.scene().doors, template.doors);
        assert_eq!(store.scene().windows, template.windows);
        assert!(store.scene().selected_room.is_none());
        assert_eq!(store.current_tool(), Tool::Door);
    }

    #[test]
    fn test_load_then_clear_is_empty() {
        let catalog = Catalog::builtin();
        let mut store = SceneStore::new();
        for template in &catalog.templates {
            store.load_template(template);
            store.set_selected_room(Some("r1".into()));
            store.clear_canvas();
            assert!(store.scene().is_empty());
            assert!(store.scene().selected_room.is_none());
        }
    }

    #[test]
    fn test_selected_room_goes_stale_after_removal() {
        let mut store = SceneStore::new();
        store.add_room(room("a"));
        store.set_selected_room(Some("a".into()));
        assert!(store.selected_room().is_some());
        store.remove_room(&"a".into());
        assert!(store.selected_room().is_none());
    }

    #[test]
    fn test_observers_see_every_mutation() {
        let mut store = SceneStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |scene| sink.borrow_mut().push(scene.rooms.len()));

        store.add_room(room("a"));
        store.add_room(room("b"));
        store.remove_room(&"a".into());
        assert_eq!(*seen.borrow(), vec![1, 2, 1]);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.clear_canvas();
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_orders_newest_first_and_submit() {
        let mut store = SceneStore::with_seed_orders();
        assert_eq!(store.orders().len(), 2);

        store.add_room(room("a"));
        store.select_device(&device(8));
        let now = NaiveDateTime::parse_from_str("2024-06-01 10:00", "%Y-%m-%d %H:%M")
            .expect("timestamp");
        let order = store.submit_quote(now);

        assert_eq!(store.orders().len(), 3);
        assert_eq!(store.orders()[0], order);
        assert_eq!(order.status, OrderStatus::Pending);
        // 79 + 300 + 50 + 200
        assert_eq!(order.amount, 629);
    }
}
