//! Read-only device and template catalog.

use serde::{Deserialize, Serialize};

use crate::{Door, Orientation, PlanError, PlanResult, Room, RoomType, Wall, Window};

/// Sentinel in [`Device::suitable`] meaning "any room".
pub const WHOLE_HOUSE: &str = "全屋";

/// Device category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    /// Lights and switches.
    Lighting,
    /// Locks and cameras.
    Security,
    /// Thermostats and sensors.
    Climate,
    /// Speakers and media.
    Entertainment,
    /// Curtains, plugs and other appliances.
    Appliances,
}

impl DeviceCategory {
    /// Localized display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Lighting => "照明",
            Self::Security => "安防",
            Self::Climate => "环境",
            Self::Entertainment => "娱乐",
            Self::Appliances => "家电",
        }
    }
}

/// A purchasable device definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Catalog id.
    pub id: u32,
    /// Product name.
    pub name: String,
    /// Category.
    pub category: DeviceCategory,
    /// Unit price in whole currency units.
    pub price: u64,
    /// Feature bullet points.
    #[serde(default)]
    pub features: Vec<String>,
    /// Power rating label.
    #[serde(default)]
    pub power: String,
    /// Room names the device suits, or [`WHOLE_HOUSE`].
    #[serde(default)]
    pub suitable: Vec<String>,
    /// Icon glyph.
    #[serde(default)]
    pub icon: String,
}

impl Device {
    /// Whether this device suits the given room.
    #[must_use]
    pub fn suits(&self, room: &Room) -> bool {
        self.suitable
            .iter()
            .any(|s| s == WHOLE_HOUSE || *s == room.name)
    }

    /// Case-insensitive match against name and features.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .features
                .iter()
                .any(|f| f.to_lowercase().contains(&query))
    }
}

/// A catalog device chosen for purchase with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDevice {
    /// The catalog entry.
    #[serde(flatten)]
    pub device: Device,
    /// Quantity, always at least 1 while selected.
    pub quantity: u32,
}

impl SelectedDevice {
    /// Line total for this selection.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.device.price * u64::from(self.quantity)
    }
}

/// A named floor plan preset.
///
/// Any missing collection deserializes to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template id.
    #[serde(default)]
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Descriptive size label.
    #[serde(default)]
    pub size: String,
    /// Rooms.
    #[serde(default)]
    pub rooms: Vec<Room>,
    /// Walls.
    #[serde(default)]
    pub walls: Vec<Wall>,
    /// Doors.
    #[serde(default)]
    pub doors: Vec<Door>,
    /// Windows.
    #[serde(default)]
    pub windows: Vec<Window>,
}

impl Template {
    /// Parse a template from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is not a template object.
    pub fn from_json(json: &str) -> PlanResult<Self> {
        serde_json::from_str(json).map_err(PlanError::Serialization)
    }

    /// Room names joined for list display.
    #[must_use]
    pub fn room_summary(&self) -> String {
        self.rooms
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join("、")
    }
}

/// A packaged smart-home solution offered on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Solution id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// One-line tagline.
    pub description: String,
    /// Glyph shown on the card.
    pub icon: String,
    /// Starting price label, already formatted.
    pub price_label: String,
    /// Id of the template the solution opens in the editor.
    pub template_id: u32,
}

/// The static device, template and solution catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Device definitions.
    pub devices: Vec<Device>,
    /// Floor plan templates.
    pub templates: Vec<Template>,
    /// Solution packages.
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

impl Catalog {
    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            devices: builtin_devices(),
            templates: builtin_templates(),
            solutions: builtin_solutions(),
        }
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::DeviceNotFound`] if no device has this id.
    pub fn device_by_id(&self, id: u32) -> PlanResult<&Device> {
        self.devices
            .iter()
            .find(|d| d.id == id)
            .ok_or(PlanError::DeviceNotFound(id))
    }

    /// Look up a template by its display name.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::TemplateNotFound`] if no template has this name.
    pub fn template_by_name(&self, name: &str) -> PlanResult<&Template> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| PlanError::TemplateNotFound(name.to_string()))
    }

    /// Look up a template by id.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::TemplateNotFound`] if no template has this id.
    pub fn template_by_id(&self, id: u32) -> PlanResult<&Template> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| PlanError::TemplateNotFound(id.to_string()))
    }

    /// Look up a solution package by id.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::SolutionNotFound`] if no solution has this id.
    pub fn solution_by_id(&self, id: u32) -> PlanResult<&Solution> {
        self.solutions
            .iter()
            .find(|s| s.id == id)
            .ok_or(PlanError::SolutionNotFound(id))
    }

    /// The template a solution package opens.
    ///
    /// # Errors
    ///
    /// Fails if the solution or its template is missing.
    pub fn solution_template(&self, solution_id: u32) -> PlanResult<&Template> {
        let solution = self.solution_by_id(solution_id)?;
        self.template_by_id(solution.template_id)
    }

    /// Search devices by text and optional category. An empty query matches all.
    pub fn search<'a>(
        &'a self,
        query: &'a str,
        category: Option<DeviceCategory>,
    ) -> impl Iterator<Item = &'a Device> + 'a {
        self.devices.iter().filter(move |d| {
            (category.is_none() || category == Some(d.category))
                && (query.is_empty() || d.matches(query))
        })
    }

    /// Devices that suit the given room.
    pub fn suitable_devices_for<'a>(&'a self, room: &'a Room) -> impl Iterator<Item = &'a Device> {
        self.devices.iter().filter(move |d| d.suits(room))
    }
}

/// Rooms in `rooms` that the device suits.
#[must_use]
pub fn suitable_rooms<'a>(device: &Device, rooms: &'a [Room]) -> Vec<&'a Room> {
    rooms.iter().filter(|r| device.suits(r)).collect()
}

#[allow(clippy::too_many_arguments)]
fn device(
    id: u32,
    name: &str,
    category: DeviceCategory,
    price: u64,
    features: [&str; 3],
    power: &str,
    suitable: &[&str],
    icon: &str,
) -> Device {
    Device {
        id,
        name: name.to_string(),
        category,
        price,
        features: features.iter().map(ToString::to_string).collect(),
        power: power.to_string(),
        suitable: suitable.iter().map(ToString::to_string).collect(),
        icon: icon.to_string(),
    }
}

#[rustfmt::skip]
fn builtin_devices() -> Vec<Device> {
    use DeviceCategory::{Appliances, Climate, Entertainment, Lighting, Security};
    vec![
        device(1, "智能LED灯泡", Lighting, 89, ["调光调色", "语音控制", "定时开关"], "9W", &["客厅", "卧室", "书房"], "💡"),
        device(2, "智能门锁", Security, 1299, ["指纹识别", "密码开锁", "远程监控"], "电池供电", &["入户门"], "🔒"),
        device(3, "智能摄像头", Security, 199, ["1080P高清", "夜视功能", "移动侦测"], "5V/1A", &["客厅", "门口", "阳台"], "📹"),
        device(4, "智能温控器", Climate, 399, ["温度调节", "湿度监测", "APP控制"], "12V/2A", &["客厅", "卧室"], "🌡️"),
        device(5, "智能音响", Entertainment, 599, ["高保真音质", "语音助手", "多房间同步"], "20W", &["客厅", "书房"], "🔊"),
        device(6, "智能窗帘", Appliances, 799, ["电动开合", "定时控制", "光线感应"], "24V/1.5A", &["客厅", "卧室"], "🪟"),
        device(7, "智能开关", Lighting, 159, ["远程控制", "定时功能", "场景模式"], "220V", &[WHOLE_HOUSE], "🎛️"),
        device(8, "智能插座", Appliances, 79, ["远程开关", "电量监测", "过载保护"], "220V/10A", &[WHOLE_HOUSE], "🔌"),
    ]
}

fn room(id: &str, name: &str, room_type: RoomType, rect: [f32; 4]) -> Room {
    Room {
        id: id.into(),
        name: name.to_string(),
        room_type,
        x: rect[0],
        y: rect[1],
        width: rect[2],
        height: rect[3],
        devices: Vec::new(),
    }
}

/// Four outer walls of the rectangle `(x0, y0)`–`(x1, y1)`.
fn outer_walls(x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Wall> {
    [
        ("w1", x0, y0, x1, y0),
        ("w2", x0, y0, x0, y1),
        ("w3", x0, y1, x1, y1),
        ("w4", x1, y0, x1, y1),
    ]
    .into_iter()
    .map(|(id, x1, y1, x2, y2)| Wall {
        id: id.into(),
        x1,
        y1,
        x2,
        y2,
        thickness: Wall::DEFAULT_THICKNESS,
    })
    .collect()
}

fn builtin_solutions() -> Vec<Solution> {
    let solution = |id: u32, name: &str, description: &str, icon: &str, price: &str, template_id| {
        Solution {
            id,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            price_label: price.to_string(),
            template_id,
        }
    };
    vec![
        solution(1, "全屋智能", "全方位智控", "🏠", "￥15,999起", 3),
        solution(2, "安防套装", "全面防护", "🔒", "￥3,299起", 2),
        solution(3, "影音娱乐", "沉浸体验", "🎬", "￥8,999起", 1),
        solution(4, "智能照明", "光影艺术", "💡", "￥1,299起", 2),
    ]
}

fn door(id: &str, rect: [f32; 4], orientation: Orientation) -> Door {
    Door {
        id: id.into(),
        x: rect[0],
        y: rect[1],
        width: rect[2],
        height: rect[3],
        orientation,
    }
}

fn window(id: &str, rect: [f32; 4], orientation: Orientation) -> Window {
    Window {
        id: id.into(),
        x: rect[0],
        y: rect[1],
        width: rect[2],
        height: rect[3],
        orientation,
    }
}

fn builtin_templates() -> Vec<Template> {
    use Orientation::{Horizontal, Vertical};
    use RoomType::{Bathroom, Bedroom, Kitchen, Living, Study};
    vec![
        Template {
            id: 1,
            name: "一室一厅".to_string(),
            size: "50㎡".to_string(),
            rooms: vec![
                room("r1", "客厅", Living, [50.0, 50.0, 150.0, 100.0]),
                room("r2", "卧室", Bedroom, [220.0, 50.0, 100.0, 100.0]),
                room("r3", "厨房", Kitchen, [50.0, 170.0, 80.0, 60.0]),
                room("r4", "卫生间", Bathroom, [150.0, 170.0, 60.0, 60.0]),
            ],
            walls: outer_walls(30.0, 30.0, 350.0, 250.0),
            doors: vec![
                door("d1", [70.0, 25.0, 30.0, 10.0], Horizontal),
                door("d2", [200.0, 125.0, 10.0, 30.0], Vertical),
            ],
            windows: vec![window("win1", [250.0, 25.0, 40.0, 10.0], Horizontal)],
        },
        Template {
            id: 2,
            name: "两室一厅".to_string(),
            size: "80㎡".to_string(),
            rooms: vec![
                room("r1", "客厅", Living, [50.0, 50.0, 180.0, 120.0]),
                room("r2", "主卧", Bedroom, [250.0, 50.0, 120.0, 100.0]),
                room("r3", "次卧", Bedroom, [250.0, 170.0, 120.0, 80.0]),
                room("r4", "厨房", Kitchen, [50.0, 190.0, 90.0, 70.0]),
                room("r5", "卫生间", Bathroom, [160.0, 190.0, 70.0, 70.0]),
            ],
            walls: outer_walls(30.0, 30.0, 390.0, 280.0),
            doors: vec![
                door("d1", [80.0, 25.0, 30.0, 10.0], Horizontal),
                door("d2", [240.0, 100.0, 10.0, 30.0], Vertical),
                door("d3", [240.0, 200.0, 10.0, 30.0], Vertical),
            ],
            windows: vec![
                window("win1", [300.0, 25.0, 50.0, 10.0], Horizontal),
                window("win2", [385.0, 100.0, 10.0, 40.0], Vertical),
            ],
        },
        Template {
            id: 3,
            name: "三室两厅".to_string(),
            size: "120㎡".to_string(),
            rooms: vec![
                room("r1", "客厅", Living, [50.0, 50.0, 200.0, 150.0]),
                room("r2", "餐厅", Living, [270.0, 50.0, 120.0, 80.0]),
                room("r3", "主卧", Bedroom, [270.0, 150.0, 140.0, 120.0]),
                room("r4", "次卧", Bedroom, [50.0, 220.0, 100.0, 90.0]),
                room("r5", "书房", Study, [170.0, 220.0, 80.0, 90.0]),
                room("r6", "厨房", Kitchen, [420.0, 50.0, 80.0, 100.0]),
                room("r7", "卫生间", Bathroom, [420.0, 170.0, 80.0, 70.0]),
            ],
            walls: outer_walls(30.0, 30.0, 530.0, 330.0),
            doors: vec![
                door("d1", [120.0, 25.0, 30.0, 10.0], Horizontal),
                door("d2", [260.0, 130.0, 10.0, 30.0], Vertical),
                door("d3", [260.0, 270.0, 10.0, 30.0], Vertical),
            ],
            windows: vec![
                window("win1", [350.0, 25.0, 60.0, 10.0], Horizontal),
                window("win2", [525.0, 120.0, 10.0, 50.0], Vertical),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.devices.len(), 8);
        assert_eq!(catalog.templates.len(), 3);
        let t = catalog.template_by_name("两室一厅").expect("template");
        assert_eq!(t.rooms.len(), 5);
        assert_eq!(t.walls.len(), 4);
        assert_eq!(t.doors.len(), 3);
        assert_eq!(t.windows.len(), 2);
        assert_eq!(t.windows[1].orientation, Orientation::Vertical);
    }

    #[test]
    fn test_missing_lookups_fail() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            catalog.template_by_name("五室"),
            Err(PlanError::TemplateNotFound(_))
        ));
        assert!(matches!(
            catalog.device_by_id(99),
            Err(PlanError::DeviceNotFound(99))
        ));
    }

    #[test]
    fn test_search_by_text_and_category() {
        let catalog = Catalog::builtin();
        let names: Vec<_> = catalog.search("语音", None).map(|d| d.id).collect();
        assert_eq!(names, vec![1, 5]);

        let security: Vec<_> = catalog
            .search("", Some(DeviceCategory::Security))
            .map(|d| d.id)
            .collect();
        assert_eq!(security, vec![2, 3]);

        assert_eq!(catalog.search("1080p", None).count(), 1);
    }

    #[test]
    fn test_whole_house_devices_suit_every_room() {
        let catalog = Catalog::builtin();
        let template = catalog.template_by_name("一室一厅").expect("template");
        let kitchen = &template.rooms[2];
        let ids: Vec<_> = catalog.suitable_devices_for(kitchen).map(|d| d.id).collect();
        assert_eq!(ids, vec![7, 8]);

        let bulb = catalog.device_by_id(1).expect("bulb");
        let rooms: Vec<_> = suitable_rooms(bulb, &template.rooms)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(rooms, vec!["客厅", "卧室"]);
    }

    #[test]
    fn test_template_from_json_defaults_missing_collections() {
        let template = Template::from_json(
            r#"{"name":"partial","rooms":[{"id":"a","name":"A","type":"study","x":0,"y":0,"width":10,"height":10}]}"#,
        )
        .expect("parse");
        assert_eq!(template.rooms.len(), 1);
        assert!(template.walls.is_empty());
        assert!(template.doors.is_empty());
        assert!(template.windows.is_empty());
    }

    #[test]
    fn test_template_from_json_rejects_garbage() {
        assert!(matches!(
            Template::from_json("[1,2,3]"),
            Err(PlanError::Serialization(_))
        ));
    }

    #[test]
    fn test_room_summary_and_id_lookup() {
        let catalog = Catalog::builtin();
        let template = catalog.template_by_id(1).expect("template");
        assert_eq!(template.name, "一室一厅");
        assert_eq!(template.room_summary(), "客厅、卧室、厨房、卫生间");
        assert_eq!(Template::default().room_summary(), "");
        assert!(matches!(
            catalog.template_by_id(7),
            Err(PlanError::TemplateNotFound(id)) if id == "7"
        ));
    }

    #[test]
    fn test_solutions_open_their_templates() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.solutions.len(), 4);

        let lighting = catalog.solution_by_id(4).expect("solution");
        assert_eq!(lighting.name, "智能照明");
        assert_eq!(lighting.price_label, "￥1,299起");

        let names: Vec<_> = catalog
            .solutions
            .iter()
            .map(|s| catalog.solution_template(s.id).expect("template").name.as_str())
            .collect();
        assert_eq!(names, vec!["三室两厅", "两室一厅", "一室一厅", "两室一厅"]);

        assert!(matches!(
            catalog.solution_by_id(5),
            Err(PlanError::SolutionNotFound(5))
        ));
    }

    #[test]
    fn test_catalog_json_without_solutions() {
        let catalog: Catalog =
            serde_json::from_str(r#"{"devices": [], "templates": []}"#).expect("parse");
        assert!(catalog.solutions.is_empty());
        assert!(catalog.solution_template(1).is_err());
    }

    #[test]
    fn test_selected_device_subtotal() {
        let catalog = Catalog::builtin();
        let selected = SelectedDevice {
            device: catalog.device_by_id(2).expect("lock").clone(),
            quantity: 3,
        };
        assert_eq!(selected.subtotal(), 3897);
    }
}
