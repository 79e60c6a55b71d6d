//! Integration tests for running a configured session end to end.

use std::path::PathBuf;

use clap::Parser;
use floorplan_cli::{CliArgs, CliConfig, Session, TemplateSource};
use floorplan_core::{Catalog, OrderStatus};

fn run(args: &[&str]) -> (Session, String) {
    let mut argv = vec!["floorplan"];
    argv.extend_from_slice(args);
    let config = CliConfig::from(CliArgs::try_parse_from(argv).expect("args"));

    let mut session = Session::new().expect("session");
    let mut out = Vec::new();
    session.run(&config, &mut out).expect("run");
    (session, String::from_utf8(out).expect("utf8"))
}

#[test]
fn test_template_taps_and_quote() {
    let (session, report) = run(&[
        "--template",
        "一室一厅",
        "--tap",
        "room:60,60",
        "--tap",
        "wall:200,280",
        "--device",
        "1:2",
        "--device",
        "7",
        "--quote",
    ]);

    let store = session.store();
    assert_eq!(store.selected_room().map(|r| r.name.as_str()), Some("客厅"));
    assert_eq!(store.scene().walls.len(), 5);
    assert_eq!(store.device_count(), 3);
    assert!(report.contains("房间 4  设备种类 2  设备总数 3"));
    assert!(report.contains("方案总价 ¥1,087"));
}

#[test]
fn test_svg_output_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("plan.svg");
    let path_arg = path.to_str().expect("utf8 path");

    let (_, report) = run(&["--template", "三室两厅", "--output", path_arg]);

    let svg = std::fs::read_to_string(&path).expect("svg written");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("书房"));
    assert!(report.contains(path_arg));
}

#[test]
fn test_template_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("studio.json");
    // Walls, doors and windows omitted on purpose.
    std::fs::write(
        &path,
        r#"{"name": "开间", "rooms": [{"id": "s1", "name": "开间", "type": "living", "x": 20, "y": 20, "width": 200, "height": 150}]}"#,
    )
    .expect("write template");

    let mut session = Session::new().expect("session");
    session
        .load(&TemplateSource::File(PathBuf::from(&path)))
        .expect("load");
    assert_eq!(session.store().scene().rooms.len(), 1);
    assert!(session.store().scene().walls.is_empty());
}

#[test]
fn test_missing_template_file_errors() {
    let mut session = Session::new().expect("session");
    let err = session
        .load(&TemplateSource::File(PathBuf::from("/nonexistent/plan.json")))
        .expect_err("missing file");
    assert!(err.to_string().contains("/nonexistent/plan.json"));
}

#[test]
fn test_commands_json_is_last_frame() {
    let (session, report) = run(&["--template", "两室一厅", "--commands"]);
    let commands: serde_json::Value = serde_json::from_str(&report).expect("json");
    let commands = commands.as_array().expect("array");

    assert_eq!(commands.first().expect("first")["op"], "clear_rect");
    assert_eq!(commands.last().expect("last")["op"], "present");
    assert_eq!(commands.len(), session.last_frame().len());
}

#[test]
fn test_submit_files_pending_order() {
    let (session, report) = run(&["--template", "两室一厅", "--device", "8", "--submit"]);
    let orders = session.store().orders();
    // Filed ahead of the two sample orders.
    assert_eq!(orders.len(), 3);
    assert_eq!(orders[1].id, "WD202403150001");
    assert_eq!(orders[0].status, OrderStatus::Pending);
    assert_eq!(orders[0].title, "5房间智能家居方案");
    // 79 + 500 + 50 + 200
    assert_eq!(orders[0].amount, 829);
    assert!(report.contains(&orders[0].id));
}

#[test]
fn test_solution_loads_its_template() {
    let (session, report) = run(&["--solution", "3", "--quote"]);
    let expected = Catalog::builtin()
        .template_by_id(1)
        .expect("template")
        .rooms
        .clone();
    assert_eq!(session.store().scene().rooms, expected);
    assert!(report.contains("房间 4"));
}

#[test]
fn test_builtin_templates_all_load() {
    for template in &Catalog::builtin().templates {
        let (session, _) = run(&["--template", template.name.as_str()]);
        assert_eq!(session.store().scene().rooms, template.rooms);
    }
}
