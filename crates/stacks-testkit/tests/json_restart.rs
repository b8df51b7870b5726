//! Persistence across restarts with the JSON file store.

use std::fs;

use serde_json::Value;
use stacks::{Config, MessageKey, StackController};
use stacks_perms::GrantTable;
use stacks_store::{JsonStore, Record};
use stacks_testkit::fixtures::{admin, sample_registry, size, FakeRegistry};
use tempfile::TempDir;

type Controller = StackController<FakeRegistry, JsonStore, GrantTable>;

fn start(dir: &TempDir, registry: FakeRegistry) -> Controller {
    let store = JsonStore::open(dir.path()).unwrap();
    StackController::start(registry, store, GrantTable::new(), Config::default())
}

fn run(controller: &mut Controller, line: &str) -> stacks::Response {
    let mut parts = line.split_whitespace();
    let name = parts.next().unwrap();
    let args: Vec<&str> = parts.collect();
    stacks::dispatch(controller, &admin(), name, &args).unwrap()
}

fn read_json(dir: &TempDir, name: &str) -> Value {
    let raw = fs::read_to_string(dir.path().join(name)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_startup_writes_both_records() {
    let dir = TempDir::new().unwrap();
    let _controller = start(&dir, sample_registry());

    let categories = read_json(&dir, "Stacks/stacking.json");
    assert_eq!(categories["resources"]["wood.item"], 20);
    assert_eq!(categories["tool"]["hatchet.item"], 1);

    let item_categories = read_json(&dir, "Stacks/name2cat.json");
    assert_eq!(item_categories["wood.item"], "resources");
    assert!(item_categories.get("debug.item").is_none());
}

#[test]
fn test_override_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut controller = start(&dir, sample_registry());
    assert_eq!(run(&mut controller, "stack wood 50").key, MessageKey::StackSet);
    controller.shutdown().unwrap();

    let controller = start(&dir, sample_registry());
    assert_eq!(controller.stack_size(&"wood.item".into()).unwrap(), size(50));
    assert_eq!(controller.registry().live_stack("wood.item"), Some(size(50)));
    assert_eq!(controller.stack_size(&"stones.item".into()).unwrap(), size(1000));
}

#[test]
fn test_export_file_layout() {
    let dir = TempDir::new().unwrap();

    let mut controller = start(&dir, sample_registry());
    run(&mut controller, "stack wood 50");
    assert_eq!(run(&mut controller, "stexport").args, vec!["6".to_string()]);

    let document = read_json(&dir, "StackSizeController.json");
    assert_eq!(document["itemlist"]["Wood"], 50);
    assert_eq!(document["itemlist"]["Assault Rifle"], 1);
    assert_eq!(document["itemlist"].as_object().unwrap().len(), 6);
}

#[test]
fn test_import_from_hand_written_file() {
    let dir = TempDir::new().unwrap();
    let mut controller = start(&dir, sample_registry());

    let path = controller.store().path(Record::Interchange);
    fs::write(&path, r#"{ "itemlist": { "Wood": 300, "Hatchet": 2, "Nope": 9 } }"#).unwrap();

    let response = run(&mut controller, "stimport");
    assert_eq!(response.key, MessageKey::Imported);
    assert_eq!(response.args, vec!["2".to_string()]);
    controller.shutdown().unwrap();

    let controller = start(&dir, sample_registry());
    assert_eq!(controller.stack_size(&"wood.item".into()).unwrap(), size(300));
    assert_eq!(controller.stack_size(&"hatchet.item".into()).unwrap(), size(2));
}

#[test]
fn test_corrupt_interchange_file_fails_import() {
    let dir = TempDir::new().unwrap();
    let mut controller = start(&dir, sample_registry());
    run(&mut controller, "stack wood 50");

    fs::write(controller.store().path(Record::Interchange), "{ not json").unwrap();

    assert_eq!(run(&mut controller, "stimport").key, MessageKey::ImportFail);
    assert_eq!(controller.stack_size(&"wood.item".into()).unwrap(), size(50));
}

#[test]
fn test_corrupt_index_file_is_rebuilt() {
    let dir = TempDir::new().unwrap();
    let mut controller = start(&dir, sample_registry());
    run(&mut controller, "stack wood 50");
    let path = controller.store().path(Record::Categories);
    controller.shutdown().unwrap();

    fs::write(&path, "garbage").unwrap();

    // The reverse table still carries the category, but sizes come only from
    // the category table, so the registry value wins.
    let controller = start(&dir, sample_registry());
    assert_eq!(controller.stack_size(&"wood.item".into()).unwrap(), size(20));
    assert_eq!(controller.index().len(), 7);

    let categories = read_json(&dir, "Stacks/stacking.json");
    assert_eq!(categories["resources"]["wood.item"], 20);
}
