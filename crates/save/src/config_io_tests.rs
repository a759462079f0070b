// ---------------------------------------------------------------------------
// config_io_tests – save/load events against a running App
// ---------------------------------------------------------------------------

use std::path::PathBuf;
use std::sync::Arc;

use bevy::prelude::*;
use population::packs::PackSlot;
use population::{
    BuildingCapacity, BuildingShape, CalculationContext, Category, PopulationBuilding,
    PopulationEnginePlugin, PrefabCatalog, PrefabRecord, SubCategory,
};

use crate::{
    load_config_file, ConfigIoStatus, ConfigSavePlugin, ConfigSaveSettings, LoadConfigEvent,
    ResetConfigEvent, SaveConfigEvent, SaveError,
};

fn test_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("population_config_io_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("settings.rpop")
}

fn test_app() -> App {
    let catalog = PrefabCatalog::default().with(
        "Block",
        PrefabRecord::new(BuildingShape::uniform(20.0, 20.0, 9.0), SubCategory::ResidentialLow),
    );
    let mut app = App::new();
    app.insert_resource(CalculationContext::new(Arc::new(catalog)))
        .add_plugins((PopulationEnginePlugin, ConfigSavePlugin));
    app
}

fn configure(app: &mut App) {
    let mut ctx = app.world_mut().resource_mut::<CalculationContext>();
    ctx.set_population_override("Block", 40).unwrap();
    ctx.change_default(
        PackSlot::Population,
        Category::Office,
        SubCategory::OfficeGeneric,
        "off-hightech",
    )
    .unwrap();
}

#[test]
fn test_save_reset_load_restores_configuration() {
    let path = test_path("roundtrip");
    let mut app = test_app();
    let block = app
        .world_mut()
        .spawn(PopulationBuilding::new("Block", SubCategory::ResidentialLow, 1))
        .id();
    configure(&mut app);
    let saved = app.world().resource::<CalculationContext>().snapshot();

    app.world_mut().send_event(SaveConfigEvent { path: path.clone() });
    app.update();
    assert!(path.exists());
    assert_eq!(app.world().resource::<ConfigIoStatus>().saves, 1);
    assert_eq!(app.world().get::<BuildingCapacity>(block).unwrap().population, 40);

    app.world_mut().send_event(ResetConfigEvent);
    app.update();
    assert!(app
        .world()
        .resource::<CalculationContext>()
        .snapshot()
        .is_empty());
    assert_ne!(app.world().get::<BuildingCapacity>(block).unwrap().population, 40);

    app.world_mut().send_event(LoadConfigEvent { path: path.clone() });
    app.update();
    let status = app.world().resource::<ConfigIoStatus>();
    assert_eq!(status.loads, 1);
    assert!(status.last_error.is_none(), "{:?}", status.last_error);
    assert_eq!(app.world().resource::<CalculationContext>().snapshot(), saved);
    assert_eq!(app.world().get::<BuildingCapacity>(block).unwrap().population, 40);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_uncompressed_files_load_too() {
    let path = test_path("uncompressed");
    let mut app = test_app();
    app.world_mut().resource_mut::<ConfigSaveSettings>().compress = false;
    configure(&mut app);
    app.world_mut().send_event(SaveConfigEvent { path: path.clone() });
    app.update();

    let mut other = test_app();
    other.world_mut().send_event(LoadConfigEvent { path: path.clone() });
    other.update();
    assert_eq!(
        other
            .world()
            .resource::<CalculationContext>()
            .population_override("Block"),
        Some(40)
    );
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_missing_file_reports_error_and_keeps_state() {
    let mut app = test_app();
    configure(&mut app);
    app.world_mut().send_event(LoadConfigEvent {
        path: test_path("missing"),
    });
    app.update();

    let status = app.world().resource::<ConfigIoStatus>();
    assert_eq!(status.loads, 0);
    let message = status.last_error.clone().unwrap_or_default();
    assert!(message.contains("population_config_io_missing"), "{message}");

    let path = test_path("missing");
    match load_config_file(app.world_mut(), &path) {
        Err(SaveError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected an I/O error, got {other:?}"),
    }
    assert_eq!(
        app.world()
            .resource::<CalculationContext>()
            .population_override("Block"),
        Some(40)
    );
}

#[test]
fn test_corrupted_file_rejected_without_partial_load() {
    let path = test_path("corrupted");
    let mut app = test_app();
    configure(&mut app);
    app.world_mut().send_event(SaveConfigEvent { path: path.clone() });
    app.update();

    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    std::fs::write(&path, bytes).unwrap();

    let mut other = test_app();
    other.world_mut().send_event(LoadConfigEvent { path: path.clone() });
    other.update();
    let status = other.world().resource::<ConfigIoStatus>();
    assert!(status
        .last_error
        .as_deref()
        .is_some_and(|e| e.contains("checksum")));
    assert!(other
        .world()
        .resource::<CalculationContext>()
        .snapshot()
        .is_empty());
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}
