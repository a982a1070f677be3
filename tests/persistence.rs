mod common;

use std::collections::BTreeMap;

use common::{create_test_character, create_test_skeleton, init_logging};
use posekit::defaults::default_presets;
use posekit::persistence::PresetsDocument;
use posekit::{
    CommandHistory, EngineConfig, JsonFileStorage, MemoryStorage, PersistenceError, PresetSession,
    PresetStorage, PresetStore, SkeletonSnapshot,
};

#[test]
fn test_persisted_file_never_contains_builtin_ids() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets").join("poses.json");
    let config = EngineConfig { presets_path: path.clone(), ..EngineConfig::default() };

    let mut session = PresetSession::open(&config, Box::new(JsonFileStorage::new(path.clone()))).unwrap();
    let mut character = create_test_character();
    let mut history = CommandHistory::new();

    // Reuses the name of a built-in preset
    let preset = session.create_preset(&mut character, "Stand", &mut history).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let document: PresetsDocument = serde_json::from_str(&json).unwrap();
    let defaults = default_presets().unwrap();

    assert_eq!(document.poses.len(), 1);
    assert!(document.poses.contains_key(&preset.id));
    for id in defaults.keys() {
        assert!(!document.poses.contains_key(id), "built-in {} was written", id);
    }
}

#[test]
fn test_user_presets_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poses.json");
    let config = EngineConfig { presets_path: path.clone(), ..EngineConfig::default() };
    let mut character = create_test_character();
    let mut history = CommandHistory::new();

    let created = {
        let mut session = PresetSession::open(&config, Box::new(JsonFileStorage::new(path.clone()))).unwrap();
        session.create_preset(&mut character, "Lunge", &mut history).unwrap()
    };

    let session = PresetSession::open(&config, Box::new(JsonFileStorage::new(path))).unwrap();
    let reloaded = session.store().get(&created.id).unwrap();

    assert_eq!(reloaded, &created);
    assert!(!session.store().is_builtin(&created.id));
    assert_eq!(session.store().len(), default_presets().unwrap().len() + 1);
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path().join("absent.json"));
    assert!(storage.load_user_presets().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poses.json");
    std::fs::write(&path, r#"{"poses": {"a": {"id": "b", "name": "x", "state": {"skeleton": {}}}}}"#).unwrap();

    let storage = JsonFileStorage::new(path.clone());
    assert!(matches!(storage.load_user_presets(), Err(PersistenceError::Corrupt(_))));

    std::fs::write(&path, "[1, 2").unwrap();
    assert!(matches!(storage.load_user_presets(), Err(PersistenceError::Corrupt(_))));
}

#[test]
fn test_store_persist_writes_user_presets_only() {
    let storage = MemoryStorage::new();
    let mut store = PresetStore::load(default_presets().unwrap(), &storage).unwrap();
    let snapshot = SkeletonSnapshot::capture(&create_test_skeleton()).unwrap();

    let first = store.create("First", snapshot.clone()).unwrap();
    let second = store.create("Second", snapshot).unwrap();
    store.persist(&storage).unwrap();

    let written: BTreeMap<_, _> = storage.contents();
    assert_eq!(written.len(), 2);
    assert!(written.contains_key(&first.id) && written.contains_key(&second.id));
    assert_eq!(storage.save_count(), 1);
}
