#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;
use std::sync::Arc;

use futures::executor::ThreadPool;
use posekit::telemetry::NullTelemetry;
use posekit::{
    Bone, Character, CommandHistory, EngineConfig, JsonFileStorage, PresetSession, Rotation,
    Skeleton, TermFilter,
};

fn demo_character() -> Character {
    let skeleton = Skeleton::new(vec![
        Bone::new("b01", "Hips", Rotation::euler(0.0, 0.2, 0.0)).with_position(glam::Vec3::new(0.0, 1.0, 0.0)),
        Bone::new("b02", "Spine", Rotation::euler(0.1, 0.0, 0.0)),
        Bone::new("b04", "LeftArm", Rotation::euler(0.0, 0.0, 1.2)),
        Bone::new("b05", "RightArm", Rotation::euler(0.0, 0.0, -0.3)),
    ]);
    Character::new("character-1", "adult-male", skeleton)
}

// Usage: posekit [config.json] [search query]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("posekit.json"));
    let query = args.collect::<Vec<_>>().join(" ");

    let config = EngineConfig::load(&config_path)?;
    let storage = JsonFileStorage::new(config.presets_path.clone());
    let mut session = PresetSession::open(&config, Box::new(storage))?;
    session.attach_telemetry(Arc::new(NullTelemetry), Box::new(ThreadPool::new()?));

    let mut character = demo_character();
    let mut history = CommandHistory::new();

    let mirrored = session.mirror_pose(&mut character, &mut history)?;
    log::info!("Mirrored {} bones", mirrored.len());

    let preset = session.create_preset(&mut character, &PresetSession::suggested_name(), &mut history)?;
    println!("Created {:?} ({})", preset.name, preset.id);

    for preset in session.search(&query, &TermFilter) {
        let origin = if session.store().is_builtin(&preset.id) { "built-in" } else { "user" };
        println!("{:>4}  {:<24} {}", preset.priority, preset.name, origin);
    }

    Ok(())
}
