#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use posekit::event::EventHandler;
use posekit::persistence::PersistenceResult;
use posekit::telemetry::TelemetryError;
use posekit::{
    Bone, Character, PersistenceError, PoseSubmission, PosePreset, PresetEvent, PresetStorage,
    Rotation, Skeleton, TelemetrySink,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small rig with paired arms and legs plus central bones
pub fn create_test_skeleton() -> Skeleton {
    Skeleton::new(vec![
        Bone::new("b01", "Hips", Rotation::euler(0.0, 0.3, 0.05)).with_position(glam::Vec3::new(0.1, 0.95, 0.0)),
        Bone::new("b02", "Spine", Rotation::euler(0.15, 0.0, 0.0)),
        Bone::new("b03", "Head", Rotation::euler(0.0, -0.4, 0.1)),
        Bone::new("b04", "LeftArm", Rotation::euler(0.2, -0.1, 1.3)),
        Bone::new("b05", "RightArm", Rotation::euler(-0.1, 0.2, -0.2)),
        Bone::new("b06", "LeftForeArm", Rotation::euler(0.0, 0.9, 0.0)),
        Bone::new("b07", "RightForeArm", Rotation::euler(0.0, -0.1, 0.0)),
        Bone::new("b08", "LeftUpLeg", Rotation::euler(-1.1, 0.0, 0.1)),
        Bone::new("b09", "RightUpLeg", Rotation::euler(0.2, 0.0, -0.05)),
    ])
}

pub fn create_test_character() -> Character {
    Character::new("character-1", "adult-female", create_test_skeleton())
}

/// Collects every event emitted on a bus
#[derive(Clone, Default)]
pub struct EventLog(pub Arc<Mutex<Vec<PresetEvent>>>);

impl EventLog {
    pub fn events(&self) -> Vec<PresetEvent> {
        self.0.lock().clone()
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &PresetEvent) {
        self.0.lock().push(event.clone());
    }
}

/// Storage whose every write fails
pub struct FailingStorage;

impl PresetStorage for FailingStorage {
    fn load_user_presets(&self) -> PersistenceResult<BTreeMap<String, PosePreset>> {
        Ok(BTreeMap::new())
    }

    fn save_user_presets(&self, _presets: &BTreeMap<String, PosePreset>) -> PersistenceResult<()> {
        Err(PersistenceError::Write(std::io::Error::other("disk full")))
    }
}

/// Telemetry sink that records submissions once their task runs
#[derive(Clone, Default)]
pub struct RecordingTelemetry {
    pub submissions: Arc<Mutex<Vec<PoseSubmission>>>,
    pub fail: bool,
}

impl TelemetrySink for RecordingTelemetry {
    fn submit(&self, submission: PoseSubmission) -> BoxFuture<'static, Result<(), TelemetryError>> {
        let submissions = self.submissions.clone();
        let fail = self.fail;
        Box::pin(async move {
            submissions.lock().push(submission);
            if fail {
                Err(TelemetryError::Submit("connection refused".to_owned()))
            } else {
                Ok(())
            }
        })
    }
}
