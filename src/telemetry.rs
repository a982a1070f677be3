use futures::future::BoxFuture;
use futures::task::{Spawn, SpawnExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a telemetry backend. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to encode pose: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Submission failed: {0}")]
    Submit(String),
}

/// Pose data shared for pose harvesting when a user creates a preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSubmission {
    pub name: String,
    /// Serialized skeleton snapshot
    pub json: String,
    pub model_type: String,
    pub app_version: String,
    pub installation_id: String,
}

/// Backend receiving pose submissions.
///
/// The returned future is spawned and dropped; nobody awaits its result.
pub trait TelemetrySink: Send + Sync {
    fn submit(&self, submission: PoseSubmission) -> BoxFuture<'static, Result<(), TelemetryError>>;
}

/// Sink that discards every submission
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn submit(&self, _submission: PoseSubmission) -> BoxFuture<'static, Result<(), TelemetryError>> {
        Box::pin(async { Ok(()) })
    }
}

/// Hands `submission` to `sink` as a detached task on `spawner`.
///
/// Neither a spawn failure nor a failed submission reaches the caller.
pub fn submit_detached(spawner: &dyn Spawn, sink: &dyn TelemetrySink, submission: PoseSubmission) {
    let name = submission.name.clone();
    let pending = sink.submit(submission);
    let task = async move {
        if let Err(err) = pending.await {
            log::debug!("Pose submission for {:?} dropped: {}", name, err);
        }
    };

    if let Err(err) = spawner.spawn(task) {
        log::debug!("Could not schedule pose submission: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use futures::task::FutureObj;
    use futures::task::SpawnError;

    struct ShutDownSpawner;

    impl Spawn for ShutDownSpawner {
        fn spawn_obj(&self, _future: FutureObj<'static, ()>) -> Result<(), SpawnError> {
            Err(SpawnError::shutdown())
        }
    }

    struct FailingSink;

    impl TelemetrySink for FailingSink {
        fn submit(&self, _submission: PoseSubmission) -> BoxFuture<'static, Result<(), TelemetryError>> {
            Box::pin(async { Err(TelemetryError::Submit("offline".to_owned())) })
        }
    }

    fn create_test_submission() -> PoseSubmission {
        PoseSubmission {
            name: "Pose 1".to_owned(),
            json: "{}".to_owned(),
            model_type: "adult-male".to_owned(),
            app_version: "0.1.0".to_owned(),
            installation_id: "abc".to_owned(),
        }
    }

    #[test]
    fn test_spawn_failure_is_swallowed() {
        submit_detached(&ShutDownSpawner, &NullTelemetry, create_test_submission());
    }

    #[test]
    fn test_failed_submission_is_swallowed() {
        let mut pool = LocalPool::new();
        submit_detached(&pool.spawner(), &FailingSink, create_test_submission());
        pool.run_until_stalled();
    }
}
