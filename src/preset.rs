use serde::{Deserialize, Serialize};

use crate::skeleton::SkeletonSnapshot;

/// Pose data stored with a preset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseState {
    pub skeleton: SkeletonSnapshot,
}

/// A named, reusable skeleton pose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosePreset {
    /// Unique across built-in and user presets
    pub id: String,
    pub name: String,
    /// Free text matched by the search list alongside the name
    #[serde(default)]
    pub keywords: String,
    pub state: PoseState,
    #[serde(default)]
    pub priority: i32,
}

impl PosePreset {
    pub fn skeleton(&self) -> &SkeletonSnapshot {
        &self.state.skeleton
    }
}
