use serde::{Deserialize, Serialize};

use crate::skeleton::Skeleton;

/// A posable character in the scene being edited
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    /// Model identifier, reported with pose submissions
    pub model: String,
    pub skeleton: Skeleton,
    /// Preset currently highlighted in the preset list
    #[serde(default)]
    pub pose_preset_id: Option<String>,
}

impl Character {
    pub fn new(id: impl Into<String>, model: impl Into<String>, skeleton: Skeleton) -> Self {
        Self {
            id: id.into(),
            model: model.into(),
            skeleton,
            pose_preset_id: None,
        }
    }
}
