use std::collections::BTreeMap;

use crate::error::{PresetError, PresetResult};
use crate::preset::PosePreset;

const DEFAULT_POSES_JSON: &str = include_str!("../assets/default_poses.json");

/// Parses the built-in pose set shipped with the application.
///
/// Keys of the returned map are preset ids; they form the persistence denylist.
pub fn default_presets() -> PresetResult<BTreeMap<String, PosePreset>> {
    parse_presets(DEFAULT_POSES_JSON)
}

/// Parses an `{ id: preset }` document, checking every key against its preset id
pub fn parse_presets(json: &str) -> PresetResult<BTreeMap<String, PosePreset>> {
    let presets: BTreeMap<String, PosePreset> = serde_json::from_str(json)?;
    if let Some((key, preset)) = presets.iter().find(|(key, preset)| **key != preset.id) {
        return Err(PresetError::InvalidPreset(format!(
            "preset key {:?} does not match id {:?}",
            key, preset.id
        )));
    }
    Ok(presets)
}
