/// Notifications broadcast by a preset session
#[derive(Debug, Clone, PartialEq)]
pub enum PresetEvent {
    /// A user preset was added to the store; ranked lists need rebuilding
    PresetCreated {
        id: String,
        name: String,
    },
    PresetSelected {
        character_id: String,
        preset_id: String,
    },
    /// Writing user presets failed; the preset stays usable for this session
    PersistFailed {
        message: String,
    },
    PoseMirrored {
        character_id: String,
    },
}
