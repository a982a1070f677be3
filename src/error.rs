use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors raised synchronously by the preset store and the mirror engine
#[derive(Debug, Error)]
pub enum PresetError {
    /// Preset creation was requested with an empty or whitespace-only name
    #[error("Preset name must not be blank")]
    InvalidName,

    /// A lateral bone's counterpart is not part of the skeleton being mirrored
    #[error("Bone {bone:?} has no counterpart {counterpart:?} in this skeleton")]
    MissingCounterpart {
        bone: String,
        counterpart: String,
    },

    /// The skeleton violates the snapshot key invariant
    #[error("Malformed skeleton: {0}")]
    MalformedSkeleton(String),

    /// A preset document is internally inconsistent
    #[error("Invalid preset data: {0}")]
    InvalidPreset(String),

    /// No preset with this id exists in the store
    #[error("Unknown preset {0:?}")]
    UnknownPreset(String),

    /// User presets could not be loaded at start-up
    #[error("Failed to load user presets: {0}")]
    Storage(#[from] PersistenceError),

    /// The compiled-in default preset set could not be parsed
    #[error("Failed to load built-in presets: {0}")]
    Defaults(#[from] serde_json::Error),
}

/// Result type for store and mirror operations
pub type PresetResult<T> = Result<T, PresetError>;
