use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::preset::PosePreset;

/// Failure of a [`PresetStorage`] backend
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// User presets could not be encoded as JSON
    #[error("Could not encode user presets: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Could not write user presets: {0}")]
    Write(#[from] std::io::Error),

    #[error("Could not read user presets: {0}")]
    Read(String),

    /// The stored document does not describe a valid preset set
    #[error("Stored presets are corrupt: {0}")]
    Corrupt(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// On-disk shape of the user presets file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetsDocument {
    #[serde(default)]
    pub poses: BTreeMap<String, PosePreset>,
    /// Version of the application that wrote the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Durable storage for user-created presets.
///
/// Implementations only ever see user presets; the store strips built-in ids
/// before calling [`PresetStorage::save_user_presets`].
pub trait PresetStorage {
    fn load_user_presets(&self) -> PersistenceResult<BTreeMap<String, PosePreset>>;

    fn save_user_presets(&self, presets: &BTreeMap<String, PosePreset>) -> PersistenceResult<()>;
}

/// Stores user presets as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PresetStorage for JsonFileStorage {
    /// A missing file is treated as "no user presets yet"
    fn load_user_presets(&self) -> PersistenceResult<BTreeMap<String, PosePreset>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No presets file at {}, starting empty", self.path.display());
                return Ok(BTreeMap::new());
            }
            Err(err) => return Err(PersistenceError::Read(err.to_string())),
        };

        let document: PresetsDocument = serde_json::from_str(&json)
            .map_err(|err| PersistenceError::Corrupt(err.to_string()))?;

        if let Some((key, preset)) = document.poses.iter().find(|(key, preset)| **key != preset.id) {
            return Err(PersistenceError::Corrupt(format!(
                "preset key {:?} does not match id {:?}",
                key, preset.id
            )));
        }

        log::debug!("Loaded {} user presets from {}", document.poses.len(), self.path.display());
        Ok(document.poses)
    }

    fn save_user_presets(&self, presets: &BTreeMap<String, PosePreset>) -> PersistenceResult<()> {
        // Create the parent directory if it doesn't exist
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let document = PresetsDocument {
            poses: presets.clone(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        };
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, json)?;

        log::info!("Saved {} user presets to {}", presets.len(), self.path.display());
        Ok(())
    }
}

/// Keeps user presets in memory; useful for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStorage {
    presets: Mutex<BTreeMap<String, PosePreset>>,
    saves: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presets(presets: BTreeMap<String, PosePreset>) -> Self {
        Self {
            presets: Mutex::new(presets),
            saves: Mutex::new(0),
        }
    }

    /// Contents of the last save (or the initial presets)
    pub fn contents(&self) -> BTreeMap<String, PosePreset> {
        self.presets.lock().clone()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl PresetStorage for MemoryStorage {
    fn load_user_presets(&self) -> PersistenceResult<BTreeMap<String, PosePreset>> {
        Ok(self.presets.lock().clone())
    }

    fn save_user_presets(&self, presets: &BTreeMap<String, PosePreset>) -> PersistenceResult<()> {
        *self.presets.lock() = presets.clone();
        *self.saves.lock() += 1;
        Ok(())
    }
}
