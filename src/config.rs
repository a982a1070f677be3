use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::bone_names::SideMarkers;
use crate::search::PriorityOrder;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Settings for pose submissions made when a preset is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,
    pub app_version: String,
    /// Stable identifier of this installation; generated when absent
    pub installation_id: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            installation_id: None,
        }
    }
}

impl TelemetryConfig {
    pub fn installation_id(&self) -> String {
        self.installation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

/// Engine configuration, read from a JSON file.
///
/// Every field has a default, so a partial (or missing) file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where user presets are stored
    pub presets_path: PathBuf,
    pub side_markers: SideMarkers,
    pub priority_order: PriorityOrder,
    pub telemetry: TelemetryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            presets_path: PathBuf::from("presets").join("poses.json"),
            side_markers: SideMarkers::default(),
            priority_order: PriorityOrder::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Loads the config at `path`, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
