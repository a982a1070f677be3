//! The pose-preset workflow behind the inspector panel.
//!
//! A `PresetSession` owns the preset store and its collaborators. Each UI
//! action maps to one method, and every method receives the character it acts
//! on plus the undo bracket to use, so nothing is looked up from global state.
//!
//! # Creating a preset
//!
//! [`PresetSession::create_preset`] runs these steps in order:
//! 1. capture the character's live skeleton
//! 2. add the preset to the store (fails on a blank name, nothing changes)
//! 3. hand a pose submission to the telemetry executor, without waiting
//! 4. select the new preset on the character inside one mutation group
//! 5. persist user presets; a failure is logged and broadcast, never returned
//!
//! # Mirroring
//!
//! [`PresetSession::mirror_pose`] captures once, mirrors the capture and only
//! then writes to the live skeleton, so a failed mirror leaves it untouched.
use std::sync::Arc;

use futures::task::Spawn;
use uuid::Uuid;

use crate::command::{Command, GroupedMutation};
use crate::config::{EngineConfig, TelemetryConfig};
use crate::defaults::default_presets;
use crate::error::{PresetError, PresetResult};
use crate::event::{EventBus, PresetEvent};
use crate::mirror::MirrorEngine;
use crate::persistence::PresetStorage;
use crate::preset::PosePreset;
use crate::scene::Character;
use crate::search::{PriorityOrder, RankedPresets, SearchFilter};
use crate::skeleton::SkeletonSnapshot;
use crate::store::PresetStore;
use crate::telemetry::{PoseSubmission, TelemetrySink, submit_detached};

struct Telemetry {
    sink: Arc<dyn TelemetrySink>,
    spawner: Box<dyn Spawn>,
    app_version: String,
    installation_id: String,
}

pub struct PresetSession {
    store: PresetStore,
    storage: Box<dyn PresetStorage>,
    mirror: MirrorEngine,
    priority_order: PriorityOrder,
    telemetry_config: TelemetryConfig,
    telemetry: Option<Telemetry>,
    events: EventBus,
}

impl std::fmt::Debug for PresetSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresetSession")
            .field("presets", &self.store.len())
            .field("priority_order", &self.priority_order)
            .field("telemetry", &self.telemetry.is_some())
            .field("events", &self.events)
            .finish()
    }
}

impl PresetSession {
    /// Loads the built-in presets and the user presets found in `storage`
    pub fn open(config: &EngineConfig, storage: Box<dyn PresetStorage>) -> PresetResult<Self> {
        let store = PresetStore::load(default_presets()?, storage.as_ref())?;
        Ok(Self::new(config, store, storage))
    }

    pub fn new(
        config: &EngineConfig,
        store: PresetStore,
        storage: Box<dyn PresetStorage>,
    ) -> Self {
        Self {
            store,
            storage,
            mirror: MirrorEngine::new(config.side_markers.clone()),
            priority_order: config.priority_order,
            telemetry_config: config.telemetry.clone(),
            telemetry: None,
            events: EventBus::new(),
        }
    }

    /// Enables pose submissions through `sink`, run as detached tasks on `spawner`.
    ///
    /// Does nothing when telemetry is disabled in the configuration.
    pub fn attach_telemetry(&mut self, sink: Arc<dyn TelemetrySink>, spawner: Box<dyn Spawn>) {
        if !self.telemetry_config.enabled {
            log::info!("Telemetry disabled, pose submissions are off");
            return;
        }
        self.telemetry = Some(Telemetry {
            sink,
            spawner,
            app_version: self.telemetry_config.app_version.clone(),
            installation_id: self.telemetry_config.installation_id(),
        });
    }

    pub fn store(&self) -> &PresetStore {
        &self.store
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn mirror_engine(&self) -> &MirrorEngine {
        &self.mirror
    }

    /// Placeholder offered in the "new preset" dialog, e.g. `Pose 1f3a9c2`
    pub fn suggested_name() -> String {
        let id = Uuid::new_v4().to_string();
        format!("Pose {}", &id[..7].to_lowercase())
    }

    /// The presets in browsing order, ready for the search box
    pub fn browse(&self) -> RankedPresets<'_> {
        RankedPresets::new(self.store.list(), self.priority_order)
    }

    pub fn search(&self, query: &str, filter: &dyn SearchFilter) -> Vec<&PosePreset> {
        self.browse().filter(query, filter)
    }

    /// The preset currently selected on `character`, if it still exists
    pub fn active_preset(&self, character: &Character) -> Option<&PosePreset> {
        character
            .pose_preset_id
            .as_deref()
            .and_then(|id| self.store.get(id))
    }

    /// Saves the character's current pose as a new user preset and selects it.
    ///
    /// # Errors
    ///
    /// [`PresetError::InvalidName`] for a blank name and
    /// [`PresetError::MalformedSkeleton`] if the live skeleton cannot be
    /// captured. In both cases the store and the character are unchanged.
    ///
    /// User presets are written to storage before this returns, but the write
    /// never affects the result: a failed save is logged and broadcast as
    /// [`PresetEvent::PersistFailed`], and the new preset stays selected and
    /// usable for the rest of the session.
    pub fn create_preset(
        &mut self,
        character: &mut Character,
        name: &str,
        group: &mut dyn GroupedMutation,
    ) -> PresetResult<PosePreset> {
        if name.trim().is_empty() {
            return Err(PresetError::InvalidName);
        }

        let snapshot = SkeletonSnapshot::capture(&character.skeleton)?;
        let preset = self.store.create(name, snapshot)?;
        self.events.emit(PresetEvent::PresetCreated {
            id: preset.id.clone(),
            name: preset.name.clone(),
        });

        self.submit_pose(character, &preset);

        group.begin();
        group.execute(
            Command::SelectPreset {
                character_id: character.id.clone(),
                previous: character.pose_preset_id.clone(),
                preset_id: preset.id.clone(),
            },
            character,
        );
        group.end();
        self.events.emit(PresetEvent::PresetSelected {
            character_id: character.id.clone(),
            preset_id: preset.id.clone(),
        });

        if let Err(err) = self.store.persist(self.storage.as_ref()) {
            log::warn!("Preset {:?} was created but could not be saved: {}", preset.name, err);
            self.events.emit(PresetEvent::PersistFailed {
                message: err.to_string(),
            });
        }

        Ok(preset)
    }

    /// Poses `character` with a stored preset and marks it active, as one mutation group
    pub fn apply_preset(
        &self,
        character: &mut Character,
        preset_id: &str,
        group: &mut dyn GroupedMutation,
    ) -> PresetResult<()> {
        let preset = self
            .store
            .get(preset_id)
            .ok_or_else(|| PresetError::UnknownPreset(preset_id.to_owned()))?;

        group.begin();
        group.execute(
            Command::SelectPreset {
                character_id: character.id.clone(),
                previous: character.pose_preset_id.clone(),
                preset_id: preset.id.clone(),
            },
            character,
        );
        group.execute(
            Command::ApplyPose {
                character_id: character.id.clone(),
                pose: preset.skeleton().clone(),
            },
            character,
        );
        group.end();

        self.events.emit(PresetEvent::PresetSelected {
            character_id: character.id.clone(),
            preset_id: preset.id.clone(),
        });
        Ok(())
    }

    /// Replaces the character's pose with its left/right mirror image.
    ///
    /// Returns the mirrored snapshot that was applied.
    ///
    /// # Errors
    ///
    /// [`PresetError::MissingCounterpart`] if a lateral bone has no partner;
    /// the live skeleton is not touched in that case.
    pub fn mirror_pose(
        &self,
        character: &mut Character,
        group: &mut dyn GroupedMutation,
    ) -> PresetResult<SkeletonSnapshot> {
        let snapshot = SkeletonSnapshot::capture(&character.skeleton)?;
        let mirrored = self.mirror.mirror(&snapshot)?;

        group.begin();
        group.execute(
            Command::ApplyPose {
                character_id: character.id.clone(),
                pose: mirrored.clone(),
            },
            character,
        );
        group.end();

        self.events.emit(PresetEvent::PoseMirrored {
            character_id: character.id.clone(),
        });
        Ok(mirrored)
    }

    fn submit_pose(&self, character: &Character, preset: &PosePreset) {
        let Some(telemetry) = &self.telemetry else {
            return;
        };

        let json = match serde_json::to_string(preset.skeleton()) {
            Ok(json) => json,
            Err(err) => {
                log::debug!("Skipping pose submission, encode failed: {}", err);
                return;
            }
        };

        let submission = PoseSubmission {
            name: preset.name.clone(),
            json,
            model_type: character.model.clone(),
            app_version: telemetry.app_version.clone(),
            installation_id: telemetry.installation_id.clone(),
        };
        submit_detached(telemetry.spawner.as_ref(), telemetry.sink.as_ref(), submission);
    }
}
