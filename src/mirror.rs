use std::collections::BTreeMap;

use crate::bone_names::SideMarkers;
use crate::error::{PresetError, PresetResult};
use crate::rotation::mirror_rotation;
use crate::skeleton::{Bone, SkeletonSnapshot};

/// Produces the left/right mirror image of a captured pose
#[derive(Debug, Clone, Default)]
pub struct MirrorEngine {
    markers: SideMarkers,
}

impl MirrorEngine {
    pub fn new(markers: SideMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &SideMarkers {
        &self.markers
    }

    /// Mirrors every bone of `snapshot` onto its counterpart.
    ///
    /// Each bone's reflected rotation lands on the counterpart slot, which keeps
    /// its own `id`. Positions are carried over unreflected. Central bones map
    /// onto themselves, so the output has exactly the input's key set.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::MissingCounterpart`] as soon as a lateral bone has
    /// no counterpart in the snapshot. No partial result is produced.
    pub fn mirror(&self, snapshot: &SkeletonSnapshot) -> PresetResult<SkeletonSnapshot> {
        let mut mirrored = BTreeMap::new();

        for bone in snapshot.bones() {
            let target_name = self.markers.counterpart_of(&bone.name);
            let Some(target) = snapshot.get(&target_name) else {
                return Err(PresetError::MissingCounterpart {
                    bone: bone.name.clone(),
                    counterpart: target_name,
                });
            };

            let reflected = Bone {
                id: target.id.clone(),
                name: target_name.clone(),
                rotation: mirror_rotation(bone.rotation),
                position: bone.position,
            };
            mirrored.insert(target_name, reflected);
        }

        log::debug!("Mirrored pose with {} bones", mirrored.len());
        SkeletonSnapshot::try_from(mirrored)
    }
}
