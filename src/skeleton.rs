//! Live skeletons and the immutable snapshots taken from them.
//!
//! A [`SkeletonSnapshot`] is keyed by bone name and guarantees that:
//! - every key equals the `name` of the bone stored under it
//! - no name is empty
//! - every rotation and position component is finite
//!
//! The invariant is checked once, when the snapshot is captured from a live
//! [`Skeleton`] or deserialized from a preset file. Code downstream (mirroring,
//! preset creation) relies on it without re-validating.
use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PresetError, PresetResult};
use crate::rotation::Rotation;

/// A single joint of a character rig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    /// Identity of the bone inside the rig, distinct from its name
    pub id: String,
    pub name: String,
    pub rotation: Rotation,
    /// Only present on bones whose translation is animated (hips, IK targets)
    #[serde(default, skip_serializing_if = "Option::is_none", with = "position_xyz")]
    pub position: Option<Vec3>,
}

/// Positions are written as `{x,y,z}` objects; `[x,y,z]` arrays are still read
mod position_xyz {
    use glam::Vec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f32,
        y: f32,
        z: f32,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Object(Xyz),
        Array([f32; 3]),
    }

    pub fn serialize<S: Serializer>(position: &Option<Vec3>, serializer: S) -> Result<S::Ok, S::Error> {
        position
            .map(|p| Xyz { x: p.x, y: p.y, z: p.z })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec3>, D::Error> {
        let stored = Option::<Stored>::deserialize(deserializer)?;
        Ok(stored.map(|stored| match stored {
            Stored::Object(Xyz { x, y, z }) => Vec3::new(x, y, z),
            Stored::Array(array) => Vec3::from_array(array),
        }))
    }
}

impl Bone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rotation: Rotation) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rotation,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    fn validate(&self) -> PresetResult<()> {
        if self.name.is_empty() {
            return Err(PresetError::MalformedSkeleton(format!(
                "bone {:?} has an empty name",
                self.id
            )));
        }
        if !self.rotation.is_finite() {
            return Err(PresetError::MalformedSkeleton(format!(
                "bone {:?} has a non-finite rotation",
                self.name
            )));
        }
        if self.position.is_some_and(|position| !position.is_finite()) {
            return Err(PresetError::MalformedSkeleton(format!(
                "bone {:?} has a non-finite position",
                self.name
            )));
        }
        Ok(())
    }
}

/// The mutable skeleton of a character in the scene.
///
/// This stands in for the animation/IK system: the engine reads it through
/// [`SkeletonSnapshot::capture`] and writes results back with [`Skeleton::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new(bones: Vec<Bone>) -> Self {
        Self { bones }
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|bone| bone.name == name)
    }

    pub fn bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        self.bones.iter_mut().find(|bone| bone.name == name)
    }

    /// Writes the rotation and position of every snapshot bone onto the
    /// live bone with the same name. Bones missing on either side are skipped.
    pub fn apply(&mut self, snapshot: &SkeletonSnapshot) {
        for bone in &mut self.bones {
            if let Some(posed) = snapshot.get(&bone.name) {
                bone.rotation = posed.rotation;
                bone.position = posed.position;
            }
        }
    }
}

/// Point-in-time copy of every bone of a skeleton, keyed by bone name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Bone>", into = "BTreeMap<String, Bone>")]
pub struct SkeletonSnapshot {
    bones: BTreeMap<String, Bone>,
}

impl SkeletonSnapshot {
    /// Deep-copies the live skeleton.
    ///
    /// Fails with [`PresetError::MalformedSkeleton`] if two bones share a name
    /// or a bone carries an empty name or non-finite values.
    pub fn capture(skeleton: &Skeleton) -> PresetResult<Self> {
        Self::from_bones(skeleton.bones().iter().cloned())
    }

    pub fn from_bones(bones: impl IntoIterator<Item = Bone>) -> PresetResult<Self> {
        let mut map = BTreeMap::new();
        for bone in bones {
            bone.validate()?;
            if map.contains_key(&bone.name) {
                return Err(PresetError::MalformedSkeleton(format!(
                    "duplicate bone name {:?}",
                    bone.name
                )));
            }
            map.insert(bone.name.clone(), bone);
        }
        Ok(Self { bones: map })
    }

    pub fn get(&self, name: &str) -> Option<&Bone> {
        self.bones.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bones.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bones.keys().map(String::as_str)
    }

    pub fn bones(&self) -> impl Iterator<Item = &Bone> {
        self.bones.values()
    }
}

impl TryFrom<BTreeMap<String, Bone>> for SkeletonSnapshot {
    type Error = PresetError;

    fn try_from(bones: BTreeMap<String, Bone>) -> Result<Self, Self::Error> {
        for (key, bone) in &bones {
            if key != &bone.name {
                return Err(PresetError::MalformedSkeleton(format!(
                    "key {:?} does not match bone name {:?}",
                    key, bone.name
                )));
            }
            bone.validate()?;
        }
        Ok(Self { bones })
    }
}

impl From<SkeletonSnapshot> for BTreeMap<String, Bone> {
    fn from(snapshot: SkeletonSnapshot) -> Self {
        snapshot.bones
    }
}
