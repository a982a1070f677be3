use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

/// Euler order shared with the posing front-end.
pub const EULER_ORDER: EulerRot = EulerRot::XYZ;

/// Euler angles in radians, applied in XYZ order
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerAngles {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EULER_ORDER, self.x, self.y, self.z)
    }

    pub fn from_quat(quat: Quat) -> Self {
        let (x, y, z) = quat.to_euler(EULER_ORDER);
        Self { x, y, z }
    }
}

/// A bone rotation in whichever representation the skeleton stores it.
///
/// Quaternions serialize as `[x, y, z, w]`, Euler angles as `{ "x", "y", "z" }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rotation {
    Quaternion(Quat),
    Euler(EulerAngles),
}

impl Default for Rotation {
    fn default() -> Self {
        Rotation::Euler(EulerAngles::default())
    }
}

impl Rotation {
    pub fn euler(x: f32, y: f32, z: f32) -> Self {
        Rotation::Euler(EulerAngles::new(x, y, z))
    }

    pub fn to_quat(self) -> Quat {
        match self {
            Rotation::Quaternion(quat) => quat,
            Rotation::Euler(angles) => angles.to_quat(),
        }
    }

    /// Converts `quat` into the same representation as `self`
    pub fn with_quat(self, quat: Quat) -> Self {
        match self {
            Rotation::Quaternion(_) => Rotation::Quaternion(quat),
            Rotation::Euler(_) => Rotation::Euler(EulerAngles::from_quat(quat)),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Rotation::Quaternion(quat) => quat.is_finite(),
            Rotation::Euler(angles) => {
                angles.x.is_finite() && angles.y.is_finite() && angles.z.is_finite()
            }
        }
    }

    /// Returns true if both rotations describe the same orientation within `epsilon`.
    ///
    /// `q` and `-q` are treated as equal.
    pub fn approx_eq(&self, other: &Rotation, epsilon: f32) -> bool {
        let a = self.to_quat().normalize();
        let b = other.to_quat().normalize();
        a.dot(b).abs() >= 1.0 - epsilon
    }
}

/// Reflects an orientation across the sagittal (left/right) plane.
///
/// The quaternion's x and w components are negated; the result keeps the
/// representation of the input.
pub fn mirror_rotation(rotation: Rotation) -> Rotation {
    let quat = rotation.to_quat();
    let mirrored = Quat::from_xyzw(-quat.x, quat.y, quat.z, -quat.w);
    rotation.with_quat(mirrored)
}
