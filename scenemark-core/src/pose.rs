//! Rigid poses used for scene geometry and markers

use crate::error::{Error, Result};
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A rigid transform expressed as a position and a unit orientation.
///
/// The orientation serializes as `[x, y, z, w]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Pose {
    /// Create an identity pose
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// Create a pure translation
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            position: Point3::from(translation),
            orientation: UnitQuaternion::identity(),
        }
    }

    /// Create a pure rotation about the origin
    pub fn from_rotation(orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position: Point3::origin(),
            orientation,
        }
    }

    /// Create a pose from a position and an orientation
    pub fn from_parts(position: Point3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Convert to an nalgebra isometry
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
    }

    /// Compose this pose with another (`self * other`)
    pub fn compose(&self, other: &Self) -> Self {
        (self.to_isometry() * other.to_isometry()).into()
    }

    /// The pose obtained by moving `offset` along this pose's local z axis.
    pub fn offset_along_local_z(&self, offset: f64) -> Self {
        self.compose(&Self::from_translation(Vector3::new(0.0, 0.0, offset)))
    }

    /// Reject non-finite components and orientations that are not unit length.
    pub fn validate(&self) -> Result<()> {
        if !self.position.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidPose(format!(
                "position has non-finite components: {:?}",
                self.position
            )));
        }
        let norm = self.orientation.quaternion().norm();
        if !norm.is_finite() || (norm - 1.0).abs() > 1e-6 {
            return Err(Error::InvalidPose(format!(
                "orientation must be a unit quaternion, norm is {norm}"
            )));
        }
        Ok(())
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Pose {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(&rhs)
    }
}

impl From<Isometry3<f64>> for Pose {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self {
            position: Point3::from(isometry.translation.vector),
            orientation: isometry.rotation,
        }
    }
}

impl From<Pose> for Isometry3<f64> {
    fn from(pose: Pose) -> Self {
        pose.to_isometry()
    }
}
