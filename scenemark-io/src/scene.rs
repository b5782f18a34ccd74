//! JSON scene documents
//!
//! A scene document lists geometry entries in the order the scene owner
//! enumerates them:
//!
//! ```json
//! {
//!   "time": 0.0,
//!   "entries": [
//!     {
//!       "source": "robot",
//!       "name": "base",
//!       "role": "illustration",
//!       "shape": { "kind": "box", "width": 1.0, "depth": 1.0, "height": 0.2 },
//!       "pose": { "position": [0.0, 0.0, 0.1], "orientation": [0.0, 0.0, 0.0, 1.0] },
//!       "color": { "r": 0.2, "g": 0.2, "b": 0.8, "a": 1.0 }
//!     }
//!   ]
//! }
//! ```
//!
//! `id`, `pose`, `anchored` (default `true`), `color` and `visible` are
//! optional. Overrides attach to the entry's own role.

use crate::error::{IoError, Result};
use nalgebra::{Point3, Quaternion, UnitQuaternion};
use scenemark_core::{
    GeometryId, Pose, PropertyOverrides, Rgba, Role, SceneEntry, SceneSnapshot, Shape,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level scene document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub entries: Vec<EntryDocument>,
}

/// One geometry entry of a scene document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub source: String,
    pub name: String,
    pub role: Role,
    pub shape: Shape,
    #[serde(default)]
    pub pose: PoseDocument,
    #[serde(default = "default_anchored")]
    pub anchored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

fn default_anchored() -> bool {
    true
}

/// Pose as written in documents; orientation is `[x, y, z, w]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseDocument {
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default = "identity_orientation")]
    pub orientation: [f64; 4],
}

fn identity_orientation() -> [f64; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

impl Default for PoseDocument {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            orientation: identity_orientation(),
        }
    }
}

impl PoseDocument {
    /// Convert to a pose, normalizing the orientation.
    pub fn to_pose(&self) -> std::result::Result<Pose, String> {
        let [x, y, z, w] = self.orientation;
        let q = Quaternion::new(w, x, y, z);
        let norm = q.norm();
        if !norm.is_finite() || norm < 1e-9 {
            return Err(format!(
                "orientation {:?} cannot be normalized",
                self.orientation
            ));
        }
        let [px, py, pz] = self.position;
        Ok(Pose::from_parts(
            Point3::new(px, py, pz),
            UnitQuaternion::from_quaternion(q),
        ))
    }
}

impl From<&Pose> for PoseDocument {
    fn from(pose: &Pose) -> Self {
        let q = pose.orientation.coords;
        Self {
            position: [pose.position.x, pose.position.y, pose.position.z],
            orientation: [q.x, q.y, q.z, q.w],
        }
    }
}

impl SceneDocument {
    /// Build a validated snapshot.
    ///
    /// Relative mesh filenames are resolved against `base_dir` (or the
    /// current directory) and made absolute.
    pub fn into_snapshot(self, base_dir: Option<&Path>) -> Result<SceneSnapshot> {
        if !self.time.is_finite() {
            return Err(IoError::InvalidScene {
                message: format!("time must be finite, got {}", self.time),
            });
        }

        let mut snapshot = SceneSnapshot::new().with_time(self.time);
        for entry in self.entries {
            let label = format!("{}::{}", entry.source, entry.name);
            let invalid = |source: scenemark_core::Error| IoError::InvalidEntry {
                entry: label.clone(),
                source,
            };

            let pose = entry
                .pose
                .to_pose()
                .map_err(|m| invalid(scenemark_core::Error::InvalidPose(m)))?;
            let shape = entry
                .shape
                .with_absolute_filename(base_dir)
                .map_err(invalid)?;
            let role = entry.role;

            let id = match entry.id {
                Some(id) => snapshot.add_entry(SceneEntry {
                    id: GeometryId(id),
                    source_name: entry.source,
                    name: entry.name,
                    shape,
                    pose,
                    role,
                    anchored: entry.anchored,
                }),
                None if entry.anchored => {
                    snapshot.add_anchored(entry.source, entry.name, shape, pose, role)
                }
                None => snapshot.add_dynamic(entry.source, entry.name, shape, pose, role),
            }
            .map_err(invalid)?;

            let overrides = PropertyOverrides {
                color: entry.color,
                visible: entry.visible,
            };
            if !overrides.is_empty() {
                snapshot.set_overrides(id, role, overrides).map_err(invalid)?;
            }
        }

        Ok(snapshot)
    }
}
