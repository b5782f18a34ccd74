//! Scene snapshots: posed geometry, roles and per-geometry property overrides

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::pose::Pose;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier assigned to a geometry by the scene owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeometryId(pub u64);

impl fmt::Display for GeometryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visual role of a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Geometry meant to be looked at
    Illustration,
    /// Collision / proximity geometry
    Proximity,
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Illustration => "illustration",
            Self::Proximity => "proximity",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Out-of-band visual property assignments for one geometry and role
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PropertyOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl PropertyOverrides {
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.visible.is_none()
    }
}

/// Fully resolved visual properties of one geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualProperties {
    pub color: Rgba,
    pub visible: bool,
}

impl VisualProperties {
    /// Merge `overrides` over a role default. Geometry is visible unless an
    /// override says otherwise.
    pub fn resolve(overrides: Option<&PropertyOverrides>, default_color: Rgba) -> Self {
        Self {
            color: overrides.and_then(|o| o.color).unwrap_or(default_color),
            visible: overrides.and_then(|o| o.visible).unwrap_or(true),
        }
    }
}

/// One registered geometry as seen at a single evaluation instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    pub id: GeometryId,
    /// Name of the source that registered the geometry
    pub source_name: String,
    /// Geometry name, unique within its source and role
    pub name: String,
    pub shape: Shape,
    /// Current world pose
    pub pose: Pose,
    pub role: Role,
    /// Whether the pose is fixed to the world frame
    pub anchored: bool,
}

impl SceneEntry {
    /// Marker namespace for this geometry: `"<source>::<name>"`
    pub fn marker_namespace(&self) -> String {
        format!("{}::{}", self.source_name, self.name)
    }
}

/// Read access to a scene at one evaluation instant.
///
/// Entries handed out must carry valid shapes with absolute mesh filenames,
/// as [`SceneSnapshot::add_entry`] enforces. Marker translation panics on a
/// malformed shape.
pub trait SceneQuery {
    /// Simulation time of the snapshot in seconds
    fn time(&self) -> f64;

    /// All registered geometries in the scene owner's enumeration order
    fn entries(&self) -> &[SceneEntry];

    /// Property overrides assigned to `id` for `role`, if any
    fn overrides(&self, id: GeometryId, role: Role) -> Option<&PropertyOverrides>;
}

/// In-memory scene snapshot
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    time: f64,
    entries: Vec<SceneEntry>,
    overrides: HashMap<(GeometryId, Role), PropertyOverrides>,
    next_id: u64,
}

impl SceneSnapshot {
    /// Create a new empty snapshot at time zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Register geometry fixed to the world frame
    pub fn add_anchored<S: Into<String>, N: Into<String>>(
        &mut self,
        source_name: S,
        name: N,
        shape: Shape,
        pose: Pose,
        role: Role,
    ) -> Result<GeometryId> {
        self.add_with_next_id(source_name.into(), name.into(), shape, pose, role, true)
    }

    /// Register geometry attached to a moving body; `pose` is its current world pose
    pub fn add_dynamic<S: Into<String>, N: Into<String>>(
        &mut self,
        source_name: S,
        name: N,
        shape: Shape,
        pose: Pose,
        role: Role,
    ) -> Result<GeometryId> {
        self.add_with_next_id(source_name.into(), name.into(), shape, pose, role, false)
    }

    fn add_with_next_id(
        &mut self,
        source_name: String,
        name: String,
        shape: Shape,
        pose: Pose,
        role: Role,
        anchored: bool,
    ) -> Result<GeometryId> {
        let id = GeometryId(self.next_id);
        self.add_entry(SceneEntry {
            id,
            source_name,
            name,
            shape,
            pose,
            role,
            anchored,
        })
    }

    /// Register an entry whose id was assigned by the caller.
    ///
    /// Fails if the shape or pose is malformed, the id is taken, or the
    /// `(source, name)` pair is already used for the same role. Relative mesh
    /// filenames are stored resolved against the current directory.
    pub fn add_entry(&mut self, mut entry: SceneEntry) -> Result<GeometryId> {
        entry.shape.validate()?;
        entry.pose.validate()?;
        entry.shape = entry.shape.with_absolute_filename(None)?;

        if self.get(entry.id).is_some() {
            return Err(Error::DuplicateId(entry.id.0));
        }
        let name_taken = self.entries.iter().any(|e| {
            e.role == entry.role && e.source_name == entry.source_name && e.name == entry.name
        });
        if name_taken {
            return Err(Error::DuplicateGeometry {
                source_name: entry.source_name,
                name: entry.name,
            });
        }

        let id = entry.id;
        self.next_id = self.next_id.max(id.0 + 1);
        self.entries.push(entry);
        Ok(id)
    }

    /// Assign property overrides for `id` under `role`
    pub fn set_overrides(
        &mut self,
        id: GeometryId,
        role: Role,
        overrides: PropertyOverrides,
    ) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::UnknownGeometry(id.0));
        }
        if let Some(color) = overrides.color {
            color.validate()?;
        }
        self.overrides.insert((id, role), overrides);
        Ok(())
    }

    /// Refresh the world pose of a geometry
    pub fn update_pose(&mut self, id: GeometryId, pose: Pose) -> Result<()> {
        pose.validate()?;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(Error::UnknownGeometry(id.0))?;
        entry.pose = pose;
        Ok(())
    }

    /// Remove a geometry and all of its overrides
    pub fn remove(&mut self, id: GeometryId) -> Option<SceneEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.overrides.retain(|(geometry, _), _| *geometry != id);
        Some(self.entries.remove(index))
    }

    pub fn get(&self, id: GeometryId) -> Option<&SceneEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries fixed to the world frame
    pub fn anchored(&self) -> impl Iterator<Item = &SceneEntry> {
        self.entries.iter().filter(|e| e.anchored)
    }

    /// Entries attached to moving bodies
    pub fn dynamic(&self) -> impl Iterator<Item = &SceneEntry> {
        self.entries.iter().filter(|e| !e.anchored)
    }

    /// Entries carrying `role`
    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &SceneEntry> {
        self.entries.iter().filter(move |e| e.role == role)
    }
}

impl SceneQuery for SceneSnapshot {
    fn time(&self) -> f64 {
        self.time
    }

    fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    fn overrides(&self, id: GeometryId, role: Role) -> Option<&PropertyOverrides> {
        self.overrides.get(&(id, role))
    }
}
