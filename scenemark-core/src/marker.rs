//! Marker records consumed by a remote 3-D viewer

use crate::color::Rgba;
use crate::pose::Pose;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time stamp split into whole seconds and nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub sec: i32,
    pub nanosec: u32,
}

impl Timestamp {
    /// Convert a simulation time in seconds, rounding to the nearest nanosecond
    pub fn from_seconds(seconds: f64) -> Self {
        let whole = seconds.floor();
        let mut sec = whole as i32;
        let mut nanosec = ((seconds - whole) * 1e9).round() as u32;
        if nanosec >= 1_000_000_000 {
            sec += 1;
            nanosec -= 1_000_000_000;
        }
        Self { sec, nanosec }
    }

    pub fn as_seconds(&self) -> f64 {
        self.sec as f64 + self.nanosec as f64 * 1e-9
    }
}

/// Reference frame and time shared by markers of one evaluation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Header {
    pub frame_id: String,
    pub stamp: Timestamp,
}

impl Header {
    pub fn new<S: Into<String>>(frame_id: S, stamp: Timestamp) -> Self {
        Self {
            frame_id: frame_id.into(),
            stamp,
        }
    }
}

/// Primitive drawn by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    Cube,
    Sphere,
    Cylinder,
    MeshResource,
}

impl MarkerType {
    /// Numeric code used by `visualization_msgs/Marker`
    pub fn code(&self) -> i32 {
        match self {
            Self::Cube => 1,
            Self::Sphere => 2,
            Self::Cylinder => 3,
            Self::MeshResource => 10,
        }
    }
}

/// What the viewer should do with a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerAction {
    /// Add the marker, or replace the one with the same namespace and id
    Modify,
    /// Drop every marker previously received on this channel
    DeleteAll,
}

impl MarkerAction {
    /// Numeric code used by `visualization_msgs/Marker`
    pub fn code(&self) -> i32 {
        match self {
            Self::Modify => 0,
            Self::DeleteAll => 3,
        }
    }
}

/// One renderable primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub header: Header,
    pub ns: String,
    pub id: i32,
    #[serde(rename = "type")]
    pub marker_type: MarkerType,
    pub action: MarkerAction,
    pub pose: Pose,
    pub scale: Vector3<f64>,
    pub color: Rgba,
    /// Zero keeps the marker until it is replaced
    pub lifetime: Duration,
    pub frame_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_resource: Option<String>,
}

impl Marker {
    /// A marker that clears everything the viewer holds for this channel
    pub fn delete_all(header: Header) -> Self {
        Self {
            header,
            ns: String::new(),
            id: 0,
            marker_type: MarkerType::Cube,
            action: MarkerAction::DeleteAll,
            pose: Pose::identity(),
            scale: Vector3::zeros(),
            color: Rgba::new_unchecked(0.0, 0.0, 0.0, 0.0),
            lifetime: Duration::ZERO,
            frame_locked: true,
            mesh_resource: None,
        }
    }

    /// `(namespace, id)` identity used by the viewer to match updates
    pub fn key(&self) -> (&str, i32) {
        (&self.ns, self.id)
    }
}

/// Ordered markers produced by one evaluation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerCollection {
    pub markers: Vec<Marker>,
}

impl MarkerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// Distinct namespaces in first-appearance order
    pub fn namespaces(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for marker in &self.markers {
            if !seen.contains(&marker.ns.as_str()) {
                seen.push(marker.ns.as_str());
            }
        }
        seen
    }

    /// Look up a marker by namespace and id
    pub fn find(&self, ns: &str, id: i32) -> Option<&Marker> {
        self.markers.iter().find(|m| m.ns == ns && m.id == id)
    }
}

impl From<Vec<Marker>> for MarkerCollection {
    fn from(markers: Vec<Marker>) -> Self {
        Self { markers }
    }
}

impl Extend<Marker> for MarkerCollection {
    fn extend<I: IntoIterator<Item = Marker>>(&mut self, iter: I) {
        self.markers.extend(iter);
    }
}

impl IntoIterator for MarkerCollection {
    type Item = Marker;
    type IntoIter = std::vec::IntoIter<Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.into_iter()
    }
}

impl<'a> IntoIterator for &'a MarkerCollection {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_from_seconds() {
        assert_eq!(Timestamp::from_seconds(0.0), Timestamp { sec: 0, nanosec: 0 });
        assert_eq!(
            Timestamp::from_seconds(2.25),
            Timestamp { sec: 2, nanosec: 250_000_000 }
        );
        // Rounds up into the next second instead of overflowing nanoseconds.
        assert_eq!(
            Timestamp::from_seconds(0.999_999_999_9),
            Timestamp { sec: 1, nanosec: 0 }
        );
        assert!((Timestamp::from_seconds(3.5).as_seconds() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_collection_namespaces_and_lookup() {
        let header = Header::new("world", Timestamp::default());
        let mut a = Marker::delete_all(header.clone());
        a.ns = "src::a".into();
        let mut a1 = a.clone();
        a1.id = 1;
        let mut b = Marker::delete_all(header);
        b.ns = "src::b".into();

        let collection = MarkerCollection::from(vec![a, a1, b]);
        assert_eq!(collection.namespaces(), vec!["src::a", "src::b"]);
        assert_eq!(collection.find("src::a", 1).map(|m| m.key()), Some(("src::a", 1)));
        assert!(collection.find("src::b", 1).is_none());
    }

    #[test]
    fn test_marker_codes() {
        assert_eq!(MarkerType::Sphere.code(), 2);
        assert_eq!(MarkerType::MeshResource.code(), 10);
        assert_eq!(MarkerAction::Modify.code(), 0);
        assert_eq!(MarkerAction::DeleteAll.code(), 3);
    }
}
