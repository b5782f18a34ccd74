//! Per-shape marker translation

use nalgebra::Vector3;
use scenemark_core::{
    Header, Marker, MarkerAction, MarkerType, Pose, Rgba, Shape, VisualProperties,
};
use std::time::Duration;

/// In-plane edge length of the cube standing in for a half space
pub const HALF_SPACE_LENGTH: f64 = 50.0;

/// Thickness of the half-space cube along the plane normal
pub const HALF_SPACE_THICKNESS: f64 = 1.0;

/// Translates one posed shape into viewer markers.
///
/// Every marker produced by a translator shares its header, namespace and
/// color. Sub-marker ids start at 0 and follow a fixed per-kind order, so
/// translating the same shape again replaces the same markers in the viewer.
#[derive(Debug, Clone)]
pub struct ShapeToMarkerTranslator {
    header: Header,
    namespace: String,
    color: Rgba,
}

impl ShapeToMarkerTranslator {
    pub fn new<S: Into<String>>(header: Header, namespace: S, properties: &VisualProperties) -> Self {
        Self {
            header,
            namespace: namespace.into(),
            color: properties.color,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Produce the markers for `shape` at world pose `pose`.
    ///
    /// The visual properties were bound in [`new`](Self::new), so one
    /// translator covers one `(shape, pose, properties)` triple per call.
    /// Capsules expand to `[body, +z cap, -z cap]`; every other kind yields
    /// a single marker.
    ///
    /// # Panics
    ///
    /// Panics if the shape parameters are malformed.
    pub fn translate(&self, shape: &Shape, pose: &Pose) -> Vec<Marker> {
        if let Err(err) = shape.validate() {
            panic!("malformed shape reached the marker translator: {err}");
        }

        match shape {
            Shape::Sphere { radius } => {
                vec![self.marker(0, MarkerType::Sphere, *pose, Vector3::repeat(*radius))]
            }
            Shape::Ellipsoid { a, b, c } => {
                vec![self.marker(0, MarkerType::Sphere, *pose, Vector3::new(*a, *b, *c))]
            }
            Shape::Cylinder { radius, length } => vec![self.marker(
                0,
                MarkerType::Cylinder,
                *pose,
                Vector3::new(*radius, *radius, *length),
            )],
            Shape::Box {
                width,
                depth,
                height,
            } => vec![self.marker(
                0,
                MarkerType::Cube,
                *pose,
                Vector3::new(*width, *depth, *height),
            )],
            Shape::HalfSpace => vec![self.marker(
                0,
                MarkerType::Cube,
                *pose,
                Vector3::new(HALF_SPACE_LENGTH, HALF_SPACE_LENGTH, HALF_SPACE_THICKNESS),
            )],
            Shape::Capsule { radius, length } => {
                let cap_scale = Vector3::repeat(*radius);
                vec![
                    self.marker(
                        0,
                        MarkerType::Cylinder,
                        *pose,
                        Vector3::new(*radius, *radius, *length),
                    ),
                    self.marker(
                        1,
                        MarkerType::Sphere,
                        pose.offset_along_local_z(length / 2.0),
                        cap_scale,
                    ),
                    self.marker(
                        2,
                        MarkerType::Sphere,
                        pose.offset_along_local_z(-length / 2.0),
                        cap_scale,
                    ),
                ]
            }
            Shape::Convex { filename, scale } | Shape::Mesh { filename, scale } => {
                let mut marker =
                    self.marker(0, MarkerType::MeshResource, *pose, Vector3::repeat(*scale));
                marker.mesh_resource = Some(format!("file://{filename}"));
                vec![marker]
            }
        }
    }

    fn marker(&self, id: i32, marker_type: MarkerType, pose: Pose, scale: Vector3<f64>) -> Marker {
        Marker {
            header: self.header.clone(),
            ns: self.namespace.clone(),
            id,
            marker_type,
            action: MarkerAction::Modify,
            pose,
            scale,
            color: self.color,
            lifetime: Duration::ZERO,
            frame_locked: true,
            mesh_resource: None,
        }
    }
}
