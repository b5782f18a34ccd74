//! Integration tests for scenemark-markers
//!
//! Each test registers geometry in a scene snapshot, assembles markers for a
//! role and checks the resulting collection the way a viewer would see it.

use approx::assert_relative_eq;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use scenemark_core::{
    GeometryId, Marker, MarkerAction, MarkerType, Pose, PropertyOverrides, Rgba, Role,
    SceneEntry, SceneQuery, SceneSnapshot, Shape, Timestamp,
};
use scenemark_markers::{SceneMarkerAssembler, SceneMarkersParams};
use std::time::Duration;

const SOURCE_NAME: &str = "test";

fn red() -> Rgba {
    Rgba::new(1.0, 0.0, 0.0, 1.0).unwrap()
}

/// A scene holding one world-fixed illustration geometry at identity
fn single_geometry_scene(name: &str, shape: Shape) -> SceneSnapshot {
    let mut scene = SceneSnapshot::new();
    scene
        .add_anchored(SOURCE_NAME, name, shape, Pose::identity(), Role::Illustration)
        .unwrap();
    scene
}

fn assemble_single(name: &str, shape: Shape) -> Vec<Marker> {
    let assembler =
        SceneMarkerAssembler::new(SceneMarkersParams::illustration().with_default_color(red()))
            .unwrap();
    assembler
        .assemble(&single_geometry_scene(name, shape))
        .markers
}

fn assert_persistent_marker(marker: &Marker, name: &str) {
    assert_eq!(marker.header.frame_id, "world");
    assert_eq!(marker.header.stamp, Timestamp { sec: 0, nanosec: 0 });
    assert_eq!(marker.ns, format!("{SOURCE_NAME}::{name}"));
    assert_eq!(marker.action, MarkerAction::Modify);
    assert_eq!(marker.lifetime, Duration::ZERO);
    assert!(marker.frame_locked);
    assert_eq!(marker.color, red());
}

fn assert_identity_pose(marker: &Marker) {
    assert_eq!(marker.pose.position, Point3::new(0.0, 0.0, 0.0));
    let q = marker.pose.orientation.coords;
    assert_eq!([q.x, q.y, q.z, q.w], [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_single_sphere_scene() {
    let markers = assemble_single("sphere", Shape::sphere(1.0));
    assert_eq!(markers.len(), 1);
    let marker = &markers[0];
    assert_persistent_marker(marker, "sphere");
    assert_eq!(marker.ns, "test::sphere");
    assert_eq!(marker.id, 0);
    assert_eq!(marker.marker_type, MarkerType::Sphere);
    assert_eq!(marker.scale, Vector3::new(1.0, 1.0, 1.0));
    assert_eq!(marker.color.to_array(), [1.0, 0.0, 0.0, 1.0]);
    assert_identity_pose(marker);
}

#[test]
fn test_single_ellipsoid_scene() {
    let markers = assemble_single("ellipsoid", Shape::ellipsoid(0.3, 0.4, 0.5));
    assert_eq!(markers.len(), 1);
    assert_persistent_marker(&markers[0], "ellipsoid");
    assert_eq!(markers[0].marker_type, MarkerType::Sphere);
    assert_eq!(markers[0].scale, Vector3::new(0.3, 0.4, 0.5));
    assert_identity_pose(&markers[0]);
}

#[test]
fn test_single_cylinder_scene() {
    let markers = assemble_single("cylinder", Shape::cylinder(0.5, 1.0));
    assert_eq!(markers.len(), 1);
    assert_persistent_marker(&markers[0], "cylinder");
    assert_eq!(markers[0].marker_type, MarkerType::Cylinder);
    assert_eq!(markers[0].scale, Vector3::new(0.5, 0.5, 1.0));
    assert_identity_pose(&markers[0]);
}

#[test]
fn test_single_half_space_scene() {
    let markers = assemble_single("hspace", Shape::half_space());
    assert_eq!(markers.len(), 1);
    assert_persistent_marker(&markers[0], "hspace");
    assert_eq!(markers[0].marker_type, MarkerType::Cube);
    assert!(markers[0].scale.x > 10.0);
    assert!(markers[0].scale.y > 10.0);
}

#[test]
fn test_single_box_scene() {
    let markers = assemble_single("box", Shape::cuboid(0.5, 0.25, 1.0));
    assert_eq!(markers.len(), 1);
    assert_persistent_marker(&markers[0], "box");
    assert_eq!(markers[0].marker_type, MarkerType::Cube);
    assert_eq!(markers[0].scale, Vector3::new(0.5, 0.25, 1.0));
    assert_identity_pose(&markers[0]);
}

#[test]
fn test_single_capsule_scene() {
    let markers = assemble_single("capsule", Shape::capsule(0.25, 0.5));
    assert_eq!(markers.len(), 3);
    for (expected_id, marker) in markers.iter().enumerate() {
        assert_persistent_marker(marker, "capsule");
        assert_eq!(marker.id, expected_id as i32);
    }

    let body = &markers[0];
    assert_eq!(body.marker_type, MarkerType::Cylinder);
    assert_eq!(body.scale, Vector3::new(0.25, 0.25, 0.5));
    assert_identity_pose(body);

    let upper = &markers[1];
    assert_eq!(upper.marker_type, MarkerType::Sphere);
    assert_eq!(upper.scale, Vector3::new(0.25, 0.25, 0.25));
    assert_eq!(upper.pose.position, Point3::new(0.0, 0.0, 0.25));
    assert_eq!(upper.pose.orientation, UnitQuaternion::identity());

    let lower = &markers[2];
    assert_eq!(lower.marker_type, MarkerType::Sphere);
    assert_eq!(lower.scale, Vector3::new(0.25, 0.25, 0.25));
    assert_eq!(lower.pose.position, Point3::new(0.0, 0.0, -0.25));
    assert_eq!(lower.pose.orientation, UnitQuaternion::identity());
}

#[test]
fn test_single_mesh_scenes() {
    for shape in [
        Shape::convex("/tmp/dummy.obj", 0.1),
        Shape::mesh("/tmp/dummy.obj", 0.1),
    ] {
        let markers = assemble_single("mesh", shape);
        assert_eq!(markers.len(), 1);
        let marker = &markers[0];
        assert_persistent_marker(marker, "mesh");
        assert_eq!(marker.marker_type, MarkerType::MeshResource);
        assert_eq!(marker.mesh_resource.as_deref(), Some("file:///tmp/dummy.obj"));
        assert_eq!(marker.scale, Vector3::new(0.1, 0.1, 0.1));
        assert_identity_pose(marker);
    }
}

#[test]
fn test_relative_mesh_filename_becomes_absolute_resource() {
    let markers = assemble_single("mesh", Shape::mesh("meshes/part.obj", 1.0));
    assert_eq!(markers.len(), 1);

    let resource = markers[0].mesh_resource.as_deref().unwrap();
    let path = resource.strip_prefix("file://").unwrap();
    assert!(std::path::Path::new(path).is_absolute(), "{resource}");
    assert!(path.ends_with("meshes/part.obj"));
}

#[test]
fn test_color_override_applies_to_every_sub_marker() {
    let mut scene = single_geometry_scene("capsule", Shape::capsule(0.1, 0.2));
    let id = scene.entries()[0].id;
    let green = Rgba::new(0.0, 1.0, 0.0, 0.5).unwrap();
    scene
        .set_overrides(id, Role::Illustration, PropertyOverrides::default().with_color(green))
        .unwrap();

    let markers = SceneMarkerAssembler::illustration().assemble(&scene);
    assert_eq!(markers.len(), 3);
    assert!(markers.iter().all(|m| m.color == green));

    // An override assigned under the other role does not leak into this one.
    let mut other = single_geometry_scene("ball", Shape::sphere(0.1));
    let id = other.entries()[0].id;
    other
        .set_overrides(id, Role::Proximity, PropertyOverrides::default().with_color(green))
        .unwrap();
    let assembler = SceneMarkerAssembler::illustration();
    let markers = assembler.assemble(&other);
    assert_eq!(markers.markers[0].color, assembler.default_color());
}

#[test]
fn test_dynamic_geometry_uses_current_pose() {
    let mut scene = SceneSnapshot::new().with_time(2.5);
    let pose = Pose::from_parts(
        Point3::new(0.5, -1.0, 0.2),
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::FRAC_PI_2),
    );
    scene
        .add_dynamic("robot", "forearm", Shape::capsule(0.05, 0.4), pose, Role::Proximity)
        .unwrap();

    let markers = SceneMarkerAssembler::proximity().assemble(&scene);
    assert_eq!(markers.len(), 3);
    assert_eq!(markers.markers[0].ns, "robot::forearm");
    assert_eq!(markers.markers[0].header.frame_id, "world");
    assert_eq!(markers.markers[0].header.stamp, Timestamp { sec: 2, nanosec: 500_000_000 });
    assert_eq!(markers.markers[0].pose, pose);
    // Local z of this pose points along world -y.
    assert_relative_eq!(
        markers.markers[1].pose.position,
        Point3::new(0.5, -1.2, 0.2),
        epsilon = 1e-12
    );
    assert_relative_eq!(
        markers.markers[2].pose.position,
        Point3::new(0.5, -0.8, 0.2),
        epsilon = 1e-12
    );
}

#[test]
fn test_ids_are_stable_across_evaluations() {
    let mut scene = SceneSnapshot::new();
    let arm = scene
        .add_dynamic("robot", "arm", Shape::capsule(0.1, 0.5), Pose::identity(), Role::Illustration)
        .unwrap();
    scene
        .add_anchored("robot", "base", Shape::cuboid(1.0, 1.0, 0.2), Pose::identity(), Role::Illustration)
        .unwrap();

    let assembler = SceneMarkerAssembler::illustration();
    let first = assembler.assemble(&scene);
    assert_eq!(first, assembler.assemble(&scene));

    scene
        .update_pose(arm, Pose::from_translation(Vector3::new(0.0, 0.0, 1.0)))
        .unwrap();
    let second = assembler.assemble(&scene);

    let keys = |c: &scenemark_core::MarkerCollection| {
        c.iter().map(|m| (m.ns.clone(), m.id)).collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(
        keys(&second),
        vec![
            ("robot::arm".to_string(), 0),
            ("robot::arm".to_string(), 1),
            ("robot::arm".to_string(), 2),
            ("robot::base".to_string(), 0),
        ]
    );
    assert_eq!(second.markers[0].pose.position, Point3::new(0.0, 0.0, 1.0));
}

#[test]
fn test_custom_world_frame() {
    let params = SceneMarkersParams::illustration().with_world_frame("map");
    let markers = SceneMarkerAssembler::new(params)
        .unwrap()
        .assemble(&single_geometry_scene("sphere", Shape::sphere(1.0)));
    assert_eq!(markers.markers[0].header.frame_id, "map");
}

/// A scene source that is not a `SceneSnapshot`
struct FixedScene {
    entries: Vec<SceneEntry>,
    overrides: PropertyOverrides,
}

impl SceneQuery for FixedScene {
    fn time(&self) -> f64 {
        0.0
    }

    fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }

    fn overrides(&self, _id: GeometryId, role: Role) -> Option<&PropertyOverrides> {
        (role == Role::Proximity).then_some(&self.overrides)
    }
}

#[test]
fn test_assembles_from_any_scene_query() {
    let scene = FixedScene {
        entries: vec![SceneEntry {
            id: GeometryId(7),
            source_name: "external".into(),
            name: "wall".into(),
            shape: Shape::cuboid(2.0, 0.1, 3.0),
            pose: Pose::identity(),
            role: Role::Proximity,
            anchored: true,
        }],
        overrides: PropertyOverrides::default().with_color(red()),
    };

    let dyn_scene: &dyn SceneQuery = &scene;
    let markers = SceneMarkerAssembler::proximity().assemble(dyn_scene);
    assert_eq!(markers.len(), 1);
    assert_eq!(markers.markers[0].ns, "external::wall");
    assert_eq!(markers.markers[0].color, red());
}

#[test]
fn test_assembler_is_shareable_across_threads() {
    let assembler = SceneMarkerAssembler::illustration();
    let scenes: Vec<SceneSnapshot> = (0..4)
        .map(|i| single_geometry_scene(&format!("ball{i}"), Shape::sphere(0.1 * (i + 1) as f64)))
        .collect();

    let assembler = &assembler;
    let collections: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = scenes
            .iter()
            .map(|scene| s.spawn(move || assembler.assemble(scene)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, collection) in collections.iter().enumerate() {
        assert_eq!(collection.markers[0].ns, format!("test::ball{i}"));
    }
}
