//! Whole-scene marker assembly for a single role

use crate::params::SceneMarkersParams;
use crate::translator::ShapeToMarkerTranslator;
use scenemark_core::{
    Header, Marker, MarkerCollection, Result, Rgba, Role, SceneQuery, Timestamp, VisualProperties,
};
use tracing::{debug, trace};

/// Builds the marker collection for one role of a scene snapshot.
///
/// The configuration is fixed at construction; one assembler per role.
#[derive(Debug, Clone)]
pub struct SceneMarkerAssembler {
    params: SceneMarkersParams,
}

impl SceneMarkerAssembler {
    pub fn new(params: SceneMarkersParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn illustration() -> Self {
        Self {
            params: SceneMarkersParams::illustration(),
        }
    }

    pub fn proximity() -> Self {
        Self {
            params: SceneMarkersParams::proximity(),
        }
    }

    pub fn params(&self) -> &SceneMarkersParams {
        &self.params
    }

    pub fn role(&self) -> Role {
        self.params.role
    }

    pub fn default_color(&self) -> Rgba {
        self.params.default_color
    }

    /// Translate every geometry of the configured role.
    ///
    /// Entries keep the scene's enumeration order and each one's
    /// sub-markers keep the ids the translator assigned. A scene without
    /// matching geometry yields an empty collection (or just the delete-all
    /// marker, when enabled).
    pub fn assemble<Q: SceneQuery + ?Sized>(&self, scene: &Q) -> MarkerCollection {
        let role = self.params.role;
        let header = Header::new(
            self.params.world_frame.clone(),
            Timestamp::from_seconds(scene.time()),
        );

        let mut collection = MarkerCollection::new();
        if self.params.include_deletion_marker {
            collection.push(Marker::delete_all(header.clone()));
        }

        let mut translated = 0usize;
        let mut hidden = 0usize;
        for entry in scene.entries().iter().filter(|e| e.role == role) {
            let properties =
                VisualProperties::resolve(scene.overrides(entry.id, role), self.params.default_color);
            if !properties.visible && !self.params.include_invisible {
                trace!(id = %entry.id, name = %entry.name, "skipping invisible geometry");
                hidden += 1;
                continue;
            }

            let translator =
                ShapeToMarkerTranslator::new(header.clone(), entry.marker_namespace(), &properties);
            let markers = translator.translate(&entry.shape, &entry.pose);
            trace!(
                ns = translator.namespace(),
                kind = entry.shape.kind_name(),
                anchored = entry.anchored,
                count = markers.len(),
                "translated geometry"
            );
            collection.extend(markers);
            translated += 1;
        }

        debug!(
            %role,
            geometries = translated,
            hidden,
            markers = collection.len(),
            "assembled scene markers"
        );
        collection
    }
}
