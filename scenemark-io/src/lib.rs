//! I/O operations for scene documents and marker collections
//!
//! Scenes are read from JSON documents (see [`scene`]) into a validated
//! [`SceneSnapshot`]; marker collections are written back out as JSON.

pub mod error;
pub mod markers;
pub mod scene;

#[cfg(test)]
mod tests;

pub use error::*;
pub use markers::{markers_to_string, read_markers, write_markers, write_markers_to};
pub use scene::{EntryDocument, PoseDocument, SceneDocument};

use scenemark_core::{SceneQuery, SceneSnapshot};
use std::path::Path;

/// Parse a scene document from a JSON string.
///
/// Relative mesh filenames are resolved against `base_dir`.
pub fn parse_scene(json: &str, base_dir: Option<&Path>) -> Result<SceneSnapshot> {
    let document: SceneDocument = serde_json::from_str(json)?;
    document.into_snapshot(base_dir)
}

/// Read a scene document from `path`.
///
/// Relative mesh filenames are resolved against the document's directory.
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<SceneSnapshot> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let snapshot = parse_scene(&json, path.parent())?;
    tracing::debug!(
        path = %path.display(),
        entries = snapshot.len(),
        time = snapshot.time(),
        "loaded scene"
    );
    Ok(snapshot)
}
