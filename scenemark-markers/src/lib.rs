//! Scene-to-marker translation
//!
//! [`ShapeToMarkerTranslator`] turns one posed shape into one or more
//! markers. [`SceneMarkerAssembler`] drives it over a whole scene snapshot
//! for a single role and concatenates the results.

pub mod assembler;
pub mod params;
pub mod translator;

pub use assembler::SceneMarkerAssembler;
pub use params::{SceneMarkersConfig, SceneMarkersParams};
pub use translator::{ShapeToMarkerTranslator, HALF_SPACE_LENGTH, HALF_SPACE_THICKNESS};
