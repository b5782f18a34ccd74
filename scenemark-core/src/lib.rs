//! Core data structures for scenemark
//!
//! This crate provides the types shared by the marker translator and its
//! collaborators: closed-set shapes, rigid poses, colors, scene snapshots
//! and the marker records handed to a remote viewer.

pub mod color;
pub mod error;
pub mod marker;
pub mod pose;
pub mod scene;
pub mod shape;

pub use color::*;
pub use error::*;
pub use marker::*;
pub use pose::*;
pub use scene::*;
pub use shape::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
