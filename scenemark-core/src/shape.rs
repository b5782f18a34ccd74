//! Closed set of geometric primitives

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A geometric shape with its kind-specific parameters.
///
/// All lengths are in meters. Cylinders and capsules are symmetric about
/// their local z axis; `length` excludes the capsule's hemispherical caps.
/// A half space is bounded by the local z = 0 plane with its outward normal
/// along +z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Sphere { radius: f64 },
    Ellipsoid { a: f64, b: f64, c: f64 },
    Cylinder { radius: f64, length: f64 },
    Box { width: f64, depth: f64, height: f64 },
    Capsule { radius: f64, length: f64 },
    HalfSpace,
    Convex {
        filename: String,
        #[serde(default = "unit_scale")]
        scale: f64,
    },
    Mesh {
        filename: String,
        #[serde(default = "unit_scale")]
        scale: f64,
    },
}

fn unit_scale() -> f64 {
    1.0
}

impl Shape {
    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    pub fn ellipsoid(a: f64, b: f64, c: f64) -> Self {
        Self::Ellipsoid { a, b, c }
    }

    pub fn cylinder(radius: f64, length: f64) -> Self {
        Self::Cylinder { radius, length }
    }

    pub fn cuboid(width: f64, depth: f64, height: f64) -> Self {
        Self::Box {
            width,
            depth,
            height,
        }
    }

    pub fn capsule(radius: f64, length: f64) -> Self {
        Self::Capsule { radius, length }
    }

    pub fn half_space() -> Self {
        Self::HalfSpace
    }

    pub fn convex<S: Into<String>>(filename: S, scale: f64) -> Self {
        Self::Convex {
            filename: filename.into(),
            scale,
        }
    }

    pub fn mesh<S: Into<String>>(filename: S, scale: f64) -> Self {
        Self::Mesh {
            filename: filename.into(),
            scale,
        }
    }

    /// Stable lowercase name of the shape kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Ellipsoid { .. } => "ellipsoid",
            Self::Cylinder { .. } => "cylinder",
            Self::Box { .. } => "box",
            Self::Capsule { .. } => "capsule",
            Self::HalfSpace => "half_space",
            Self::Convex { .. } => "convex",
            Self::Mesh { .. } => "mesh",
        }
    }

    /// Mesh file backing this shape, if any
    pub fn mesh_filename(&self) -> Option<&str> {
        match self {
            Self::Convex { filename, .. } | Self::Mesh { filename, .. } => Some(filename.as_str()),
            _ => None,
        }
    }

    /// Make a mesh filename absolute, resolving a relative one against
    /// `base_dir` or, without one, the current directory. Other kinds and
    /// already absolute filenames are returned unchanged.
    pub fn with_absolute_filename(self, base_dir: Option<&Path>) -> Result<Self> {
        let kind = self.kind_name();
        match self {
            Self::Convex { filename, scale } => Ok(Self::Convex {
                filename: absolute_filename(kind, filename, base_dir)?,
                scale,
            }),
            Self::Mesh { filename, scale } => Ok(Self::Mesh {
                filename: absolute_filename(kind, filename, base_dir)?,
                scale,
            }),
            other => Ok(other),
        }
    }

    /// Check the parameter invariants of this shape.
    ///
    /// Every dimension and mesh scale must be finite and strictly positive,
    /// and mesh kinds need a non-empty filename.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind_name();
        match self {
            Self::Sphere { radius } => positive(kind, "radius", *radius),
            Self::Ellipsoid { a, b, c } => {
                positive(kind, "a", *a)?;
                positive(kind, "b", *b)?;
                positive(kind, "c", *c)
            }
            Self::Cylinder { radius, length } | Self::Capsule { radius, length } => {
                positive(kind, "radius", *radius)?;
                positive(kind, "length", *length)
            }
            Self::Box {
                width,
                depth,
                height,
            } => {
                positive(kind, "width", *width)?;
                positive(kind, "depth", *depth)?;
                positive(kind, "height", *height)
            }
            Self::HalfSpace => Ok(()),
            Self::Convex { filename, scale } | Self::Mesh { filename, scale } => {
                if filename.trim().is_empty() {
                    return Err(Error::InvalidShape {
                        kind,
                        reason: "filename is empty".to_string(),
                    });
                }
                positive(kind, "scale", *scale)
            }
        }
    }
}

fn absolute_filename(kind: &'static str, filename: String, base_dir: Option<&Path>) -> Result<String> {
    let path = Path::new(&filename);
    if path.is_absolute() || filename.trim().is_empty() {
        return Ok(filename);
    }
    let joined = match base_dir {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    };
    let resolved = std::path::absolute(&joined).map_err(|e| Error::InvalidShape {
        kind,
        reason: format!("cannot make {} absolute: {e}", joined.display()),
    })?;
    Ok(resolved.to_string_lossy().into_owned())
}

fn positive(kind: &'static str, what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidShape {
            kind,
            reason: format!("{what} must be positive and finite, got {value}"),
        })
    }
}
