//! RGBA colors

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A color with four channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Self = Self::new_unchecked(1.0, 1.0, 1.0, 1.0);

    /// Create a color, rejecting channels outside `[0, 1]`
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self> {
        let color = Self::new_unchecked(r, g, b, a);
        color.validate()?;
        Ok(color)
    }

    /// Create a color without range checks
    pub const fn new_unchecked(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Check that every channel is a finite value in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("r", self.r), ("g", self.g), ("b", self.b), ("a", self.a)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidColor(format!(
                    "channel {name} must be in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Parses `"r,g,b,a"`, or `"r,g,b"` with an implied opaque alpha.
impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let channels = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f32>()
                    .map_err(|e| Error::InvalidColor(format!("'{}': {}", part.trim(), e)))
            })
            .collect::<Result<Vec<f32>>>()?;

        match channels.as_slice() {
            [r, g, b] => Self::new(*r, *g, *b, 1.0),
            [r, g, b, a] => Self::new(*r, *g, *b, *a),
            _ => Err(Error::InvalidColor(format!(
                "expected 3 or 4 comma separated channels, got {}",
                channels.len()
            ))),
        }
    }
}
