//! Construction-time configuration for scene marker assembly

use scenemark_core::{Error, Result, Rgba, Role};
use serde::{Deserialize, Serialize};

/// Frame name reported for world-fixed markers unless configured otherwise
pub const DEFAULT_WORLD_FRAME: &str = "world";

/// Configuration of one [`SceneMarkerAssembler`](crate::SceneMarkerAssembler).
///
/// Deserializing goes through [`SceneMarkersConfig`], so fields a config
/// leaves out come from the preset of its role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SceneMarkersConfig")]
pub struct SceneMarkersParams {
    /// Only geometry carrying this role is translated
    pub role: Role,
    /// Color used when a geometry has no color override for `role`
    pub default_color: Rgba,
    /// Reference frame written into every marker header
    pub world_frame: String,
    /// Prefix each collection with a delete-all marker
    pub include_deletion_marker: bool,
    /// Translate geometry even when it resolves as invisible
    pub include_invisible: bool,
}

impl Default for SceneMarkersParams {
    fn default() -> Self {
        Self::illustration()
    }
}

impl SceneMarkersParams {
    /// Parameters for visual geometry
    pub fn illustration() -> Self {
        Self {
            role: Role::Illustration,
            default_color: Rgba::new_unchecked(0.9, 0.9, 0.9, 1.0),
            world_frame: DEFAULT_WORLD_FRAME.to_string(),
            include_deletion_marker: false,
            include_invisible: false,
        }
    }

    /// Parameters for collision geometry
    pub fn proximity() -> Self {
        Self {
            role: Role::Proximity,
            default_color: Rgba::new_unchecked(0.5, 0.5, 0.5, 1.0),
            ..Self::illustration()
        }
    }

    /// Preset for `role`
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Illustration => Self::illustration(),
            Role::Proximity => Self::proximity(),
        }
    }

    pub fn with_default_color(mut self, color: Rgba) -> Self {
        self.default_color = color;
        self
    }

    pub fn with_world_frame<S: Into<String>>(mut self, frame: S) -> Self {
        self.world_frame = frame.into();
        self
    }

    pub fn with_deletion_marker(mut self, enabled: bool) -> Self {
        self.include_deletion_marker = enabled;
        self
    }

    pub fn with_invisible(mut self, enabled: bool) -> Self {
        self.include_invisible = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.default_color.validate()?;
        if self.world_frame.trim().is_empty() {
            return Err(Error::InvalidConfig("world frame name is empty".to_string()));
        }
        Ok(())
    }
}

/// Partial marker parameters as written in a config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneMarkersConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_frame: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_deletion_marker: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_invisible: Option<bool>,
}

impl SceneMarkersConfig {
    /// Fill unset fields from the preset of the configured role, illustration
    /// when no role is set.
    pub fn into_params(self) -> SceneMarkersParams {
        let preset = SceneMarkersParams::for_role(self.role.unwrap_or(Role::Illustration));
        SceneMarkersParams {
            default_color: self.default_color.unwrap_or(preset.default_color),
            world_frame: self.world_frame.unwrap_or(preset.world_frame),
            include_deletion_marker: self
                .include_deletion_marker
                .unwrap_or(preset.include_deletion_marker),
            include_invisible: self.include_invisible.unwrap_or(preset.include_invisible),
            role: preset.role,
        }
    }
}

impl From<SceneMarkersConfig> for SceneMarkersParams {
    fn from(config: SceneMarkersConfig) -> Self {
        config.into_params()
    }
}
