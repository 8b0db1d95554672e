use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub sensitivity: f32,
    pub walk_speed: f32,
    pub gravity: f32,
    /// Vertical velocity held while grounded so the body keeps touching the floor.
    pub grounded_velocity: f32,

    pub crouch_speed: f32,
    pub crouch_head_position: f32,
    pub crouch_transition_speed: f32,

    pub pitch_clamp_degrees: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            sensitivity: 2.0,
            walk_speed: 5.0,
            gravity: 9.8,
            grounded_velocity: -1.0,

            crouch_speed: 2.0,
            crouch_head_position: 1.0,
            crouch_transition_speed: 6.0,

            pitch_clamp_degrees: 60.0,
        }
    }
}

impl LocomotionConfig {
    /// Parses a RON document. Fields left out keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&source).inspect_err(|err| {
            log::warn!("rejected config {}: {}", path.display(), err);
        })?;
        log::debug!("loaded locomotion config from {}", path.display());
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("sensitivity", self.sensitivity),
            ("walk_speed", self.walk_speed),
            ("gravity", self.gravity),
            ("grounded_velocity", self.grounded_velocity),
            ("crouch_speed", self.crouch_speed),
            ("crouch_head_position", self.crouch_head_position),
            ("crouch_transition_speed", self.crouch_transition_speed),
            ("pitch_clamp_degrees", self.pitch_clamp_degrees),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not a finite number")));
            }
        }

        let non_negative = [
            ("sensitivity", self.sensitivity),
            ("walk_speed", self.walk_speed),
            ("gravity", self.gravity),
            ("crouch_speed", self.crouch_speed),
            ("crouch_transition_speed", self.crouch_transition_speed),
        ];

        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(field, format!("{value} must not be negative")));
            }
        }

        if self.grounded_velocity > 0.0 {
            return Err(invalid(
                "grounded_velocity",
                format!("{} must point downward or be zero", self.grounded_velocity),
            ));
        }

        if self.pitch_clamp_degrees <= 0.0 || self.pitch_clamp_degrees > 90.0 {
            return Err(invalid(
                "pitch_clamp_degrees",
                format!("{} must be within (0, 90]", self.pitch_clamp_degrees),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
