use core::fmt;

use lf_core::BorderMode;
use serde::{Deserialize, Serialize};

use crate::weights::ChannelWeights;

/// Border handling selectable from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderKind {
    #[default]
    Reflect101,
    Clamp,
}

impl BorderKind {
    pub fn to_mode(self) -> BorderMode<f32> {
        match self {
            Self::Reflect101 => BorderMode::Reflect101,
            Self::Clamp => BorderMode::Clamp,
        }
    }
}

/// On-disk fusion settings.
///
/// ```json
/// { "alpha_r": [1.0, 0.5, 0.0], "alpha_g": [1.0, 0.5, 0.0],
///   "alpha_b": [1.0, 0.5, 0.0], "border": "reflect101" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionConfig {
    pub alpha_r: Vec<f32>,
    pub alpha_g: Vec<f32>,
    pub alpha_b: Vec<f32>,
    #[serde(default)]
    pub border: BorderKind,
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(lf_core::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed fusion config: {err}"),
            Self::Invalid(err) => write!(f, "invalid fusion config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl FusionConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        cfg.weights().map_err(ConfigError::Invalid)?;
        Ok(cfg)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Parse)
    }

    pub fn weights(&self) -> Result<ChannelWeights, lf_core::Error> {
        ChannelWeights::new(
            self.alpha_r.clone(),
            self.alpha_g.clone(),
            self.alpha_b.clone(),
        )
    }
}
