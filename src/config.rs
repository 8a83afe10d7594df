//! Navigator settings
//!
//! Settings are loaded from `config/navigator.yaml` (or any YAML file) and
//! handed to each `Navigator` instance. There is no global config: two
//! navigators in the same process can run with different settings.
//!
//! Every field has a default, so a partial file (or no file at all) is valid:
//!
//! ```yaml
//! layout:
//!   radius: 300.0
//!   seed: 7
//! journey:
//!   tick_interval_ms: 1500
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub layout: LayoutConfig,
    pub journey: JourneyConfig,
    pub detail: DetailConfig,
    pub render: RenderConfig,
}

/// Radial (semantic) and tiered (traditional) placement parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Ring radius R for Page and Section nodes
    pub radius: f32,
    /// Topic nodes sit on a ring of `radius * topic_radius_factor`
    pub topic_radius_factor: f32,
    /// Maximum jitter J applied on each axis
    pub jitter: f32,
    /// Seed for the jitter generator
    pub seed: u64,
    /// Vertical distance between rows in the traditional view
    pub tier_spacing: f32,
    /// Horizontal distance between nodes in one traditional row
    pub column_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 300.0,
            topic_radius_factor: 0.5,
            jitter: 20.0,
            seed: 42,
            tier_spacing: 150.0,
            column_spacing: 120.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyConfig {
    /// Delay between two journey steps while playing
    pub tick_interval_ms: u64,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1500,
        }
    }
}

impl JourneyConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailConfig {
    /// Maximum number of related nodes listed in a node detail
    pub related_node_limit: usize,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            related_node_limit: 5,
        }
    }
}

/// Draw-list sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub page_radius: f32,
    pub section_radius: f32,
    pub topic_radius: f32,
    /// Topic radius scale at importance 0.0
    pub min_size_scale: f32,
    /// Topic radius scale at importance 1.0
    pub max_size_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_radius: 10.0,
            section_radius: 7.0,
            topic_radius: 12.0,
            min_size_scale: 0.7,
            max_size_scale: 1.3,
        }
    }
}

impl NavigatorConfig {
    /// Parse settings from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: NavigatorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded navigator config");
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.layout.radius.is_finite() && self.layout.radius >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "layout.radius",
                message: format!("must be a non-negative number, got {}", self.layout.radius),
            });
        }
        // The sampled span is 2 * jitter and must stay finite
        if !(self.layout.jitter >= 0.0 && (2.0 * self.layout.jitter).is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "layout.jitter",
                message: format!("must be a non-negative number, got {}", self.layout.jitter),
            });
        }
        if self.layout.jitter > self.layout.radius {
            return Err(ConfigError::InvalidValue {
                field: "layout.jitter",
                message: format!(
                    "{} exceeds layout.radius {}",
                    self.layout.jitter, self.layout.radius
                ),
            });
        }
        if self.journey.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "journey.tick_interval_ms",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.render.min_size_scale > self.render.max_size_scale {
            return Err(ConfigError::InvalidValue {
                field: "render.min_size_scale",
                message: format!(
                    "{} exceeds render.max_size_scale {}",
                    self.render.min_size_scale, self.render.max_size_scale
                ),
            });
        }
        Ok(())
    }

    /// Reset every section that fails `validate()` to its defaults, logging
    /// each reset at `warn`
    pub fn or_defaults(mut self) -> Self {
        while let Err(e) = self.validate() {
            tracing::warn!(error = %e, "invalid navigator config, section reset to defaults");
            let field = match &e {
                ConfigError::InvalidValue { field, .. } => *field,
                _ => "",
            };
            match field.split('.').next() {
                Some("layout") => self.layout = LayoutConfig::default(),
                Some("journey") => self.journey = JourneyConfig::default(),
                Some("detail") => self.detail = DetailConfig::default(),
                Some("render") => self.render = RenderConfig::default(),
                _ => return Self::default(),
            }
        }
        self
    }
}
