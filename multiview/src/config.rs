//! Configuration types for descriptor matching and weak link creation.
//!
//! Both structs carry their defaults in `Default` and can be read from YAML.
//! Parsing always runs `validate()` so a bad file never yields a config.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// Descriptor matching configuration
// =============================================================================

/// Configuration for nearest-descriptor matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Required separation between the best and second-best candidate.
    ///
    /// A match is accepted iff `best * ratio_of_distance < second_best`.
    /// Must be >= 1.0.
    pub ratio_of_distance: f64,
    /// Upper bound on the accepted descriptor distance. `None` disables it.
    pub max_distance: Option<f64>,
    /// Query target descriptors on the rayon pool.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            ratio_of_distance: 3.0,
            max_distance: None,
            parallel: true,
        }
    }
}

impl MatchConfig {
    /// Parse from YAML and validate.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.ratio_of_distance >= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "ratio_of_distance",
                reason: format!("must be >= 1.0, got {}", self.ratio_of_distance),
            });
        }
        if let Some(max) = self.max_distance
            && !(max > 0.0)
        {
            return Err(ConfigError::InvalidValue {
                field: "max_distance",
                reason: format!("must be positive, got {}", max),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Weak link configuration
// =============================================================================

/// Configuration for creating weak links from view registrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeakLinkConfig {
    /// Views whose world-space boxes overlap by no more than this volume are
    /// not linked. `0.0` links any pair with a non-degenerate overlap.
    pub min_overlap_volume: f64,
    /// Do not emit a weak link for pairs already joined by a strong link.
    pub skip_strongly_linked: bool,
}

impl Default for WeakLinkConfig {
    fn default() -> Self {
        Self {
            min_overlap_volume: 0.0,
            skip_strongly_linked: true,
        }
    }
}

impl WeakLinkConfig {
    /// Parse from YAML and validate.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_overlap_volume >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "min_overlap_volume",
                reason: format!("must be non-negative, got {}", self.min_overlap_volume),
            });
        }
        Ok(())
    }
}
