//! Tunables for the shadow projector, the height policy, the sun cache and
//! the heat alert.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadeConfig {
    pub meters_per_degree: f64,
    pub default_height_m: f64,
    pub meters_per_level: f64,
    pub sun_cache_decimals: u32,
    /// Apparent temperature, in °C, at which a heat alert is raised.
    pub heat_alert_c: f64,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            meters_per_degree: 111_000.0,
            default_height_m: 15.0,
            meters_per_level: 3.0,
            sun_cache_decimals: 3,
            heat_alert_c: 35.0,
        }
    }
}

impl ShadeConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ShadeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file. Keys left out of the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded shade config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("meters_per_degree", self.meters_per_degree),
            ("default_height_m", self.default_height_m),
            ("meters_per_level", self.meters_per_level),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.heat_alert_c.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "heat_alert_c must be a finite number, got {}",
                self.heat_alert_c
            )));
        }
        if self.sun_cache_decimals > 9 {
            return Err(ConfigError::Invalid(format!(
                "sun_cache_decimals must be at most 9, got {}",
                self.sun_cache_decimals
            )));
        }
        Ok(())
    }
}
