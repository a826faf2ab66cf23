//! Layered analysis configuration.
//!
//! Defaults are overridden by a TOML file, which is overridden by
//! environment variables, which are overridden by values the surrounding
//! application supplies from its form controls. Each value remembers where
//! it came from so a host application can display the effective setup.

use crate::error::{Result, ValgridError};
use crate::models::DecayMode;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Where a configuration value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Built-in default
    Default,
    /// Loaded from a TOML file
    File,
    /// Loaded from an environment variable
    Environment,
    /// Supplied by the host application
    Application,
}

impl ConfigSource {
    /// Precedence level (higher wins).
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Application => 3,
        }
    }
}

/// A configuration value tagged with its source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Replace the value if the new source has higher precedence.
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Tunable parameters for one gradient analysis.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Grid cell side, meters.
    pub cell_size_m: ConfigValue<f64>,
    /// Outward boundary growth applied before the road fetch, meters.
    pub buffer_radius_m: ConfigValue<f64>,
    pub decay_mode: ConfigValue<DecayMode>,
    /// Decay constant for the exponential mode, 1/meters.
    pub decay_k: ConfigValue<f64>,
    /// Optional fixed normalization distance for the linear mode, meters.
    pub max_distance_m: ConfigValue<Option<f64>>,
}

impl AnalysisConfig {
    /// Configuration with built-in defaults.
    pub fn with_defaults() -> Self {
        Self {
            cell_size_m: ConfigValue::new(100.0, ConfigSource::Default),
            buffer_radius_m: ConfigValue::new(500.0, ConfigSource::Default),
            decay_mode: ConfigValue::new(DecayMode::Linear, ConfigSource::Default),
            decay_k: ConfigValue::new(0.001, ConfigSource::Default),
            max_distance_m: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load overrides from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ValgridError::ConfigInvalid {
            key: "file".to_string(),
            reason: format!("Failed to read config file: {}", e),
        })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| ValgridError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(cell_size_m) = file_config.cell_size_m {
            self.cell_size_m.update(cell_size_m, ConfigSource::File);
        }
        if let Some(buffer_radius_m) = file_config.buffer_radius_m {
            self.buffer_radius_m.update(buffer_radius_m, ConfigSource::File);
        }
        if let Some(decay_mode) = file_config.decay_mode {
            self.decay_mode.update(decay_mode, ConfigSource::File);
        }
        if let Some(decay_k) = file_config.decay_k {
            self.decay_k.update(decay_k, ConfigSource::File);
        }
        if let Some(max_distance_m) = file_config.max_distance_m {
            self.max_distance_m.update(Some(max_distance_m), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load overrides from environment variables.
    pub fn load_from_env(mut self) -> Self {
        if let Ok(raw) = env::var("VALGRID_CELL_SIZE_M") {
            match raw.parse::<f64>() {
                Ok(cell_size_m) => self.cell_size_m.update(cell_size_m, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid VALGRID_CELL_SIZE_M value '{}': expected a number of meters",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("VALGRID_BUFFER_RADIUS_M") {
            match raw.parse::<f64>() {
                Ok(radius_m) => self.buffer_radius_m.update(radius_m, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid VALGRID_BUFFER_RADIUS_M value '{}': expected a number of meters",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("VALGRID_DECAY_MODE") {
            match parse_decay_mode(&raw) {
                Ok(mode) => self.decay_mode.update(mode, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid VALGRID_DECAY_MODE value '{}': expected linear or exponential",
                    raw
                ),
            }
        }

        if let Ok(raw) = env::var("VALGRID_DECAY_K") {
            match raw.parse::<f64>() {
                Ok(decay_k) => self.decay_k.update(decay_k, ConfigSource::Environment),
                Err(_) => {
                    tracing::warn!("Invalid VALGRID_DECAY_K value '{}': expected a number", raw)
                }
            }
        }

        self
    }

    /// Apply values supplied by the host application.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(cell_size_m) = overrides.cell_size_m {
            self.cell_size_m.update(cell_size_m, ConfigSource::Application);
        }
        if let Some(buffer_radius_m) = overrides.buffer_radius_m {
            self.buffer_radius_m.update(buffer_radius_m, ConfigSource::Application);
        }
        if let Some(decay_mode) = overrides.decay_mode {
            self.decay_mode.update(decay_mode, ConfigSource::Application);
        }
        if let Some(decay_k) = overrides.decay_k {
            self.decay_k.update(decay_k, ConfigSource::Application);
        }
        if let Some(max_distance_m) = overrides.max_distance_m {
            self.max_distance_m.update(Some(max_distance_m), ConfigSource::Application);
        }
    }

    /// Reject values the pipeline cannot work with before any stage runs.
    pub fn validate(&self) -> Result<()> {
        let cell_size_m = self.cell_size_m.value;
        if !cell_size_m.is_finite() || cell_size_m <= 0.0 {
            return Err(ValgridError::ConfigInvalid {
                key: "cell_size_m".to_string(),
                reason: format!("must be a positive number of meters, got {}", cell_size_m),
            });
        }

        let buffer_radius_m = self.buffer_radius_m.value;
        if !buffer_radius_m.is_finite() || buffer_radius_m < 0.0 {
            return Err(ValgridError::ConfigInvalid {
                key: "buffer_radius_m".to_string(),
                reason: format!("must be a non-negative number of meters, got {}", buffer_radius_m),
            });
        }

        if !self.decay_k.value.is_finite() {
            return Err(ValgridError::ConfigInvalid {
                key: "decay_k".to_string(),
                reason: format!("must be finite, got {}", self.decay_k.value),
            });
        }

        if let Some(max_distance_m) = self.max_distance_m.value {
            if !max_distance_m.is_finite() || max_distance_m <= 0.0 {
                return Err(ValgridError::ConfigInvalid {
                    key: "max_distance_m".to_string(),
                    reason: format!(
                        "must be a positive number of meters when set, got {}",
                        max_distance_m
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Configuration loaded from a TOML file.
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    cell_size_m: Option<f64>,
    buffer_radius_m: Option<f64>,
    decay_mode: Option<DecayMode>,
    decay_k: Option<f64>,
    max_distance_m: Option<f64>,
}

/// Values supplied by the host application's controls.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub cell_size_m: Option<f64>,
    pub buffer_radius_m: Option<f64>,
    pub decay_mode: Option<DecayMode>,
    pub decay_k: Option<f64>,
    pub max_distance_m: Option<f64>,
}

/// Parse a decay mode from a string.
pub fn parse_decay_mode(s: &str) -> Result<DecayMode> {
    match s.to_lowercase().as_str() {
        "linear" | "lin" => Ok(DecayMode::Linear),
        "exponential" | "exp" => Ok(DecayMode::Exponential),
        _ => Err(ValgridError::ConfigInvalid {
            key: "decay_mode".to_string(),
            reason: format!("Invalid decay mode: {}. Use linear or exponential", s),
        }),
    }
}
