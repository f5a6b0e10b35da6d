//! Simulation configuration and YAML loading.
//!
//! One small struct covers everything the driver can tune: grid shape,
//! population, energy budget, seed knowledge, and the RNG seed that makes
//! a run reproducible. Defaults describe a sensible small world; a YAML
//! file can override any subset of fields.

use serde::{Deserialize, Serialize};

use gridlore_agents::EnergyConfig;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`SimConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yml::Error),

    /// The configuration parsed but describes an impossible world.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong with the configuration.
        reason: String,
    },
}

/// Full simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Side length of each alliance's square safe zone, anchored in
    /// opposite corners of the grid.
    pub zone_extent: i32,
    /// Living agents spawned per species.
    pub agents_per_species: u32,
    /// Maximum (and starting) energy per agent.
    pub max_energy: i32,
    /// Seed messages granted to each agent at spawn.
    pub seed_messages_per_agent: u32,
    /// Static obstacles scattered outside the safe zones.
    pub obstacles: u32,
    /// Ticks to run before the simulation stops.
    pub ticks: u64,
    /// RNG seed; a run is reproducible given the same seed and config.
    pub seed: u64,
    /// Energy and movement parameters handed to the agent engine.
    pub energy: EnergyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
            zone_extent: 3,
            agents_per_species: 3,
            max_energy: 50,
            seed_messages_per_agent: 5,
            obstacles: 12,
            ticks: 200,
            seed: 42,
            energy: EnergyConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from YAML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed YAML or
    /// [`ConfigError::Invalid`] for an impossible world description.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, plus
    /// everything [`Self::from_yaml`] can return.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: String::from(path),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Check that the configuration describes a buildable world.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(invalid("grid dimensions must be positive"));
        }
        if self.max_energy <= 0 {
            return Err(invalid("max energy must be positive"));
        }
        if self.zone_extent <= 0 {
            return Err(invalid("zone extent must be positive"));
        }
        // The two corner zones must not touch, and the zone edges need a
        // free ring for archive placement.
        let doubled = self.zone_extent.saturating_mul(2).saturating_add(2);
        if doubled > self.width || doubled > self.height {
            return Err(invalid("safe zones do not fit the grid"));
        }
        if self.energy.multi_step_min == 0 || self.energy.multi_step_min > self.energy.multi_step_max
        {
            return Err(invalid("multi-step range must satisfy 1 <= min <= max"));
        }
        Ok(())
    }
}

/// Shorthand for an [`ConfigError::Invalid`] with a static reason.
fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: String::from(reason),
    }
}
