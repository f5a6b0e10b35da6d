//! Tunable parameters for energy and movement mechanics.
//!
//! The defaults are the canonical rule set; the struct exists so that
//! tests and experiments can bend single knobs without touching the
//! decision logic.

use serde::{Deserialize, Serialize};

/// Configurable energy and movement parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConfig {
    /// Energy consumed by every attempted step outside a safe zone,
    /// whether or not the step lands.
    pub step_cost: i32,

    /// Energy restored per turn while resting inside the agent's own
    /// safe zone, capped at the agent's maximum.
    pub safe_zone_heal: i32,

    /// Percentage of maximum energy below which the agent abandons its
    /// species pattern and homes toward its safe zone (default: 20).
    pub critical_pct: i32,

    /// Minimum steps sampled for a multi-step pattern (inclusive).
    pub multi_step_min: u32,

    /// Maximum steps sampled for a multi-step pattern (inclusive).
    pub multi_step_max: u32,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            step_cost: 2,
            safe_zone_heal: 5,
            critical_pct: 20,
            multi_step_min: 1,
            multi_step_max: 3,
        }
    }
}
