//! Agent construction.
//!
//! Agents enter the simulation exactly once, at full energy, with a name
//! derived from their species and a short ID suffix so narration lines
//! stay readable.

use chrono::Utc;
use rand::Rng;
use rand::seq::IndexedRandom;

use gridlore_types::{AgentId, AgentState, Direction, Position, Species};

use crate::error::AgentError;

/// Create a fresh agent at full energy.
///
/// The initial heading is sampled at random; it is informational and has
/// no behavioral effect, but starting every agent facing north would
/// misreport the first few narration lines.
///
/// # Errors
///
/// Returns [`AgentError::InvalidMaxEnergy`] if `max_energy` is not
/// positive -- a configuration defect, surfaced fast.
pub fn new_agent(
    species: Species,
    position: Position,
    max_energy: i32,
    rng: &mut impl Rng,
) -> Result<AgentState, AgentError> {
    if max_energy <= 0 {
        return Err(AgentError::InvalidMaxEnergy(max_energy));
    }

    let id = AgentId::new();
    let heading = Direction::ALL
        .as_slice()
        .choose(rng)
        .copied()
        .unwrap_or(Direction::North);

    Ok(AgentState {
        id,
        name: agent_name(species, id),
        species,
        position,
        energy: max_energy,
        max_energy,
        last_heading: heading,
        knowledge: Vec::new(),
        spawned_at: Utc::now(),
    })
}

/// Build the display name `<species>-<short id>` for narration.
fn agent_name(species: Species, id: AgentId) -> String {
    let hex = id.into_inner().simple().to_string();
    let short: String = hex.chars().take(4).collect();
    format!("{species}-{short}")
}
