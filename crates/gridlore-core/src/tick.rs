//! The per-tick scheduler: every living agent's turn, strictly in
//! sequence.
//!
//! A tick snapshots the live roster, then runs each agent's complete
//! turn -- movement, interaction, archive scan, death check -- before the
//! next agent acts. Nothing here is concurrent, and nothing may be: the
//! protocol's feedback effects (resampling a just-received message, the
//! scan that runs on a dying agent) only reproduce under sequential
//! turns.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use gridlore_agents::{
    AgentError, DeathReport, EnergyConfig, TurnContext, take_turn,
};
use gridlore_types::{AgentId, AgentState, Archive, ArchiveId, SimEvent};
use gridlore_world::Grid;

use crate::clock::{ClockError, WorldClock};

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The clock could not advance.
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),

    /// An agent's turn failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent whose turn failed.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },
}

/// The mutable simulation state passed through the tick cycle.
#[derive(Debug)]
pub struct SimulationState {
    /// The world clock.
    pub clock: WorldClock,
    /// The occupancy grid.
    pub grid: Grid,
    /// All living agents' states.
    pub agents: BTreeMap<AgentId, AgentState>,
    /// Turn order: living agents in spawn order. Iterating the state map
    /// instead would order turns by random ID and ruin reproducibility.
    pub roster: Vec<AgentId>,
    /// All archives.
    pub archives: BTreeMap<ArchiveId, Archive>,
    /// Energy and movement parameters.
    pub energy_config: EnergyConfig,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Living agents at end of tick.
    pub agents_alive: usize,
    /// Agents removed during this tick.
    pub deaths: Vec<DeathReport>,
    /// Every event emitted during this tick, in turn order.
    pub events: Vec<SimEvent>,
}

/// Execute one complete tick of the simulation.
///
/// Agents act in roster order. An agent removed earlier in the same tick
/// is skipped, never resurrected.
///
/// # Errors
///
/// Returns [`TickError`] if the clock overflows or a turn fails on a
/// bookkeeping defect.
pub fn run_tick(
    state: &mut SimulationState,
    rng: &mut impl Rng,
) -> Result<TickSummary, TickError> {
    let tick = state.clock.advance()?;
    debug!(tick, agents = state.agents.len(), "tick start");

    let roster: Vec<AgentId> = state.roster.clone();
    let mut events = Vec::new();
    let mut deaths = Vec::new();

    for agent_id in roster {
        // Removed earlier this tick -- skip, never resurrect.
        if !state.agents.contains_key(&agent_id) {
            continue;
        }
        let mut ctx = TurnContext {
            grid: &mut state.grid,
            agents: &mut state.agents,
            archives: &mut state.archives,
            config: &state.energy_config,
            tick,
            events: &mut events,
        };
        let outcome = take_turn(agent_id, &mut ctx, rng).map_err(|source| TickError::Agent {
            agent_id,
            source,
        })?;
        if let Some(death) = outcome.death {
            deaths.push(death);
        }
    }

    state.roster.retain(|id| state.agents.contains_key(id));

    Ok(TickSummary {
        tick,
        agents_alive: state.agents.len(),
        deaths,
        events,
    })
}
