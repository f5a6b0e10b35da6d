//! The per-tick entry point: one agent's complete turn.
//!
//! A turn runs to completion before the next agent acts (the scheduler in
//! `gridlore-core` enforces this): death-on-entry check, heal or move,
//! interaction if the move collided, archive scan, death-by-drain check.
//!
//! The two death paths differ observably and deliberately: an agent that
//! *entered* its turn depleted is removed with its knowledge intact,
//! while an agent drained *during* its turn has its knowledge cleared
//! first. Inherited behavior, kept as-is.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use gridlore_types::{
    AgentId, AgentState, Archive, ArchiveId, CellContent, DeathCause, Direction, SimEvent,
};
use gridlore_world::Grid;

use crate::config::EnergyConfig;
use crate::error::AgentError;
use crate::interaction;
use crate::movement;

// ---------------------------------------------------------------------------
// TurnContext
// ---------------------------------------------------------------------------

/// Everything a turn needs to read and mutate.
///
/// Assembled by the tick cycle; one context serves all agents of a tick.
#[derive(Debug)]
pub struct TurnContext<'a> {
    /// The occupancy grid.
    pub grid: &'a mut Grid,
    /// All living agents' states, keyed by ID.
    pub agents: &'a mut BTreeMap<AgentId, AgentState>,
    /// All archives, keyed by ID.
    pub archives: &'a mut BTreeMap<ArchiveId, Archive>,
    /// Energy and movement parameters.
    pub config: &'a EnergyConfig,
    /// The current tick, stamped onto every emitted event.
    pub tick: u64,
    /// The event sink for this tick.
    pub events: &'a mut Vec<SimEvent>,
}

// ---------------------------------------------------------------------------
// TurnOutcome
// ---------------------------------------------------------------------------

/// The final state of an agent removed from the grid this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathReport {
    /// Which death path fired.
    pub cause: DeathCause,
    /// The agent's state at removal. Knowledge is intact for
    /// [`DeathCause::Exhausted`], cleared for [`DeathCause::Collapsed`].
    pub remains: AgentState,
}

/// Result of one agent's turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Present if the agent was removed from the grid this turn.
    pub death: Option<DeathReport>,
}

impl TurnOutcome {
    /// The agent survived the turn.
    const fn alive() -> Self {
        Self { death: None }
    }

    /// The agent was removed this turn.
    const fn died(cause: DeathCause, remains: AgentState) -> Self {
        Self {
            death: Some(DeathReport { cause, remains }),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run one complete turn for the agent with the given ID.
///
/// # Errors
///
/// Returns [`AgentError::UnknownAgent`] if the ID has no state in the
/// roster, or [`AgentError::World`] if the grid's bookkeeping fails
/// underneath a validated operation.
pub fn take_turn(
    id: AgentId,
    ctx: &mut TurnContext<'_>,
    rng: &mut impl Rng,
) -> Result<TurnOutcome, AgentError> {
    let mut actor = ctx.agents.remove(&id).ok_or(AgentError::UnknownAgent(id))?;

    // An agent that entered its turn already depleted is collected
    // immediately: no movement, no archive scan, knowledge kept.
    if actor.is_depleted() {
        debug!(agent = %actor.name, "entered turn depleted");
        ctx.grid.remove_agent(id)?;
        ctx.events.push(SimEvent::AgentDied {
            tick: ctx.tick,
            agent: actor.actor_ref(),
            cause: DeathCause::Exhausted,
        });
        return Ok(TurnOutcome::died(DeathCause::Exhausted, actor));
    }

    // Heal at home, otherwise move.
    if ctx
        .grid
        .in_alliance_zone(actor.position, actor.species.alliance())
    {
        heal(&mut actor, ctx);
    } else {
        let report = movement::resolve_movement(&mut actor, ctx.grid, ctx.config, rng)?;
        if let Some(other_id) = report.engaged {
            let target = ctx
                .agents
                .get_mut(&other_id)
                .ok_or(AgentError::UnknownAgent(other_id))?;
            interaction::run_interaction(&mut actor, target, ctx.tick, ctx.events, rng);
        }
    }

    // The archive scan runs whether or not this turn's consumption has
    // already drained the agent; a dying courier still delivers.
    scan_for_archives(&mut actor, ctx);

    if actor.is_depleted() {
        actor.knowledge.clear();
        ctx.grid.remove_agent(id)?;
        ctx.events.push(SimEvent::AgentDied {
            tick: ctx.tick,
            agent: actor.actor_ref(),
            cause: DeathCause::Collapsed,
        });
        return Ok(TurnOutcome::died(DeathCause::Collapsed, actor));
    }

    ctx.agents.insert(id, actor);
    Ok(TurnOutcome::alive())
}

// ---------------------------------------------------------------------------
// Turn phases
// ---------------------------------------------------------------------------

/// Restore energy inside the agent's own safe zone, capped at maximum.
/// No movement happens on a healing turn.
fn heal(actor: &mut AgentState, ctx: &mut TurnContext<'_>) {
    let healed = actor
        .energy
        .saturating_add(ctx.config.safe_zone_heal)
        .min(actor.max_energy)
        .saturating_sub(actor.energy);
    if healed > 0 {
        actor.energy = actor.energy.saturating_add(healed);
        ctx.events.push(SimEvent::AgentHealed {
            tick: ctx.tick,
            agent: actor.actor_ref(),
            amount: healed,
        });
    }
}

/// Synchronize with every same-species archive in the 8 neighboring
/// cells. Each qualifying neighbor triggers an independent merge.
fn scan_for_archives(actor: &mut AgentState, ctx: &mut TurnContext<'_>) {
    for direction in Direction::ALL {
        let neighbor = actor.position.step(direction);
        if let CellContent::Archive(archive_id) = ctx.grid.cell(neighbor)
            && let Some(archive) = ctx.archives.get_mut(&archive_id)
            && archive.species == actor.species
        {
            interaction::sync_with_archive(actor, archive, ctx.tick, ctx.events);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
