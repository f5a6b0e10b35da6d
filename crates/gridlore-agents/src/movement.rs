//! Movement resolution: pattern dispatch and the single-step attempt
//! machine.
//!
//! Each turn an agent either follows its species pattern (energy permitting)
//! or limps toward its safe zone. Both paths funnel into [`attempt_step`],
//! the one place that touches occupancy, charges energy, and records the
//! heading. Multi-step patterns halt at the first attempt that does not
//! land.
//!
//! Energy is charged *after* a successful relocation and *at the current
//! cell* for a failed one, so a step that lands inside the agent's own
//! safe zone is free and a step that leaves it is not.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::trace;

use gridlore_types::{AgentId, AgentState, CellContent, Direction};
use gridlore_world::Grid;

use crate::config::EnergyConfig;
use crate::error::AgentError;

// ---------------------------------------------------------------------------
// StepOutcome
// ---------------------------------------------------------------------------

/// What a single step attempt produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The agent relocated to the target cell.
    Advanced,
    /// The target was a wall, a foreign safe zone, an obstacle, or an
    /// archive; the agent stayed put.
    Blocked,
    /// The target held a living agent; the interaction protocol takes
    /// over and the agent stays put.
    Engaged(AgentId),
}

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// Summary of one turn's worth of step attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Steps that landed.
    pub steps_advanced: u32,
    /// Steps attempted (each one charged energy unless zone-exempt).
    pub steps_attempted: u32,
    /// The agent collided with, if the run ended in an engagement.
    pub engaged: Option<AgentId>,
}

impl RunReport {
    /// A report for a turn in which no step was attempted.
    pub const fn idle() -> Self {
        Self {
            steps_advanced: 0,
            steps_attempted: 0,
            engaged: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Attempt one step in `direction`.
///
/// Every attempt charges [`EnergyConfig::step_cost`] unless the agent is
/// standing in its own safe zone when the charge lands (checked at the
/// post-move cell for a step that lands, at the current cell otherwise).
/// All outcomes record the attempted direction as the agent's last
/// heading except an engagement, which leaves it untouched -- an
/// inherited asymmetry, kept as-is.
///
/// # Errors
///
/// Returns [`AgentError::World`] if the occupancy move fails underneath
/// the already-validated attempt (a bookkeeping defect, not a game state).
pub fn attempt_step(
    actor: &mut AgentState,
    grid: &mut Grid,
    config: &EnergyConfig,
    direction: Direction,
) -> Result<StepOutcome, AgentError> {
    let target = actor.position.step(direction);

    // Walls and foreign safe zones block before occupancy is even read.
    if !grid.contains(target) || grid.restricted_for(target, actor.species) {
        consume_step_energy(actor, grid, config);
        actor.last_heading = direction;
        return Ok(StepOutcome::Blocked);
    }

    match grid.cell(target) {
        CellContent::Empty => {
            grid.move_agent(actor.id, target)?;
            actor.position = target;
            consume_step_energy(actor, grid, config);
            actor.last_heading = direction;
            Ok(StepOutcome::Advanced)
        }
        CellContent::Obstacle | CellContent::Archive(_) => {
            consume_step_energy(actor, grid, config);
            actor.last_heading = direction;
            Ok(StepOutcome::Blocked)
        }
        CellContent::Agent(other) => {
            consume_step_energy(actor, grid, config);
            Ok(StepOutcome::Engaged(other))
        }
    }
}

/// Attempt up to `steps` single steps in one fixed direction, halting at
/// the first attempt that does not land.
///
/// # Errors
///
/// Propagates any [`AgentError::World`] from the underlying attempts.
pub fn attempt_run(
    actor: &mut AgentState,
    grid: &mut Grid,
    config: &EnergyConfig,
    direction: Direction,
    steps: u32,
) -> Result<RunReport, AgentError> {
    let mut report = RunReport::idle();
    for _ in 0..steps {
        report.steps_attempted = report.steps_attempted.saturating_add(1);
        match attempt_step(actor, grid, config, direction)? {
            StepOutcome::Advanced => {
                report.steps_advanced = report.steps_advanced.saturating_add(1);
            }
            StepOutcome::Blocked => break,
            StepOutcome::Engaged(other) => {
                report.engaged = Some(other);
                break;
            }
        }
    }
    Ok(report)
}

/// Resolve one turn of movement for an agent that is not resting.
///
/// At or above the critical energy ratio, the species pattern runs: one
/// direction from the pattern's pool, one step for adjacent movers and a
/// sampled 1-3 steps for the rest. Below the ratio the pattern is ignored
/// and the agent makes exactly one attempt toward the nearest own safe
/// zone; with no zone to home toward it stands still.
///
/// # Errors
///
/// Propagates any [`AgentError::World`] from the underlying attempts.
pub fn resolve_movement(
    actor: &mut AgentState,
    grid: &mut Grid,
    config: &EnergyConfig,
    rng: &mut impl Rng,
) -> Result<RunReport, AgentError> {
    if actor.below_energy_ratio(config.critical_pct) {
        let Some(direction) = grid.direction_toward_zone(actor.position, actor.species.alliance())
        else {
            return Ok(RunReport::idle());
        };
        trace!(agent = %actor.name, %direction, "critical energy, homing");
        return attempt_run(actor, grid, config, direction, 1);
    }

    let pattern = actor.species.pattern();
    let direction = pattern
        .direction_pool()
        .choose(rng)
        .copied()
        .unwrap_or(actor.last_heading);
    let steps = if pattern.is_multi_step() {
        rng.random_range(config.multi_step_min..=config.multi_step_max)
    } else {
        1
    };
    attempt_run(actor, grid, config, direction, steps)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Charge the step cost unless the agent currently stands in its own
/// alliance's safe zone. Re-checked at every attempt, not once per turn.
fn consume_step_energy(actor: &mut AgentState, grid: &Grid, config: &EnergyConfig) {
    if !grid.in_alliance_zone(actor.position, actor.species.alliance()) {
        actor.energy = actor.energy.saturating_sub(config.step_cost);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
