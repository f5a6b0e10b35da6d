//! The multi-tick loop.
//!
//! Runs ticks until the configured budget is exhausted or the grid has
//! no living agents left, handing each [`TickSummary`] to a caller
//! callback (the engine narrates from it) and accumulating a final
//! [`SimReport`].

use std::collections::BTreeMap;

use rand::Rng;
use tracing::info;

use gridlore_types::{ArchiveId, SimEvent};

use crate::tick::{SimulationState, TickError, TickSummary, run_tick};

/// Final accounting for a completed run.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// Ticks actually executed (may stop short of the budget if the
    /// grid empties).
    pub ticks_run: u64,
    /// Agents still alive at the end.
    pub survivors: usize,
    /// Agents removed over the whole run.
    pub total_deaths: usize,
    /// Every event emitted over the whole run, in order.
    pub events: Vec<SimEvent>,
    /// Messages accumulated per archive by the end of the run.
    pub archive_tallies: BTreeMap<ArchiveId, usize>,
}

/// Run up to `max_ticks` ticks, invoking `on_tick` after each one.
///
/// # Errors
///
/// Propagates the first [`TickError`] encountered.
pub fn run_simulation(
    state: &mut SimulationState,
    max_ticks: u64,
    rng: &mut impl Rng,
    mut on_tick: impl FnMut(&TickSummary),
) -> Result<SimReport, TickError> {
    let mut ticks_run = 0_u64;
    let mut total_deaths = 0_usize;
    let mut events = Vec::new();

    for _ in 0..max_ticks {
        if state.agents.is_empty() {
            info!(ticks_run, "grid is empty, stopping early");
            break;
        }
        let mut summary = run_tick(state, rng)?;
        ticks_run = summary.tick;
        total_deaths = total_deaths.saturating_add(summary.deaths.len());
        on_tick(&summary);
        events.append(&mut summary.events);
    }

    let archive_tallies = state
        .archives
        .iter()
        .map(|(id, archive)| (*id, archive.knowledge.len()))
        .collect();

    info!(
        ticks_run,
        survivors = state.agents.len(),
        total_deaths,
        "run complete"
    );

    Ok(SimReport {
        ticks_run,
        survivors: state.agents.len(),
        total_deaths,
        events,
        archive_tallies,
    })
}
