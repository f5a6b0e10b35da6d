//! Simulation binary for Gridlore.
//!
//! Wires together the configuration, the starting grid, and the tick
//! runner, and narrates the event stream to the console. This is the
//! only place in the workspace that prints.
//!
//! # Startup sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration (first CLI argument, `gridlore.yaml`, or defaults)
//! 3. Seed the run RNG from the configured seed
//! 4. Build the starting grid and population
//! 5. Run the simulation loop, narrating every event
//! 6. Log the final report

mod narrate;

use std::path::Path;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridlore_core::clock::WorldClock;
use gridlore_core::config::SimConfig;
use gridlore_core::runner::run_simulation;
use gridlore_core::spawner::build_world;
use gridlore_core::tick::SimulationState;

/// Default configuration file consulted when no path is given.
const DEFAULT_CONFIG_PATH: &str = "gridlore.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration loading, world construction, or the
/// simulation itself fails.
fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("gridlore starting");

    // 2. Load configuration.
    let config = load_config().context("loading configuration")?;
    info!(
        width = config.width,
        height = config.height,
        agents_per_species = config.agents_per_species,
        ticks = config.ticks,
        seed = config.seed,
        "configuration loaded"
    );

    // 3. Seed the run RNG. One seeded generator drives spawn placement
    // and every in-run sample, so a run is reproducible from the config.
    let mut rng = SmallRng::seed_from_u64(config.seed);

    // 4. Build the starting grid and population.
    let world = build_world(&config, &mut rng).context("building the starting grid")?;
    info!(
        agents = world.agents.len(),
        archives = world.archives.len(),
        "starting grid built"
    );

    let mut state = SimulationState {
        clock: WorldClock::new(),
        grid: world.grid,
        agents: world.agents,
        roster: world.roster,
        archives: world.archives,
        energy_config: config.energy.clone(),
    };

    // 5. Run, narrating every event as it happens.
    let report = run_simulation(&mut state, config.ticks, &mut rng, |summary| {
        for event in &summary.events {
            println!("[tick {:>4}] {}", summary.tick, narrate::narrate(event));
        }
    })
    .context("running the simulation")?;

    // 6. Log the final report.
    info!(
        ticks_run = report.ticks_run,
        survivors = report.survivors,
        total_deaths = report.total_deaths,
        events = report.events.len(),
        "simulation finished"
    );
    for (archive_id, tally) in &report.archive_tallies {
        info!(archive = %archive_id, messages = *tally, "archive tally");
    }

    Ok(())
}

/// Resolve the configuration: explicit path argument, then the default
/// file if present, then built-in defaults.
fn load_config() -> anyhow::Result<SimConfig> {
    if let Some(path) = std::env::args().nth(1) {
        return SimConfig::from_file(&path).with_context(|| format!("reading {path}"));
    }
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        return SimConfig::from_file(DEFAULT_CONFIG_PATH)
            .with_context(|| format!("reading {DEFAULT_CONFIG_PATH}"));
    }
    Ok(SimConfig::default())
}
