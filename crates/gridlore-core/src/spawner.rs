//! Starting-grid construction.
//!
//! Builds the world a run begins with: one square safe zone per alliance
//! in opposite corners, one knowledge archive per species parked on the
//! outer edge of its alliance's zone, scattered obstacles, and the agent
//! population on random free cells with their seed knowledge.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use gridlore_agents::{AgentError, new_agent};
use gridlore_types::{
    AgentId, AgentState, Alliance, Archive, ArchiveId, Message, Position, Species,
};
use gridlore_world::{Grid, SafeZone, WorldError};

use crate::config::SimConfig;

/// Errors that can occur while building the starting grid.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    /// A placement failed underneath the spawner.
    #[error("world error during spawn: {0}")]
    World(#[from] WorldError),

    /// An agent could not be constructed.
    #[error("agent error during spawn: {0}")]
    Agent(#[from] AgentError),

    /// The grid has fewer free cells than the population needs.
    #[error("not enough free cells: need {needed}, have {available}")]
    InsufficientSpace {
        /// Cells the configuration asks for.
        needed: usize,
        /// Free cells actually available.
        available: usize,
    },
}

/// Everything [`build_world`] produces.
#[derive(Debug)]
pub struct SpawnResult {
    /// The populated grid.
    pub grid: Grid,
    /// All living agents, keyed by ID.
    pub agents: BTreeMap<AgentId, AgentState>,
    /// Agent IDs in spawn order; the tick cycle takes turns in this order.
    pub roster: Vec<AgentId>,
    /// All archives, keyed by ID.
    pub archives: BTreeMap<ArchiveId, Archive>,
}

/// Build the starting grid described by `config`.
///
/// # Errors
///
/// Returns [`SpawnError`] if the configuration cannot be realized --
/// zones that do not fit, or a population larger than the free area.
pub fn build_world(config: &SimConfig, rng: &mut impl Rng) -> Result<SpawnResult, SpawnError> {
    let mut grid = Grid::new(config.width, config.height)?;

    // Corner safe zones: horde top-left, covenant bottom-right.
    let extent = config.zone_extent;
    let horde_zone = SafeZone::new(
        Alliance::Horde,
        Position::new(0, 0),
        Position::new(extent.saturating_sub(1), extent.saturating_sub(1)),
    );
    let covenant_zone = SafeZone::new(
        Alliance::Covenant,
        Position::new(config.width.saturating_sub(extent), config.height.saturating_sub(extent)),
        Position::new(config.width.saturating_sub(1), config.height.saturating_sub(1)),
    );
    grid.add_zone(horde_zone)?;
    grid.add_zone(covenant_zone)?;

    // One archive per species, parked on the outer edge of its zone.
    let mut archives = BTreeMap::new();
    for (species, position) in archive_sites(config) {
        let archive = Archive::new(ArchiveId::new(), species, position);
        grid.place_archive(archive.id, position)?;
        archives.insert(archive.id, archive);
    }

    // Everything else lands on random free neutral cells.
    let per_species = usize::try_from(config.agents_per_species).unwrap_or(usize::MAX);
    let obstacle_count = usize::try_from(config.obstacles).unwrap_or(usize::MAX);
    let agent_total = Species::ALL.len().saturating_mul(per_species);
    let needed = obstacle_count.saturating_add(agent_total);
    let free = free_neutral_cells(&grid);
    if free.len() < needed {
        return Err(SpawnError::InsufficientSpace {
            needed,
            available: free.len(),
        });
    }
    let mut sites = free.as_slice().choose_multiple(rng, needed).copied();

    for _ in 0..config.obstacles {
        if let Some(position) = sites.next() {
            grid.place_obstacle(position)?;
        }
    }

    let mut agents = BTreeMap::new();
    let mut roster = Vec::new();
    for species in Species::ALL {
        for _ in 0..config.agents_per_species {
            let Some(position) = sites.next() else { break };
            let mut agent = new_agent(species, position, config.max_energy, rng)?;
            for index in 0..config.seed_messages_per_agent {
                agent
                    .knowledge
                    .push(Message::new(format!("{}-lore-{index:02}", agent.name)));
            }
            grid.place_agent(agent.id, position)?;
            roster.push(agent.id);
            agents.insert(agent.id, agent);
        }
    }

    info!(
        agents = agents.len(),
        archives = archives.len(),
        obstacles = config.obstacles,
        "starting grid built"
    );

    Ok(SpawnResult {
        grid,
        agents,
        roster,
        archives,
    })
}

/// The fixed archive sites: one per species, adjacent to the outer edge
/// of its alliance's corner zone.
fn archive_sites(config: &SimConfig) -> [(Species, Position); 4] {
    let extent = config.zone_extent;
    let right = config.width.saturating_sub(1);
    let bottom = config.height.saturating_sub(1);
    [
        // Horde zone sits at the top-left corner.
        (Species::Ogre, Position::new(extent, 0)),
        (Species::Wraith, Position::new(0, extent)),
        // Covenant zone sits at the bottom-right corner.
        (Species::Archon, Position::new(right.saturating_sub(extent), bottom)),
        (Species::Ranger, Position::new(right, bottom.saturating_sub(extent))),
    ]
}

/// All empty cells outside every safe zone.
fn free_neutral_cells(grid: &Grid) -> Vec<Position> {
    let mut free = Vec::new();
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let pos = Position::new(x, y);
            let in_any_zone = grid.zones().iter().any(|z| z.contains(pos));
            if grid.cell(pos).is_empty() && !in_any_zone {
                free.push(pos);
            }
        }
    }
    free
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use gridlore_types::CellContent;

    use super::*;

    #[test]
    fn builds_the_configured_population() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let world = build_world(&config, &mut rng).unwrap();

        assert_eq!(world.agents.len(), 12); // 4 species x 3
        assert_eq!(world.archives.len(), 4);
        assert_eq!(world.grid.agent_count(), 12);
    }

    #[test]
    fn every_agent_carries_seed_knowledge() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let world = build_world(&config, &mut rng).unwrap();

        for agent in world.agents.values() {
            assert_eq!(agent.knowledge.len(), 5);
            assert_eq!(agent.energy, config.max_energy);
        }
    }

    #[test]
    fn agent_positions_match_the_grid() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let world = build_world(&config, &mut rng).unwrap();

        for agent in world.agents.values() {
            assert_eq!(world.grid.agent_position(agent.id), Some(agent.position));
            assert_eq!(world.grid.cell(agent.position), CellContent::Agent(agent.id));
        }
        for archive in world.archives.values() {
            assert_eq!(
                world.grid.cell(archive.position),
                CellContent::Archive(archive.id)
            );
        }
    }

    #[test]
    fn agents_spawn_on_neutral_ground() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let world = build_world(&config, &mut rng).unwrap();

        for agent in world.agents.values() {
            assert!(
                !world
                    .grid
                    .zones()
                    .iter()
                    .any(|z| z.contains(agent.position))
            );
        }
    }

    #[test]
    fn each_species_gets_its_own_archive() {
        let config = SimConfig::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let world = build_world(&config, &mut rng).unwrap();

        let mut species: Vec<Species> = world.archives.values().map(|a| a.species).collect();
        species.sort();
        species.dedup();
        assert_eq!(species.len(), 4);
    }

    #[test]
    fn overcrowded_config_is_rejected() {
        let config = SimConfig {
            width: 8,
            height: 8,
            agents_per_species: 20,
            ..SimConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        assert!(matches!(
            build_world(&config, &mut rng),
            Err(SpawnError::InsufficientSpace { .. })
        ));
    }
}
