//! The occupancy grid: the single source of truth for where entities live.
//!
//! Internally the grid keeps a sparse occupancy map
//! (`BTreeMap<Position, CellContent>`; absent cells are empty) plus
//! per-entity position indexes so that agent and archive lookups do not
//! scan cells. Every mutation entry point keeps the map and the indexes
//! consistent; callers never write either directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use gridlore_types::{AgentId, Alliance, ArchiveId, CellContent, Direction, Position, Species};

use crate::error::WorldError;
use crate::zone::SafeZone;

/// The bounded occupancy grid with its safe-zone geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    /// Number of columns.
    width: i32,
    /// Number of rows.
    height: i32,
    /// Sparse occupancy: cells absent from the map are empty.
    cells: BTreeMap<Position, CellContent>,
    /// Position index for living agents.
    agent_cells: BTreeMap<AgentId, Position>,
    /// Position index for archives.
    archive_cells: BTreeMap<ArchiveId, Position>,
    /// All declared safe zones.
    zones: Vec<SafeZone>,
}

impl Grid {
    /// Create an empty grid with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] unless both dimensions
    /// are positive.
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: BTreeMap::new(),
            agent_cells: BTreeMap::new(),
            archive_cells: BTreeMap::new(),
            zones: Vec::new(),
        })
    }

    /// Grid width (columns).
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height (rows).
    pub const fn height(&self) -> i32 {
        self.height
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Whether a position lies inside the grid bounds.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// What occupies the cell at `pos`. Out-of-bounds cells read as empty;
    /// callers validate bounds with [`Self::contains`] first.
    pub fn cell(&self, pos: Position) -> CellContent {
        self.cells.get(&pos).copied().unwrap_or(CellContent::Empty)
    }

    /// Whether `pos` lies inside a safe zone restricted against `species`
    /// (a zone belonging to the other alliance).
    pub fn restricted_for(&self, pos: Position, species: Species) -> bool {
        self.zones
            .iter()
            .any(|z| z.alliance != species.alliance() && z.contains(pos))
    }

    /// Whether `pos` lies inside a zone belonging to `alliance`.
    pub fn in_alliance_zone(&self, pos: Position, alliance: Alliance) -> bool {
        self.zones
            .iter()
            .any(|z| z.alliance == alliance && z.contains(pos))
    }

    /// The current position of a living agent, if it is on the grid.
    pub fn agent_position(&self, id: AgentId) -> Option<Position> {
        self.agent_cells.get(&id).copied()
    }

    /// The position of an archive, if it is on the grid.
    pub fn archive_position(&self, id: ArchiveId) -> Option<Position> {
        self.archive_cells.get(&id).copied()
    }

    /// Number of living agents currently placed.
    pub fn agent_count(&self) -> usize {
        self.agent_cells.len()
    }

    /// The single step that moves `pos` toward the nearest cell of any
    /// zone belonging to `alliance`.
    ///
    /// Returns `None` when no such zone exists, or when `pos` already
    /// lies inside one (the turn logic heals there instead of homing).
    pub fn direction_toward_zone(&self, pos: Position, alliance: Alliance) -> Option<Direction> {
        let nearest = self
            .zones
            .iter()
            .filter(|z| z.alliance == alliance)
            .map(|z| z.nearest_cell(pos))
            .min_by_key(|cell| pos.chebyshev_distance(*cell))?;
        Direction::from_deltas(
            nearest.x.saturating_sub(pos.x),
            nearest.y.saturating_sub(pos.y),
        )
    }

    /// All declared safe zones.
    pub fn zones(&self) -> &[SafeZone] {
        &self.zones
    }

    // -------------------------------------------------------------------
    // Mutation entry points
    // -------------------------------------------------------------------

    /// Declare a safe zone.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidZone`] if the bounds are inverted or
    /// extend past the grid edge.
    pub fn add_zone(&mut self, zone: SafeZone) -> Result<(), WorldError> {
        if !zone.is_well_formed() {
            return Err(WorldError::InvalidZone {
                alliance: zone.alliance,
                reason: String::from("min corner exceeds max corner"),
            });
        }
        if !self.contains(zone.min) || !self.contains(zone.max) {
            return Err(WorldError::InvalidZone {
                alliance: zone.alliance,
                reason: String::from("zone extends past the grid edge"),
            });
        }
        self.zones.push(zone);
        Ok(())
    }

    /// Place a living agent on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::CellOccupied`].
    pub fn place_agent(&mut self, id: AgentId, pos: Position) -> Result<(), WorldError> {
        self.claim_cell(pos, CellContent::Agent(id))?;
        self.agent_cells.insert(id, pos);
        Ok(())
    }

    /// Place an archive on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::CellOccupied`].
    pub fn place_archive(&mut self, id: ArchiveId, pos: Position) -> Result<(), WorldError> {
        self.claim_cell(pos, CellContent::Archive(id))?;
        self.archive_cells.insert(id, pos);
        Ok(())
    }

    /// Place a static obstacle on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::CellOccupied`].
    pub fn place_obstacle(&mut self, pos: Position) -> Result<(), WorldError> {
        self.claim_cell(pos, CellContent::Obstacle)
    }

    /// Move a living agent to an empty cell.
    ///
    /// The caller updates the agent's own position cache in the same
    /// breath; the two records must never diverge.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotFound`], [`WorldError::OutOfBounds`],
    /// or [`WorldError::CellOccupied`].
    pub fn move_agent(&mut self, id: AgentId, to: Position) -> Result<(), WorldError> {
        let from = self
            .agent_cells
            .get(&id)
            .copied()
            .ok_or(WorldError::AgentNotFound(id))?;
        self.claim_cell(to, CellContent::Agent(id))?;
        self.cells.remove(&from);
        self.agent_cells.insert(id, to);
        debug!(agent = %id, %from, %to, "agent moved");
        Ok(())
    }

    /// Remove a dead agent; its cell becomes a static obstacle.
    ///
    /// Returns the position the body was left at.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotFound`] if the agent is not placed.
    pub fn remove_agent(&mut self, id: AgentId) -> Result<Position, WorldError> {
        let pos = self
            .agent_cells
            .remove(&id)
            .ok_or(WorldError::AgentNotFound(id))?;
        self.cells.insert(pos, CellContent::Obstacle);
        debug!(agent = %id, %pos, "agent removed, cell is now an obstacle");
        Ok(pos)
    }

    /// Claim an empty in-bounds cell for `content`.
    fn claim_cell(&mut self, pos: Position, content: CellContent) -> Result<(), WorldError> {
        if !self.contains(pos) {
            return Err(WorldError::OutOfBounds(pos));
        }
        if !self.cell(pos).is_empty() {
            return Err(WorldError::CellOccupied(pos));
        }
        self.cells.insert(pos, content);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(10, 8).unwrap()
    }

    // -----------------------------------------------------------------------
    // Construction and bounds
    // -----------------------------------------------------------------------

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(Grid::new(0, 5).is_err());
        assert!(Grid::new(5, -1).is_err());
    }

    #[test]
    fn contains_is_exclusive_of_the_far_edge() {
        let g = grid();
        assert!(g.contains(Position::new(0, 0)));
        assert!(g.contains(Position::new(9, 7)));
        assert!(!g.contains(Position::new(10, 7)));
        assert!(!g.contains(Position::new(3, 8)));
        assert!(!g.contains(Position::new(-1, 0)));
    }

    #[test]
    fn unplaced_cells_read_empty() {
        let g = grid();
        assert_eq!(g.cell(Position::new(4, 4)), CellContent::Empty);
    }

    // -----------------------------------------------------------------------
    // Placement
    // -----------------------------------------------------------------------

    #[test]
    fn place_agent_fills_cell_and_index() {
        let mut g = grid();
        let id = AgentId::new();
        let pos = Position::new(2, 3);
        assert!(g.place_agent(id, pos).is_ok());
        assert_eq!(g.cell(pos), CellContent::Agent(id));
        assert_eq!(g.agent_position(id), Some(pos));
        assert_eq!(g.agent_count(), 1);
    }

    #[test]
    fn double_placement_is_rejected() {
        let mut g = grid();
        let pos = Position::new(2, 3);
        assert!(g.place_obstacle(pos).is_ok());
        assert!(matches!(
            g.place_agent(AgentId::new(), pos),
            Err(WorldError::CellOccupied(_))
        ));
    }

    #[test]
    fn out_of_bounds_placement_is_rejected() {
        let mut g = grid();
        assert!(matches!(
            g.place_archive(ArchiveId::new(), Position::new(99, 0)),
            Err(WorldError::OutOfBounds(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Movement and removal
    // -----------------------------------------------------------------------

    #[test]
    fn move_agent_vacates_the_old_cell() {
        let mut g = grid();
        let id = AgentId::new();
        let from = Position::new(1, 1);
        let to = Position::new(2, 1);
        assert!(g.place_agent(id, from).is_ok());
        assert!(g.move_agent(id, to).is_ok());
        assert_eq!(g.cell(from), CellContent::Empty);
        assert_eq!(g.cell(to), CellContent::Agent(id));
        assert_eq!(g.agent_position(id), Some(to));
    }

    #[test]
    fn move_into_occupied_cell_is_rejected() {
        let mut g = grid();
        let id = AgentId::new();
        assert!(g.place_agent(id, Position::new(1, 1)).is_ok());
        assert!(g.place_obstacle(Position::new(2, 2)).is_ok());
        assert!(g.move_agent(id, Position::new(2, 2)).is_err());
        // The failed move left the agent where it was.
        assert_eq!(g.agent_position(id), Some(Position::new(1, 1)));
    }

    #[test]
    fn move_unknown_agent_is_rejected() {
        let mut g = grid();
        assert!(matches!(
            g.move_agent(AgentId::new(), Position::new(1, 1)),
            Err(WorldError::AgentNotFound(_))
        ));
    }

    #[test]
    fn removed_agent_leaves_an_obstacle() {
        let mut g = grid();
        let id = AgentId::new();
        let pos = Position::new(4, 4);
        assert!(g.place_agent(id, pos).is_ok());
        assert_eq!(g.remove_agent(id).ok(), Some(pos));
        assert_eq!(g.cell(pos), CellContent::Obstacle);
        assert_eq!(g.agent_position(id), None);
        assert_eq!(g.agent_count(), 0);
    }

    // -----------------------------------------------------------------------
    // Safe zones
    // -----------------------------------------------------------------------

    fn grid_with_zones() -> Grid {
        let mut g = grid();
        let horde = SafeZone::new(Alliance::Horde, Position::new(0, 0), Position::new(1, 1));
        let covenant = SafeZone::new(Alliance::Covenant, Position::new(8, 6), Position::new(9, 7));
        assert!(g.add_zone(horde).is_ok());
        assert!(g.add_zone(covenant).is_ok());
        g
    }

    #[test]
    fn zone_past_edge_is_rejected() {
        let mut g = grid();
        let zone = SafeZone::new(Alliance::Horde, Position::new(8, 6), Position::new(12, 7));
        assert!(g.add_zone(zone).is_err());
    }

    #[test]
    fn restriction_applies_only_to_the_other_alliance() {
        let g = grid_with_zones();
        let in_horde_zone = Position::new(0, 1);
        // Ogre is Horde: its own zone does not restrict it.
        assert!(!g.restricted_for(in_horde_zone, Species::Ogre));
        // Ranger is Covenant: the horde zone is off-limits.
        assert!(g.restricted_for(in_horde_zone, Species::Ranger));
        // Neutral ground restricts nobody.
        assert!(!g.restricted_for(Position::new(5, 3), Species::Ranger));
    }

    #[test]
    fn in_alliance_zone_matches_geometry() {
        let g = grid_with_zones();
        assert!(g.in_alliance_zone(Position::new(1, 0), Alliance::Horde));
        assert!(!g.in_alliance_zone(Position::new(1, 0), Alliance::Covenant));
        assert!(!g.in_alliance_zone(Position::new(5, 5), Alliance::Horde));
    }

    #[test]
    fn homing_direction_reduces_distance() {
        let g = grid_with_zones();
        let pos = Position::new(5, 3);
        let dir = g.direction_toward_zone(pos, Alliance::Covenant);
        assert!(dir.is_some());
        if let Some(dir) = dir {
            let stepped = pos.step(dir);
            let before = pos.chebyshev_distance(Position::new(8, 6));
            let after = stepped.chebyshev_distance(Position::new(8, 6));
            assert!(after < before);
        }
    }

    #[test]
    fn homing_inside_own_zone_is_none() {
        let g = grid_with_zones();
        assert_eq!(
            g.direction_toward_zone(Position::new(0, 0), Alliance::Horde),
            None
        );
    }

    #[test]
    fn homing_without_zones_is_none() {
        let g = grid();
        assert_eq!(
            g.direction_toward_zone(Position::new(3, 3), Alliance::Horde),
            None
        );
    }
}
