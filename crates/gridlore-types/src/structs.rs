//! Core entity structs: positions, messages, agents, and archives.
//!
//! These are plain data carriers. The behavior that mutates them lives in
//! `gridlore-agents` (turn logic) and `gridlore-world` (placement); this
//! crate only defines the shapes they share.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::events::ActorRef;
use crate::ids::{AgentId, ArchiveId};
use crate::species::Species;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// An integer coordinate on the grid.
///
/// The origin is the top-left corner; `x` grows east and `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing east.
    pub x: i32,
    /// Row, growing south.
    pub y: i32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the position one step away in the given direction.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Chebyshev (king-move) distance to another position.
    pub const fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = self.x.saturating_sub(other.x).abs();
        let dy = self.y.saturating_sub(other.y).abs();
        if dx > dy { dx } else { dy }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// An opaque, equality-comparable unit of knowledge.
///
/// The simulation never looks inside a message; only identity matters.
/// Knowledge collections are `Vec<Message>` rather than sets because
/// transfers may legitimately duplicate a token across collections.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Message(String);

impl Message {
    /// Create a message from its label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The message's label.
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Message {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AgentState
// ---------------------------------------------------------------------------

/// The mutable state of a living agent.
///
/// `position` caches the grid's occupancy record for this agent; the grid
/// remains the source of truth for *where* agents live, and every
/// successful move updates both together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    /// Unique identifier.
    pub id: AgentId,
    /// Display name used in narration, fixed at spawn.
    pub name: String,
    /// Species, immutable after construction.
    pub species: Species,
    /// Cached grid coordinates; mirrors the grid's occupancy record.
    pub position: Position,
    /// Current energy. May dip below zero transiently within a turn;
    /// the death check at the end of the turn collects the body.
    pub energy: i32,
    /// Maximum energy, fixed at construction.
    pub max_energy: i32,
    /// The most recently attempted movement direction. Informational only.
    pub last_heading: Direction,
    /// The knowledge this agent carries. Duplicates are possible.
    pub knowledge: Vec<Message>,
    /// Wall-clock time the agent entered the simulation.
    pub spawned_at: DateTime<Utc>,
}

impl AgentState {
    /// Whether current energy is at or below zero.
    pub const fn is_depleted(&self) -> bool {
        self.energy <= 0
    }

    /// Whether energy is below the critical threshold, expressed as a
    /// percentage of maximum (scaled integer math, no floats).
    ///
    /// `critical_pct` of 20 means "ratio < 0.20".
    pub const fn below_energy_ratio(&self, critical_pct: i32) -> bool {
        // energy / max < pct / 100  <=>  energy * 100 < max * pct
        self.energy.saturating_mul(100) < self.max_energy.saturating_mul(critical_pct)
    }

    /// A self-contained reference to this agent for the event stream.
    pub fn actor_ref(&self) -> ActorRef {
        ActorRef {
            id: self.id,
            name: self.name.clone(),
            species: self.species,
        }
    }
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// A stationary, species-affiliated knowledge sink.
///
/// Archives accumulate the knowledge of visiting same-species agents and
/// redistribute their whole collection back, with the same union
/// semantics as a same-species merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    /// Unique identifier.
    pub id: ArchiveId,
    /// The species this archive serves.
    pub species: Species,
    /// Fixed grid coordinates.
    pub position: Position,
    /// Accumulated knowledge. Duplicates are possible.
    pub knowledge: Vec<Message>,
}

impl Archive {
    /// Create an empty archive for a species at a position.
    pub const fn new(id: ArchiveId, species: Species, position: Position) -> Self {
        Self {
            id,
            species,
            position,
            knowledge: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// CellContent
// ---------------------------------------------------------------------------

/// What occupies a single grid cell.
///
/// A closed variant inspected by pattern match, so every occupancy case
/// is handled exhaustively at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    /// Nothing occupies the cell.
    Empty,
    /// A static obstacle (placed at setup, or the remains of a dead agent).
    Obstacle,
    /// A living agent.
    Agent(AgentId),
    /// A knowledge archive.
    Archive(ArchiveId),
}

impl CellContent {
    /// Whether the cell can be stepped into.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}
