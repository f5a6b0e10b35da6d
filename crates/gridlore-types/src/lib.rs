//! Shared type definitions for the Gridlore simulation.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the Gridlore workspace: identifiers, compass directions, the species
//! registry, message tokens, entity state structs, and the simulation
//! event stream.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`direction`] -- The 8 compass directions and their grid offsets
//! - [`species`] -- Species, alliances, and movement patterns
//! - [`structs`] -- Core entity structs (positions, messages, agents, archives)
//! - [`events`] -- The simulation event stream emitted by agent turns

pub mod direction;
pub mod events;
pub mod ids;
pub mod species;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use direction::Direction;
pub use events::{ActorRef, DeathCause, DuelSign, SimEvent};
pub use ids::{AgentId, ArchiveId};
pub use species::{Alliance, MovementPattern, Species, Stance};
pub use structs::{AgentState, Archive, CellContent, Message, Position};
