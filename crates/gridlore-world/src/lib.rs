//! Grid occupancy, safe zones, and entity placement for the Gridlore
//! simulation.
//!
//! This crate owns *where things are*. The [`Grid`] tracks what occupies
//! every cell, validates coordinates, and exposes the safe-zone geometry
//! that the agent engine queries each turn. Agents never mutate occupancy
//! directly -- every placement, move, and removal goes through the grid's
//! entry points, which keep the occupancy map and the per-entity position
//! indexes consistent.
//!
//! # Modules
//!
//! - [`grid`] -- The occupancy grid and its query/mutation entry points
//! - [`zone`] -- Axis-aligned alliance safe zones
//! - [`error`] -- Error types for placement-invariant violations

pub mod error;
pub mod grid;
pub mod zone;

pub use error::WorldError;
pub use grid::Grid;
pub use zone::SafeZone;
