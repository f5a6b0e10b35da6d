//! Error types for the `gridlore-world` crate.
//!
//! Every variant represents a violated placement invariant -- a
//! programming or configuration defect surfaced fast, not a condition the
//! simulation recovers from.

use gridlore_types::{AgentId, Alliance, ArchiveId, Position};

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A coordinate lies outside the grid bounds.
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    /// A placement or move targeted an occupied cell.
    #[error("cell {0} is already occupied")]
    CellOccupied(Position),

    /// An agent was not found in the occupancy index.
    #[error("agent not found on grid: {0}")]
    AgentNotFound(AgentId),

    /// An archive was not found in the occupancy index.
    #[error("archive not found on grid: {0}")]
    ArchiveNotFound(ArchiveId),

    /// A safe zone was declared with inverted or out-of-grid bounds.
    #[error("invalid safe zone for {alliance}: {reason}")]
    InvalidZone {
        /// The alliance the zone was declared for.
        alliance: Alliance,
        /// What is wrong with the declared bounds.
        reason: String,
    },

    /// The grid was created with a non-positive dimension.
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions {
        /// Declared width.
        width: i32,
        /// Declared height.
        height: i32,
    },
}
