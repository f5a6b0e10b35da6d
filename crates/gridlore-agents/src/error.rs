//! Error types for the `gridlore-agents` crate.
//!
//! All operations that can fail return typed errors rather than panicking.
//! Every variant here marks a programming or configuration defect -- the
//! decision logic itself is total over well-formed state.

use gridlore_types::AgentId;
use gridlore_world::WorldError;

/// Errors that can occur during agent operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// An agent was constructed with a non-positive energy maximum.
    #[error("invalid max energy {0}: must be positive")]
    InvalidMaxEnergy(i32),

    /// An agent ID had no state in the roster.
    #[error("agent not in roster: {0}")]
    UnknownAgent(AgentId),

    /// A grid operation failed underneath the engine.
    #[error("world error: {0}")]
    World(#[from] WorldError),
}
