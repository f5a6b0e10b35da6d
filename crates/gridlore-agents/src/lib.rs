//! Agent behavior engine for the Gridlore simulation.
//!
//! This crate contains the decision logic of the system: how agents move,
//! spend and recover energy, collide, and die. It operates purely on the
//! shared types from `gridlore-types` and the occupancy contract of
//! `gridlore-world`; orchestration (the tick loop) and presentation (the
//! narration renderer) live elsewhere.
//!
//! # Modules
//!
//! - [`config`] -- Tunable energy and movement parameters ([`EnergyConfig`])
//! - [`spawn`] -- Agent construction with full energy and a fresh name
//! - [`movement`] -- Pattern dispatch and the single-step attempt machine
//! - [`interaction`] -- The collision protocol: merge, exchange, duel, theft
//! - [`turn`] -- The per-tick entry point ([`take_turn`]) and death handling
//! - [`error`] -- Error types for all agent operations ([`AgentError`])

pub mod config;
pub mod error;
pub mod interaction;
pub mod movement;
pub mod spawn;
pub mod turn;

// Re-export primary types at crate root for convenience.
pub use config::EnergyConfig;
pub use error::AgentError;
pub use interaction::{
    DuelVictor, EXCHANGE_ROUNDS, STEAL_DIVISOR, duel, full_merge, partial_exchange,
    run_interaction, steal_messages, sync_with_archive,
};
pub use movement::{RunReport, StepOutcome, attempt_run, attempt_step, resolve_movement};
pub use spawn::new_agent;
pub use turn::{DeathReport, TurnContext, TurnOutcome, take_turn};
