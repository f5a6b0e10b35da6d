//! The simulation event stream.
//!
//! The decision logic never prints. Every observable happening -- a
//! collision, a duel throw, a theft, a death -- is emitted as a
//! [`SimEvent`] and collected by the tick cycle; the engine binary is the
//! only consumer, rendering events as console narration. This keeps the
//! core observable and testable without output capture.

use serde::{Deserialize, Serialize};

use crate::ids::{AgentId, ArchiveId};
use crate::species::{Species, Stance};

// ---------------------------------------------------------------------------
// ActorRef
// ---------------------------------------------------------------------------

/// A self-contained reference to an agent as it was when the event fired.
///
/// Events outlive the agents they mention (a death event refers to an
/// agent that is no longer in the roster), so each event carries the name
/// and species it needs for narration rather than an ID to join later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    /// The agent's identifier.
    pub id: AgentId,
    /// The agent's display name.
    pub name: String,
    /// The agent's species.
    pub species: Species,
}

impl core::fmt::Display for ActorRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// ---------------------------------------------------------------------------
// DuelSign
// ---------------------------------------------------------------------------

/// One of the three signs thrown in a duel round.
///
/// Cyclic dominance: rock beats scissors, scissors beats paper, paper
/// beats rock. Equal signs are a tie and force a full re-throw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelSign {
    /// Beats scissors.
    Rock,
    /// Beats rock.
    Paper,
    /// Beats paper.
    Scissors,
}

impl DuelSign {
    /// All three signs, for uniform sampling.
    pub const ALL: [Self; 3] = [Self::Rock, Self::Paper, Self::Scissors];

    /// Whether this sign defeats the other under cyclic dominance.
    pub const fn beats(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Rock, Self::Scissors) | (Self::Scissors, Self::Paper) | (Self::Paper, Self::Rock)
        )
    }
}

impl core::fmt::Display for DuelSign {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rock => write!(f, "rock"),
            Self::Paper => write!(f, "paper"),
            Self::Scissors => write!(f, "scissors"),
        }
    }
}

// ---------------------------------------------------------------------------
// DeathCause
// ---------------------------------------------------------------------------

/// Why an agent was removed from the grid.
///
/// The two causes differ observably: an exhausted agent keeps its
/// knowledge when removed, a collapsed agent's knowledge is cleared
/// first. This asymmetry is inherited behavior, kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// The agent entered its turn with no energy left.
    Exhausted,
    /// This turn's energy consumption drained the agent to zero or below.
    Collapsed,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Exhausted => write!(f, "exhausted"),
            Self::Collapsed => write!(f, "collapsed"),
        }
    }
}

// ---------------------------------------------------------------------------
// SimEvent
// ---------------------------------------------------------------------------

/// One observable happening during an agent's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Two living agents collided; an interaction follows.
    InteractionStarted {
        /// Tick during which the event fired.
        tick: u64,
        /// The moving agent.
        actor: ActorRef,
        /// The agent occupying the target cell.
        target: ActorRef,
        /// How the two species relate.
        stance: Stance,
    },

    /// A same-species collision merged both knowledge collections.
    KnowledgeMerged {
        /// Tick during which the event fired.
        tick: u64,
        /// The moving agent.
        actor: ActorRef,
        /// The agent it merged with.
        target: ActorRef,
        /// Messages the actor gained.
        actor_gained: usize,
        /// Messages the target gained.
        target_gained: usize,
    },

    /// An allied collision traded random messages both ways.
    MessagesExchanged {
        /// Tick during which the event fired.
        tick: u64,
        /// The moving agent.
        actor: ActorRef,
        /// The allied agent.
        target: ActorRef,
        /// Messages the actor handed over.
        sent: usize,
        /// Messages the actor received.
        received: usize,
    },

    /// One throw of a duel (including ties, which force a re-throw).
    DuelRound {
        /// Tick during which the event fired.
        tick: u64,
        /// The moving agent and its sign.
        actor: ActorRef,
        /// The defending agent and its sign.
        target: ActorRef,
        /// Sign thrown by the actor.
        actor_sign: DuelSign,
        /// Sign thrown by the target.
        target_sign: DuelSign,
    },

    /// A duel produced a winner.
    DuelResolved {
        /// Tick during which the event fired.
        tick: u64,
        /// The winning agent.
        winner: ActorRef,
        /// The losing agent.
        loser: ActorRef,
        /// Number of throws, ties included.
        rounds: u32,
    },

    /// The duel winner stole messages from the loser.
    MessagesStolen {
        /// Tick during which the event fired.
        tick: u64,
        /// The winning agent.
        winner: ActorRef,
        /// The losing agent.
        loser: ActorRef,
        /// Messages moved from loser to winner.
        count: usize,
    },

    /// An agent synchronized with a neighboring same-species archive.
    ArchiveSynced {
        /// Tick during which the event fired.
        tick: u64,
        /// The visiting agent.
        agent: ActorRef,
        /// The archive.
        archive: ArchiveId,
        /// Messages copied into the archive.
        deposited: usize,
        /// Messages copied back to the agent.
        withdrawn: usize,
    },

    /// An agent healed inside its own safe zone.
    AgentHealed {
        /// Tick during which the event fired.
        tick: u64,
        /// The healing agent.
        agent: ActorRef,
        /// Energy actually restored after the cap.
        amount: i32,
    },

    /// An agent was removed from the grid, leaving an obstacle behind.
    AgentDied {
        /// Tick during which the event fired.
        tick: u64,
        /// The removed agent.
        agent: ActorRef,
        /// Which death path fired.
        cause: DeathCause,
    },
}

impl SimEvent {
    /// The tick this event fired on.
    pub const fn tick(&self) -> u64 {
        match self {
            Self::InteractionStarted { tick, .. }
            | Self::KnowledgeMerged { tick, .. }
            | Self::MessagesExchanged { tick, .. }
            | Self::DuelRound { tick, .. }
            | Self::DuelResolved { tick, .. }
            | Self::MessagesStolen { tick, .. }
            | Self::ArchiveSynced { tick, .. }
            | Self::AgentHealed { tick, .. }
            | Self::AgentDied { tick, .. } => *tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duel_dominance_is_cyclic() {
        assert!(DuelSign::Rock.beats(DuelSign::Scissors));
        assert!(DuelSign::Scissors.beats(DuelSign::Paper));
        assert!(DuelSign::Paper.beats(DuelSign::Rock));
    }

    #[test]
    fn duel_sign_never_beats_itself() {
        for sign in DuelSign::ALL {
            assert!(!sign.beats(sign));
        }
    }

    #[test]
    fn duel_exactly_one_side_wins_a_non_tie() {
        for a in DuelSign::ALL {
            for b in DuelSign::ALL {
                if a != b {
                    assert!(a.beats(b) ^ b.beats(a));
                }
            }
        }
    }

    #[test]
    fn event_tick_accessor() {
        let event = SimEvent::AgentDied {
            tick: 7,
            agent: ActorRef {
                id: AgentId::new(),
                name: String::from("ogre-0001"),
                species: Species::Ogre,
            },
            cause: DeathCause::Exhausted,
        };
        assert_eq!(event.tick(), 7);
    }

    #[test]
    fn event_roundtrip_serde() {
        let event = SimEvent::DuelResolved {
            tick: 3,
            winner: ActorRef {
                id: AgentId::new(),
                name: String::from("archon-0001"),
                species: Species::Archon,
            },
            loser: ActorRef {
                id: AgentId::new(),
                name: String::from("wraith-0002"),
                species: Species::Wraith,
            },
            rounds: 2,
        };
        let json = serde_json::to_string(&event).ok();
        assert!(json.is_some());
        let restored: Result<SimEvent, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(event));
    }
}
