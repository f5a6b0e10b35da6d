//! The collision protocol: merge, exchange, duel, and theft.
//!
//! Triggered when a movement attempt lands on a living agent. The
//! relationship between the two species decides everything:
//!
//! - **Kin** (same species): full bidirectional knowledge merge.
//! - **Allied** (same alliance): three rounds of random message swapping.
//! - **Hostile** (different alliance): a duel of signs, re-thrown on
//!   ties until one side wins, then the winner takes roughly half the
//!   loser's knowledge.
//!
//! The same union semantics power archive synchronization: an agent that
//! ends its turn next to a same-species archive deposits everything it
//! knows and withdraws everything the archive holds.

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use gridlore_types::{
    AgentState, Archive, DuelSign, Message, SimEvent, Stance,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rounds of give-and-take in an allied exchange.
pub const EXCHANGE_ROUNDS: usize = 3;

/// The loser of a duel forfeits `max(1, len / STEAL_DIVISOR)` messages.
pub const STEAL_DIVISOR: usize = 2;

// ---------------------------------------------------------------------------
// DuelVictor
// ---------------------------------------------------------------------------

/// Which side of a duel won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuelVictor {
    /// The moving agent won.
    Actor,
    /// The agent that was collided with won.
    Target,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full interaction protocol between a moving agent and the agent
/// it collided with, appending every observable step to `events`.
pub fn run_interaction(
    actor: &mut AgentState,
    target: &mut AgentState,
    tick: u64,
    events: &mut Vec<SimEvent>,
    rng: &mut impl Rng,
) {
    let stance = actor.species.stance_toward(target.species);
    debug!(actor = %actor.name, target = %target.name, %stance, "interaction");
    events.push(SimEvent::InteractionStarted {
        tick,
        actor: actor.actor_ref(),
        target: target.actor_ref(),
        stance,
    });

    match stance {
        Stance::Kin => {
            let (actor_gained, target_gained) =
                full_merge(&mut actor.knowledge, &mut target.knowledge);
            events.push(SimEvent::KnowledgeMerged {
                tick,
                actor: actor.actor_ref(),
                target: target.actor_ref(),
                actor_gained,
                target_gained,
            });
        }
        Stance::Allied => {
            let (sent, received) =
                partial_exchange(&mut actor.knowledge, &mut target.knowledge, rng);
            events.push(SimEvent::MessagesExchanged {
                tick,
                actor: actor.actor_ref(),
                target: target.actor_ref(),
                sent,
                received,
            });
        }
        Stance::Hostile => {
            let victor = duel(actor, target, tick, events, rng);
            let (winner, loser) = match victor {
                DuelVictor::Actor => (&mut *actor, &mut *target),
                DuelVictor::Target => (&mut *target, &mut *actor),
            };
            let count = steal_messages(&mut loser.knowledge, &mut winner.knowledge, rng);
            events.push(SimEvent::MessagesStolen {
                tick,
                winner: winner.actor_ref(),
                loser: loser.actor_ref(),
                count,
            });
        }
    }
}

/// Merge two knowledge collections bidirectionally.
///
/// Each side receives every message the other held when the merge began;
/// duplicates are kept. Returns `(a_gained, b_gained)`.
pub fn full_merge(a: &mut Vec<Message>, b: &mut Vec<Message>) -> (usize, usize) {
    let from_a: Vec<Message> = a.clone();
    let a_gained = b.len();
    let b_gained = from_a.len();
    a.extend(b.iter().cloned());
    b.extend(from_a);
    (a_gained, b_gained)
}

/// Swap random messages between two allied collections.
///
/// [`EXCHANGE_ROUNDS`] rounds; each round samples one message from each
/// non-empty side -- with replacement, from the side's *current*
/// collection, so a message received in an earlier round can travel
/// straight back. Returns `(sent_by_a, sent_by_b)`.
pub fn partial_exchange(
    a: &mut Vec<Message>,
    b: &mut Vec<Message>,
    rng: &mut impl Rng,
) -> (usize, usize) {
    let mut sent_by_a = 0_usize;
    let mut sent_by_b = 0_usize;
    for _ in 0..EXCHANGE_ROUNDS {
        if let Some(message) = a.as_slice().choose(rng).cloned() {
            b.push(message);
            sent_by_a = sent_by_a.saturating_add(1);
        }
        if let Some(message) = b.as_slice().choose(rng).cloned() {
            a.push(message);
            sent_by_b = sent_by_b.saturating_add(1);
        }
    }
    (sent_by_a, sent_by_b)
}

/// Fight a duel of signs until one side wins.
///
/// Both sides sample a sign uniformly each round; equal signs are a tie
/// and force a full re-throw of both sides, without bound. Every throw is
/// emitted as a [`SimEvent::DuelRound`], the outcome as a
/// [`SimEvent::DuelResolved`].
pub fn duel(
    actor: &AgentState,
    target: &AgentState,
    tick: u64,
    events: &mut Vec<SimEvent>,
    rng: &mut impl Rng,
) -> DuelVictor {
    let mut rounds: u32 = 0;
    loop {
        let actor_sign = throw_sign(rng);
        let target_sign = throw_sign(rng);
        rounds = rounds.saturating_add(1);
        events.push(SimEvent::DuelRound {
            tick,
            actor: actor.actor_ref(),
            target: target.actor_ref(),
            actor_sign,
            target_sign,
        });

        if actor_sign == target_sign {
            continue;
        }

        let victor = if actor_sign.beats(target_sign) {
            DuelVictor::Actor
        } else {
            DuelVictor::Target
        };
        let (winner, loser) = match victor {
            DuelVictor::Actor => (actor.actor_ref(), target.actor_ref()),
            DuelVictor::Target => (target.actor_ref(), actor.actor_ref()),
        };
        events.push(SimEvent::DuelResolved {
            tick,
            winner,
            loser,
            rounds,
        });
        return victor;
    }
}

/// Move `max(1, len / 2)` messages from the loser to the winner.
///
/// Each iteration samples uniformly from the loser's *remaining*
/// collection and removes what it takes, so no message is stolen twice.
/// Stops early if the loser runs dry; an empty loser forfeits nothing.
/// Returns the number of messages moved.
pub fn steal_messages(
    loser: &mut Vec<Message>,
    winner: &mut Vec<Message>,
    rng: &mut impl Rng,
) -> usize {
    if loser.is_empty() {
        return 0;
    }
    let quota = (loser.len() / STEAL_DIVISOR).max(1);
    let mut moved = 0_usize;
    for _ in 0..quota {
        if loser.is_empty() {
            break;
        }
        let index = rng.random_range(0..loser.len());
        let message = loser.swap_remove(index);
        winner.push(message);
        moved = moved.saturating_add(1);
    }
    moved
}

/// Synchronize an agent with a same-species archive: deposit everything,
/// withdraw everything, with the same union semantics as a kin merge.
pub fn sync_with_archive(
    agent: &mut AgentState,
    archive: &mut Archive,
    tick: u64,
    events: &mut Vec<SimEvent>,
) {
    let (withdrawn, deposited) = full_merge(&mut agent.knowledge, &mut archive.knowledge);
    events.push(SimEvent::ArchiveSynced {
        tick,
        agent: agent.actor_ref(),
        archive: archive.id,
        deposited,
        withdrawn,
    });
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sample one duel sign uniformly.
fn throw_sign(rng: &mut impl Rng) -> DuelSign {
    DuelSign::ALL
        .as_slice()
        .choose(rng)
        .copied()
        .unwrap_or(DuelSign::Rock)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use gridlore_types::{AgentId, ArchiveId, Direction, Position, Species};

    use super::*;

    fn agent_with(species: Species, labels: &[&str]) -> AgentState {
        AgentState {
            id: AgentId::new(),
            name: format!("{species}-test"),
            species,
            position: Position::new(0, 0),
            energy: 10,
            max_energy: 10,
            last_heading: Direction::North,
            knowledge: labels.iter().map(|label| Message::new(*label)).collect(),
            spawned_at: chrono::Utc::now(),
        }
    }

    fn labels(messages: &[Message]) -> BTreeSet<String> {
        messages.iter().map(|m| m.label().to_owned()).collect()
    }

    // -----------------------------------------------------------------------
    // Full merge
    // -----------------------------------------------------------------------

    #[test]
    fn full_merge_makes_both_sides_supersets_of_the_union() {
        let mut a = vec![Message::new("a1"), Message::new("a2")];
        let mut b = vec![Message::new("b1")];

        let (a_gained, b_gained) = full_merge(&mut a, &mut b);
        assert_eq!(a_gained, 1);
        assert_eq!(b_gained, 2);

        let union: BTreeSet<String> =
            ["a1", "a2", "b1"].iter().map(|s| String::from(*s)).collect();
        assert!(union.is_subset(&labels(&a)));
        assert!(union.is_subset(&labels(&b)));
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn full_merge_keeps_duplicates() {
        let mut a = vec![Message::new("shared")];
        let mut b = vec![Message::new("shared")];

        full_merge(&mut a, &mut b);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn full_merge_with_empty_sides() {
        let mut a: Vec<Message> = Vec::new();
        let mut b = vec![Message::new("only")];

        let (a_gained, b_gained) = full_merge(&mut a, &mut b);
        assert_eq!((a_gained, b_gained), (1, 0));
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Partial exchange
    // -----------------------------------------------------------------------

    #[test]
    fn exchange_between_disjoint_collections() {
        let mut a = vec![
            Message::new("a1"),
            Message::new("a2"),
            Message::new("a3"),
            Message::new("a4"),
            Message::new("a5"),
        ];
        let mut b = vec![
            Message::new("b1"),
            Message::new("b2"),
            Message::new("b3"),
            Message::new("b4"),
            Message::new("b5"),
        ];
        let mut rng = SmallRng::seed_from_u64(42);

        let (sent_by_a, sent_by_b) = partial_exchange(&mut a, &mut b, &mut rng);
        // Both sides are non-empty throughout, so all three rounds fire.
        assert_eq!(sent_by_a, 3);
        assert_eq!(sent_by_b, 3);
        assert!(a.len() >= 5 && a.len() <= 8);
        assert!(b.len() >= 5 && b.len() <= 8);
    }

    #[test]
    fn exchange_with_one_empty_side_flows_one_way() {
        let mut a: Vec<Message> = Vec::new();
        let mut b = vec![Message::new("only")];
        let mut rng = SmallRng::seed_from_u64(42);

        let (sent_by_a, sent_by_b) = partial_exchange(&mut a, &mut b, &mut rng);
        assert_eq!(sent_by_a, 0);
        assert_eq!(sent_by_b, 3);
        // The same message can be sampled every round (with replacement).
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 1);
        assert!(a.iter().all(|m| m.label() == "only"));
    }

    #[test]
    fn exchange_between_empty_collections_is_a_no_op() {
        let mut a: Vec<Message> = Vec::new();
        let mut b: Vec<Message> = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);

        let (sent_by_a, sent_by_b) = partial_exchange(&mut a, &mut b, &mut rng);
        assert_eq!((sent_by_a, sent_by_b), (0, 0));
        assert!(a.is_empty() && b.is_empty());
    }

    // -----------------------------------------------------------------------
    // Duels
    // -----------------------------------------------------------------------

    #[test]
    fn duel_terminates_with_a_single_victor() {
        for seed in 0..50 {
            let mut actor = agent_with(Species::Ogre, &[]);
            let mut target = agent_with(Species::Archon, &[]);
            let mut events = Vec::new();
            let mut rng = SmallRng::seed_from_u64(seed);

            let victor = duel(&mut actor, &mut target, 1, &mut events, &mut rng);
            let resolved = events.iter().rev().find_map(|e| match e {
                SimEvent::DuelResolved { winner, loser, rounds, .. } => {
                    Some((winner.clone(), loser.clone(), *rounds))
                }
                _ => None,
            });
            assert!(resolved.is_some());
            if let Some((winner, loser, rounds)) = resolved {
                assert_ne!(winner.id, loser.id);
                let thrown = events
                    .iter()
                    .filter(|e| matches!(e, SimEvent::DuelRound { .. }))
                    .count();
                assert_eq!(u32::try_from(thrown).ok(), Some(rounds));
                match victor {
                    DuelVictor::Actor => assert_eq!(winner.id, actor.id),
                    DuelVictor::Target => assert_eq!(winner.id, target.id),
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Theft
    // -----------------------------------------------------------------------

    #[test]
    fn steal_from_empty_loser_takes_nothing() {
        let mut loser: Vec<Message> = Vec::new();
        let mut winner = vec![Message::new("w1")];
        let mut rng = SmallRng::seed_from_u64(42);

        assert_eq!(steal_messages(&mut loser, &mut winner, &mut rng), 0);
        assert_eq!(winner.len(), 1);
    }

    #[test]
    fn steal_takes_half_rounded_down() {
        let mut loser: Vec<Message> =
            (0..5).map(|i| Message::new(format!("m{i}"))).collect();
        let mut winner: Vec<Message> = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);

        let moved = steal_messages(&mut loser, &mut winner, &mut rng);
        assert_eq!(moved, 2);
        assert_eq!(loser.len(), 3);
        assert_eq!(winner.len(), 2);
    }

    #[test]
    fn steal_takes_at_least_one() {
        let mut loser = vec![Message::new("last")];
        let mut winner: Vec<Message> = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);

        let moved = steal_messages(&mut loser, &mut winner, &mut rng);
        assert_eq!(moved, 1);
        assert!(loser.is_empty());
        assert_eq!(winner.len(), 1);
    }

    #[test]
    fn stolen_messages_leave_the_loser() {
        let original: BTreeSet<String> = (0..8).map(|i| format!("m{i}")).collect();
        let mut loser: Vec<Message> =
            original.iter().map(|l| Message::new(l.clone())).collect();
        let mut winner: Vec<Message> = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);

        let moved = steal_messages(&mut loser, &mut winner, &mut rng);
        assert_eq!(moved, 4);

        let remaining = labels(&loser);
        let taken = labels(&winner);
        // No message is stolen twice and nothing is invented or lost.
        assert!(remaining.is_disjoint(&taken));
        let reunion: BTreeSet<String> = remaining.union(&taken).cloned().collect();
        assert_eq!(reunion, original);
    }

    // -----------------------------------------------------------------------
    // The full protocol
    // -----------------------------------------------------------------------

    #[test]
    fn kin_collision_merges_fully() {
        let mut actor = agent_with(Species::Ogre, &["a1", "a2"]);
        let mut target = agent_with(Species::Ogre, &["t1"]);
        let mut events = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);

        run_interaction(&mut actor, &mut target, 5, &mut events, &mut rng);

        assert!(matches!(
            events.first(),
            Some(SimEvent::InteractionStarted { stance: Stance::Kin, .. })
        ));
        assert!(matches!(
            events.get(1),
            Some(SimEvent::KnowledgeMerged { actor_gained: 1, target_gained: 2, .. })
        ));
        assert_eq!(actor.knowledge.len(), 3);
        assert_eq!(target.knowledge.len(), 3);
    }

    #[test]
    fn allied_collision_exchanges() {
        let mut actor = agent_with(Species::Ogre, &["a1"]);
        let mut target = agent_with(Species::Wraith, &["t1"]);
        let mut events = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);

        run_interaction(&mut actor, &mut target, 5, &mut events, &mut rng);

        assert!(matches!(
            events.first(),
            Some(SimEvent::InteractionStarted { stance: Stance::Allied, .. })
        ));
        assert!(matches!(
            events.get(1),
            Some(SimEvent::MessagesExchanged { sent: 3, received: 3, .. })
        ));
    }

    #[test]
    fn hostile_collision_duels_and_steals() {
        let mut actor = agent_with(Species::Ogre, &["a1", "a2", "a3", "a4"]);
        let mut target = agent_with(Species::Ranger, &["t1", "t2", "t3", "t4"]);
        let mut events = Vec::new();
        let mut rng = SmallRng::seed_from_u64(42);

        run_interaction(&mut actor, &mut target, 5, &mut events, &mut rng);

        assert!(matches!(
            events.first(),
            Some(SimEvent::InteractionStarted { stance: Stance::Hostile, .. })
        ));
        let stolen = events.iter().find_map(|e| match e {
            SimEvent::MessagesStolen { count, .. } => Some(*count),
            _ => None,
        });
        // The loser held 4 messages, so the winner takes exactly 2.
        assert_eq!(stolen, Some(2));
        let total = actor.knowledge.len().saturating_add(target.knowledge.len());
        assert_eq!(total, 8);
        assert!(actor.knowledge.len() == 2 || actor.knowledge.len() == 6);
    }

    // -----------------------------------------------------------------------
    // Archive synchronization
    // -----------------------------------------------------------------------

    #[test]
    fn archive_sync_is_a_bidirectional_union() {
        let mut agent = agent_with(Species::Ranger, &["a1", "a2"]);
        let mut archive = Archive::new(ArchiveId::new(), Species::Ranger, Position::new(1, 0));
        archive.knowledge.push(Message::new("old"));
        let mut events = Vec::new();

        sync_with_archive(&mut agent, &mut archive, 9, &mut events);

        assert_eq!(agent.knowledge.len(), 3);
        assert_eq!(archive.knowledge.len(), 3);
        assert!(matches!(
            events.first(),
            Some(SimEvent::ArchiveSynced { deposited: 2, withdrawn: 1, .. })
        ));
    }
}
