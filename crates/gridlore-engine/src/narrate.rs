//! Console narration: the one consumer of the simulation event stream.
//!
//! The engine renders every [`SimEvent`] as a colored line. Each species
//! narrates in its own ANSI color so interleaved skirmishes stay
//! readable; everything between the color code and the reset is plain
//! text, so piping the output through `cat -v` or a log file degrades
//! gracefully.

use gridlore_types::{ActorRef, SimEvent, Species};

/// ANSI reset code.
const RESET: &str = "\x1b[0m";

/// ANSI foreground color for a species.
const fn color(species: Species) -> &'static str {
    match species {
        Species::Ogre => "\x1b[33m",    // yellow
        Species::Wraith => "\x1b[35m",  // purple
        Species::Ranger => "\x1b[32m",  // green
        Species::Archon => "\x1b[31m",  // red
    }
}

/// An actor's name wrapped in its species color.
fn paint(actor: &ActorRef) -> String {
    format!("{}{}{}", color(actor.species), actor.name, RESET)
}

/// Render one event as a narration line.
pub fn narrate(event: &SimEvent) -> String {
    match event {
        SimEvent::InteractionStarted { actor, target, stance, .. } => {
            format!("{} runs into {} ({stance})", paint(actor), paint(target))
        }
        SimEvent::KnowledgeMerged { actor, target, actor_gained, target_gained, .. } => {
            format!(
                "{} and {} pool everything they know (+{actor_gained}/+{target_gained})",
                paint(actor),
                paint(target)
            )
        }
        SimEvent::MessagesExchanged { actor, target, sent, received, .. } => {
            format!(
                "{} swaps stories with {} ({sent} given, {received} taken)",
                paint(actor),
                paint(target)
            )
        }
        SimEvent::DuelRound { actor, target, actor_sign, target_sign, .. } => {
            format!(
                "  > {} throws {actor_sign}, {} throws {target_sign}",
                paint(actor),
                paint(target)
            )
        }
        SimEvent::DuelResolved { winner, loser, rounds, .. } => {
            format!(
                "  > {} beats {} after {rounds} throw(s)",
                paint(winner),
                paint(loser)
            )
        }
        SimEvent::MessagesStolen { winner, loser, count, .. } => {
            format!("{} plunders {count} message(s) from {}", paint(winner), paint(loser))
        }
        SimEvent::ArchiveSynced { agent, deposited, withdrawn, .. } => {
            format!(
                "{} visits the archive ({deposited} deposited, {withdrawn} withdrawn)",
                paint(agent)
            )
        }
        SimEvent::AgentHealed { agent, amount, .. } => {
            format!("{} rests at home (+{amount} energy)", paint(agent))
        }
        SimEvent::AgentDied { agent, cause, .. } => {
            format!("{} ran out of energy and became an obstacle ({cause})", paint(agent))
        }
    }
}

#[cfg(test)]
mod tests {
    use gridlore_types::{AgentId, DeathCause};

    use super::*;

    fn actor(name: &str, species: Species) -> ActorRef {
        ActorRef {
            id: AgentId::new(),
            name: String::from(name),
            species,
        }
    }

    #[test]
    fn death_line_names_the_agent_and_cause() {
        let line = narrate(&SimEvent::AgentDied {
            tick: 3,
            agent: actor("ogre-1a2b", Species::Ogre),
            cause: DeathCause::Collapsed,
        });
        assert!(line.contains("ogre-1a2b"));
        assert!(line.contains("collapsed"));
    }

    #[test]
    fn every_species_paints_with_a_reset() {
        for species in Species::ALL {
            let line = narrate(&SimEvent::AgentHealed {
                tick: 1,
                agent: actor("someone", species),
                amount: 5,
            });
            assert!(line.contains(RESET));
            assert!(line.contains(color(species)));
        }
    }
}
