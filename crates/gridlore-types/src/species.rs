//! Species, alliances, and movement patterns.
//!
//! The species registry is a pure lookup table: every species maps to its
//! alliance, display symbols, and movement pattern through `const` match
//! arms, defined once and never mutated. Encounter classification
//! ([`Species::stance_toward`]) derives entirely from this table.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// A coarse grouping of species into friendly camps.
///
/// Alliances determine how colliding agents treat each other and which
/// safe zones an agent may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Alliance {
    /// The allied species of the covenant.
    Covenant,
    /// The allied species of the horde.
    Horde,
}

impl Alliance {
    /// Both alliances.
    pub const ALL: [Self; 2] = [Self::Covenant, Self::Horde];
}

impl core::fmt::Display for Alliance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Covenant => write!(f, "covenant"),
            Self::Horde => write!(f, "horde"),
        }
    }
}

/// The movement rule set a species uses each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementPattern {
    /// One step per turn, any of the 8 directions.
    Adjacent,
    /// 1-3 steps per turn along one cardinal direction.
    Orthogonal,
    /// 1-3 steps per turn along one diagonal direction.
    Diagonal,
    /// 1-3 steps per turn along any one of the 8 directions.
    Omnidirectional,
}

impl MovementPattern {
    /// Return the direction pool this pattern samples from.
    pub const fn direction_pool(self) -> &'static [Direction] {
        match self {
            Self::Adjacent | Self::Omnidirectional => &Direction::ALL,
            Self::Orthogonal => &Direction::CARDINAL,
            Self::Diagonal => &Direction::DIAGONAL,
        }
    }

    /// Whether this pattern attempts more than one step per turn.
    pub const fn is_multi_step(self) -> bool {
        !matches!(self, Self::Adjacent)
    }
}

/// How one species relates to another when they collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    /// Same species: full bidirectional knowledge merge.
    Kin,
    /// Different species, same alliance: limited random exchange.
    Allied,
    /// Different alliance: duel and theft.
    Hostile,
}

impl core::fmt::Display for Stance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Kin => write!(f, "kin"),
            Self::Allied => write!(f, "allied"),
            Self::Hostile => write!(f, "hostile"),
        }
    }
}

/// A species of agent, defined once at startup and never mutated.
///
/// Each species carries its alliance, a one-letter grid symbol, the
/// two-letter symbol of its knowledge archive, and a movement pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Horde heavyweight; single adjacent step per turn.
    Ogre,
    /// Horde skirmisher; 1-3 cardinal steps per turn.
    Wraith,
    /// Covenant scout; 1-3 diagonal steps per turn.
    Ranger,
    /// Covenant commander; 1-3 steps in any direction per turn.
    Archon,
}

impl Species {
    /// All four species.
    pub const ALL: [Self; 4] = [Self::Ogre, Self::Wraith, Self::Ranger, Self::Archon];

    /// The alliance this species belongs to.
    pub const fn alliance(self) -> Alliance {
        match self {
            Self::Ogre | Self::Wraith => Alliance::Horde,
            Self::Ranger | Self::Archon => Alliance::Covenant,
        }
    }

    /// The movement pattern this species uses.
    pub const fn pattern(self) -> MovementPattern {
        match self {
            Self::Ogre => MovementPattern::Adjacent,
            Self::Wraith => MovementPattern::Orthogonal,
            Self::Ranger => MovementPattern::Diagonal,
            Self::Archon => MovementPattern::Omnidirectional,
        }
    }

    /// One-letter grid symbol for a living agent of this species.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Ogre => "O",
            Self::Wraith => "W",
            Self::Ranger => "R",
            Self::Archon => "A",
        }
    }

    /// Two-letter grid symbol for this species' knowledge archive.
    pub const fn archive_symbol(self) -> &'static str {
        match self {
            Self::Ogre => "AO",
            Self::Wraith => "AW",
            Self::Ranger => "AR",
            Self::Archon => "AA",
        }
    }

    /// Classify an encounter with another species.
    pub fn stance_toward(self, other: Self) -> Stance {
        if self == other {
            Stance::Kin
        } else if self.alliance() == other.alliance() {
            Stance::Allied
        } else {
            Stance::Hostile
        }
    }
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ogre => write!(f, "ogre"),
            Self::Wraith => write!(f, "wraith"),
            Self::Ranger => write!(f, "ranger"),
            Self::Archon => write!(f, "archon"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_alliance_has_two_species() {
        let horde = Species::ALL
            .iter()
            .filter(|s| s.alliance() == Alliance::Horde)
            .count();
        let covenant = Species::ALL
            .iter()
            .filter(|s| s.alliance() == Alliance::Covenant)
            .count();
        assert_eq!(horde, 2);
        assert_eq!(covenant, 2);
    }

    #[test]
    fn stance_same_species_is_kin() {
        assert_eq!(Species::Ogre.stance_toward(Species::Ogre), Stance::Kin);
    }

    #[test]
    fn stance_same_alliance_is_allied() {
        assert_eq!(Species::Ogre.stance_toward(Species::Wraith), Stance::Allied);
        assert_eq!(Species::Ranger.stance_toward(Species::Archon), Stance::Allied);
    }

    #[test]
    fn stance_cross_alliance_is_hostile() {
        assert_eq!(Species::Ogre.stance_toward(Species::Archon), Stance::Hostile);
        assert_eq!(Species::Ranger.stance_toward(Species::Wraith), Stance::Hostile);
    }

    #[test]
    fn stance_is_symmetric() {
        for a in Species::ALL {
            for b in Species::ALL {
                assert_eq!(a.stance_toward(b), b.stance_toward(a));
            }
        }
    }

    #[test]
    fn direction_pools_match_patterns() {
        assert_eq!(Species::Ogre.pattern().direction_pool().len(), 8);
        assert_eq!(Species::Wraith.pattern().direction_pool().len(), 4);
        assert_eq!(Species::Ranger.pattern().direction_pool().len(), 4);
        assert_eq!(Species::Archon.pattern().direction_pool().len(), 8);
    }

    #[test]
    fn only_adjacent_is_single_step() {
        assert!(!MovementPattern::Adjacent.is_multi_step());
        assert!(MovementPattern::Orthogonal.is_multi_step());
        assert!(MovementPattern::Diagonal.is_multi_step());
        assert!(MovementPattern::Omnidirectional.is_multi_step());
    }

    #[test]
    fn symbols_are_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for species in Species::ALL {
            assert!(seen.insert(species.symbol()));
        }
    }
}
