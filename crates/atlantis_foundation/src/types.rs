//! Small value types shared by the report and orders parsers.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stance one faction declares toward another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Attitude {
    /// Attacks on sight.
    Hostile,
    /// Will not help.
    Unfriendly,
    /// Neither friend nor foe.
    Neutral,
    /// Will not attack.
    Friendly,
    /// Defends in battle.
    Ally,
}

impl Attitude {
    /// All attitudes, from least to most friendly.
    pub const ALL: [Self; 5] = [
        Self::Hostile,
        Self::Unfriendly,
        Self::Neutral,
        Self::Friendly,
        Self::Ally,
    ];

    /// Parses an attitude name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// The name used in reports and orders.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hostile => "hostile",
            Self::Unfriendly => "unfriendly",
            Self::Neutral => "neutral",
            Self::Friendly => "friendly",
            Self::Ally => "ally",
        }
    }
}

impl fmt::Display for Attitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compass direction between neighbouring hexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// N
    North,
    /// NE
    Northeast,
    /// SE
    Southeast,
    /// S
    South,
    /// SW
    Southwest,
    /// NW
    Northwest,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 6] = [
        Self::North,
        Self::Northeast,
        Self::Southeast,
        Self::South,
        Self::Southwest,
        Self::Northwest,
    ];

    /// Parses a full or abbreviated direction name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| {
            d.name().eq_ignore_ascii_case(name) || d.abbreviation().eq_ignore_ascii_case(name)
        })
    }

    /// Full lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::Northwest => "northwest",
        }
    }

    /// Short lowercase name as written in orders.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::Northeast => "ne",
            Self::Southeast => "se",
            Self::South => "s",
            Self::Southwest => "sw",
            Self::Northwest => "nw",
        }
    }

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::Northeast => Self::Southwest,
            Self::Southeast => Self::Northwest,
            Self::South => Self::North,
            Self::Southwest => Self::Northeast,
            Self::Northwest => Self::Southeast,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attitude_names_ignore_case() {
        assert_eq!(Attitude::from_name("Hostile"), Some(Attitude::Hostile));
        assert_eq!(Attitude::from_name("ALLY"), Some(Attitude::Ally));
        assert_eq!(Attitude::from_name("enemy"), None);
    }

    #[test]
    fn attitude_order() {
        assert!(Attitude::Hostile < Attitude::Ally);
        assert_eq!(Attitude::Neutral.to_string(), "neutral");
    }

    #[test]
    fn direction_long_and_short_names() {
        assert_eq!(Direction::from_name("Northeast"), Some(Direction::Northeast));
        assert_eq!(Direction::from_name("sw"), Some(Direction::Southwest));
        assert_eq!(Direction::from_name("in"), None);
    }

    #[test]
    fn direction_opposites_are_involutive() {
        for d in Direction::ALL {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }
}
