//! Direction vocabulary for movement orders.
//!
//! The words a player may use in `MOVE`, `ADVANCE` and `SAIL` come from the
//! game's theme, so the table is data rather than code. [`Directions::default`]
//! holds the standard English names.

use atlantis_foundation::Direction;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::order::MoveStep;

/// One movement word and its abbreviation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectionWord {
    /// Short form, e.g. `ne`.
    pub abbreviation: String,
    /// Long form, e.g. `northeast`.
    pub name: String,
    /// What the word means.
    pub step: MoveStep,
}

impl DirectionWord {
    /// Creates a new vocabulary entry.
    #[must_use]
    pub fn new(abbreviation: impl Into<String>, name: impl Into<String>, step: MoveStep) -> Self {
        Self {
            abbreviation: abbreviation.into().to_lowercase(),
            name: name.into().to_lowercase(),
            step,
        }
    }

    fn matches(&self, word: &str) -> bool {
        self.abbreviation == word || self.name == word
    }
}

/// Lookup table from movement words to steps.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Directions {
    words: Vec<DirectionWord>,
}

impl Directions {
    /// Creates an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self { words: Vec::new() }
    }

    /// Adds a word to the table. Earlier entries win on conflicts.
    #[must_use]
    pub fn with_word(mut self, word: DirectionWord) -> Self {
        self.words.push(word);
        self
    }

    /// All entries, in lookup order.
    #[must_use]
    pub fn words(&self) -> &[DirectionWord] {
        &self.words
    }

    /// Resolves a movement word.
    ///
    /// When `allow_enter` is false, the structure steps `in` and `out` are
    /// not recognized (sailing cannot enter or leave buildings).
    #[must_use]
    pub fn lookup(&self, word: &str, allow_enter: bool) -> Option<MoveStep> {
        let word = word.to_lowercase();
        self.words
            .iter()
            .filter(|w| allow_enter || !matches!(w.step, MoveStep::In | MoveStep::Out))
            .find(|w| w.matches(&word))
            .map(|w| w.step)
    }
}

impl Default for Directions {
    fn default() -> Self {
        let mut table = Self::empty();
        for direction in Direction::ALL {
            table = table.with_word(DirectionWord::new(
                direction.abbreviation(),
                direction.name(),
                MoveStep::Direction(direction),
            ));
        }
        table
            .with_word(DirectionWord::new("in", "in", MoveStep::In))
            .with_word(DirectionWord::new("out", "out", MoveStep::Out))
            .with_word(DirectionWord::new("p", "pause", MoveStep::Pause))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_resolves_both_forms() {
        let dirs = Directions::default();
        assert_eq!(
            dirs.lookup("NorthEast", true),
            Some(MoveStep::Direction(Direction::Northeast))
        );
        assert_eq!(
            dirs.lookup("sw", true),
            Some(MoveStep::Direction(Direction::Southwest))
        );
        assert_eq!(dirs.lookup("pause", false), Some(MoveStep::Pause));
        assert_eq!(dirs.lookup("up", true), None);
    }

    #[test]
    fn sailing_excludes_structures() {
        let dirs = Directions::default();
        assert_eq!(dirs.lookup("in", true), Some(MoveStep::In));
        assert_eq!(dirs.lookup("in", false), None);
        assert_eq!(dirs.lookup("out", false), None);
    }

    #[test]
    fn themed_words() {
        let dirs = Directions::empty()
            .with_word(DirectionWord::new("no", "norte", MoveStep::Direction(Direction::North)))
            .with_word(DirectionWord::new("en", "entrar", MoveStep::In));
        assert_eq!(
            dirs.lookup("Norte", true),
            Some(MoveStep::Direction(Direction::North))
        );
        assert_eq!(dirs.lookup("north", true), None);
        assert_eq!(dirs.words().len(), 2);
    }
}
