//! Bookkeeping for which positions of the word the player can see.

use crate::difficulty::Difficulty;
use crate::word::Word;
use crate::debug_log;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;

/// Printed in front of every rendered word.
pub const WORD_LABEL: &str = "Your word: ";
/// Stands in for a letter that is still hidden.
pub const PLACEHOLDER: char = '_';

const DRAWS_PER_CHAR: usize = 8;
const EXTRA_DRAWS: usize = 16;

/// Visible positions of a word. Positions are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSet {
    positions: BTreeSet<usize>,
}

impl RevealSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every position of `word`, used to show the solution.
    #[must_use]
    pub fn full(word: &Word) -> Self {
        Self {
            positions: (0..word.len()).collect(),
        }
    }

    /// Returns `true` if the position was not visible before.
    pub fn insert(&mut self, position: usize) -> bool {
        self.positions.insert(position)
    }

    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        self.positions.contains(&position)
    }

    /// Number of explicitly revealed positions. Spaces are never counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    /// Whether `position` is shown, either revealed or a space.
    #[must_use]
    pub fn is_visible(&self, word: &Word, position: usize) -> bool {
        self.contains(position) || word.is_space(position)
    }

    /// True once no letter of `word` is left hidden.
    #[must_use]
    pub fn covers(&self, word: &Word) -> bool {
        word.letter_positions().all(|i| self.contains(i))
    }
}

impl FromIterator<usize> for RevealSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Picks the letters shown before the first guess.
///
/// Random positions are drawn until the difficulty's target is met, skipping
/// spaces and repeats. The number of draws is capped; if the cap runs out the
/// rest of the target is taken from the letters still hidden, so the result
/// always has exactly `min(target, letters in word)` positions.
pub fn initial_reveal<R: Rng + ?Sized>(difficulty: Difficulty, word: &Word, rng: &mut R) -> RevealSet {
    let target = difficulty
        .initial_reveal_count(word.len())
        .min(word.non_space_len());
    let mut revealed = RevealSet::new();

    if target == 0 {
        return revealed;
    }

    let max_draws = word.len() * DRAWS_PER_CHAR + EXTRA_DRAWS;
    let mut draws = 0;
    while revealed.len() < target && draws < max_draws {
        let index = rng.gen_range(0..word.len());
        if !word.is_space(index) {
            revealed.insert(index);
        }
        draws += 1;
    }

    if revealed.len() < target {
        debug_log!(
            "initial_reveal() - draw cap hit after {} draws, filling {} remaining",
            draws,
            target - revealed.len()
        );
        let hidden: Vec<usize> = word
            .letter_positions()
            .filter(|&i| !revealed.contains(i))
            .collect();
        let missing = target - revealed.len();
        for &index in hidden.choose_multiple(rng, missing) {
            revealed.insert(index);
        }
    }

    revealed
}

/// Per-position view: `Some(c)` where the character is visible, `None` where hidden.
#[must_use]
pub fn masked(word: &Word, revealed: &RevealSet) -> Vec<Option<char>> {
    word.chars()
        .iter()
        .enumerate()
        .map(|(i, &c)| revealed.is_visible(word, i).then_some(c))
        .collect()
}

/// Formats the word for display, e.g. `Your word: c _ t`.
#[must_use]
pub fn render(word: &Word, revealed: &RevealSet) -> String {
    let shown: Vec<String> = masked(word, revealed)
        .into_iter()
        .map(|c| c.unwrap_or(PLACEHOLDER).to_string())
        .collect();
    format!("{WORD_LABEL}{}", shown.join(" "))
}
