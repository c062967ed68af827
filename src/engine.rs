//! Round state machine.
//!
//! A round starts `InProgress` (or already `Won` if the initial reveal left
//! nothing hidden) and moves to `Won` or `Lost` one guess at a time:
//!
//! - invalid input and misses each cost one mistake
//! - a hit uncovers every matching position and never costs a mistake
//! - the word being fully visible is checked before the mistake limit

use crate::difficulty::Difficulty;
use crate::error::{GuessError, HangmanError};
use crate::reveal::{RevealSet, initial_reveal, render};
use crate::word::Word;
use crate::{debug_log, info_log};
use rand::Rng;
use std::fmt;

/// Mistakes allowed before a round is lost.
pub const MAX_ERRORS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(text)
    }
}

/// How a guessed character is compared with the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matching {
    #[default]
    CaseSensitive,
    IgnoreAsciiCase,
}

impl Matching {
    fn matches(self, guess: char, letter: char) -> bool {
        match self {
            Self::CaseSensitive => guess == letter,
            Self::IgnoreAsciiCase => guess.eq_ignore_ascii_case(&letter),
        }
    }
}

/// Result of a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// At least one hidden position matched. `revealed` is how many were uncovered.
    Hit { revealed: usize },
    /// Nothing new was uncovered. `already_revealed` is set when the
    /// character is in the word but every occurrence was already shown.
    Miss { already_revealed: bool },
    InvalidInput(GuessError),
}

impl GuessOutcome {
    #[must_use]
    pub fn is_mistake(self) -> bool {
        !matches!(self, Self::Hit { .. })
    }
}

/// Accepts exactly one ASCII letter or digit.
pub fn validate_guess(input: &str) -> Result<char, GuessError> {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return Err(GuessError::Empty);
    };
    if chars.next().is_some() {
        return Err(GuessError::TooLong(input.chars().count()));
    }
    if !first.is_ascii_alphanumeric() {
        return Err(GuessError::NotAlphanumeric(first));
    }
    Ok(first)
}

/// Everything one round needs. Owned by the session for the length of the round.
#[derive(Debug, Clone)]
pub struct RoundState {
    word: Word,
    revealed: RevealSet,
    errors: u32,
    max_errors: u32,
    matching: Matching,
}

impl RoundState {
    pub fn new(word: Word, revealed: RevealSet, matching: Matching) -> Self {
        Self {
            word,
            revealed,
            errors: 0,
            max_errors: MAX_ERRORS,
            matching,
        }
    }

    /// Starts a round with the difficulty's initial reveal.
    pub fn start<R: Rng + ?Sized>(
        word: Word,
        difficulty: Difficulty,
        matching: Matching,
        rng: &mut R,
    ) -> Self {
        let revealed = initial_reveal(difficulty, &word, rng);
        info_log!(
            "RoundState::start() - {} letters, {} revealed at {}",
            word.non_space_len(),
            revealed.len(),
            difficulty
        );
        Self::new(word, revealed, matching)
    }

    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub fn revealed(&self) -> &RevealSet {
        &self.revealed
    }

    #[must_use]
    pub fn errors(&self) -> u32 {
        self.errors
    }

    #[must_use]
    pub fn remaining_errors(&self) -> u32 {
        self.max_errors.saturating_sub(self.errors)
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        if self.revealed.covers(&self.word) {
            RoundStatus::Won
        } else if self.errors >= self.max_errors {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }

    /// The word as the player currently sees it.
    #[must_use]
    pub fn display(&self) -> String {
        render(&self.word, &self.revealed)
    }

    /// The word with every position shown.
    #[must_use]
    pub fn solution(&self) -> String {
        render(&self.word, &RevealSet::full(&self.word))
    }

    /// Applies one raw guess.
    ///
    /// Fails only when the round has already ended; invalid input is an
    /// outcome, not an error.
    pub fn apply_guess(&mut self, input: &str) -> Result<GuessOutcome, HangmanError> {
        let status = self.status();
        if status != RoundStatus::InProgress {
            return Err(HangmanError::RoundFinished(status));
        }

        let outcome = match validate_guess(input) {
            Err(err) => GuessOutcome::InvalidInput(err),
            Ok(guess) => self.reveal_matches(guess),
        };

        if outcome.is_mistake() {
            self.errors += 1;
        }
        debug_log!(
            "apply_guess() - input {:?} -> {:?}, errors {}/{}, status {}",
            input,
            outcome,
            self.errors,
            self.max_errors,
            self.status()
        );
        Ok(outcome)
    }

    fn reveal_matches(&mut self, guess: char) -> GuessOutcome {
        let matching: Vec<usize> = self
            .word
            .chars()
            .iter()
            .enumerate()
            .filter(|&(_, &letter)| letter != ' ' && self.matching.matches(guess, letter))
            .map(|(i, _)| i)
            .collect();

        let revealed = matching
            .iter()
            .filter(|&&i| self.revealed.insert(i))
            .count();

        if revealed > 0 {
            GuessOutcome::Hit { revealed }
        } else {
            GuessOutcome::Miss {
                already_revealed: !matching.is_empty(),
            }
        }
    }
}
