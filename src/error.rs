use crate::engine::RoundStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a session (or indicate the session driver misused a round).
#[derive(Debug, Error)]
pub enum HangmanError {
    /// The word bank had no entries, so no round can start.
    #[error("no words provided")]
    EmptyWordList,

    #[error("failed to read word list from `{}`", .path.display())]
    WordList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A guess was applied to a round that already ended.
    #[error("round is already over ({0})")]
    RoundFinished(RoundStatus),

    #[error("terminal I/O failed")]
    Terminal(#[from] io::Error),
}

/// Why a raw guess was rejected. Rejections cost one mistake but never end the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("no character was entered")]
    Empty,

    #[error("expected a single character, got {0}")]
    TooLong(usize),

    #[error("'{0}' is not a letter or digit")]
    NotAlphanumeric(char),
}
