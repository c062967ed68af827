// Library interface for hangman
// This allows integration tests to drive whole sessions

pub mod cli;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod reveal;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use difficulty::{Difficulty, parse_level};
pub use engine::{GuessOutcome, MAX_ERRORS, Matching, RoundState, RoundStatus, validate_guess};
pub use error::{GuessError, HangmanError};
pub use game_state::{GameInterface, SessionSettings, UserAction, game_loop};
pub use reveal::{RevealSet, initial_reveal, render};
pub use word::Word;
pub use wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str, select_random};
