use crate::difficulty::Difficulty;
use crate::engine::{GuessOutcome, Matching, RoundState, RoundStatus};
use crate::error::HangmanError;
use crate::{debug_log, info_log};
use crate::wordbank::select_random;
use crate::word::Word;
use rand::Rng;

/// What the player asked for at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Raw text typed at the guess prompt, line ending removed.
    Guess(String),
    NewGame,
    Exit,
}

/// Settings chosen once per session and reused for every replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSettings {
    pub difficulty: Difficulty,
    pub matching: Matching,
}

/// Presentation and input for a session.
///
/// The session only hands over engine values; how they look (colors, layout,
/// screen clearing) is up to the implementation.
pub trait GameInterface {
    fn display_welcome(&mut self);
    /// `None` means the player left before choosing.
    fn read_level(&mut self) -> Option<Difficulty>;
    fn read_guess(&mut self, round: &RoundState) -> UserAction;
    fn display_guess_result(&mut self, outcome: &GuessOutcome);
    fn display_round_over(&mut self, round: &RoundState);
    /// `NewGame` to play again, anything else ends the session.
    fn read_replay(&mut self) -> UserAction;
    fn display_new_game_message(&mut self);
    fn display_exit_message(&mut self);
}

/// Runs rounds until the player quits. Returns how many rounds were started.
///
/// Fails before the first round if `words` is empty.
pub fn game_loop<I, R>(
    words: &[Word],
    settings: SessionSettings,
    interface: &mut I,
    rng: &mut R,
) -> Result<usize, HangmanError>
where
    I: GameInterface + ?Sized,
    R: Rng + ?Sized,
{
    let mut rounds = 0;

    loop {
        let word = select_random(words, rng)?.clone();
        let mut round = RoundState::start(word, settings.difficulty, settings.matching, rng);
        rounds += 1;
        info_log!("game_loop() - round {} started", rounds);

        if !play_round(&mut round, interface)? {
            interface.display_exit_message();
            return Ok(rounds);
        }

        info_log!(
            "game_loop() - round {} {} with {} mistakes",
            rounds,
            round.status(),
            round.errors()
        );
        interface.display_round_over(&round);

        match interface.read_replay() {
            UserAction::NewGame => interface.display_new_game_message(),
            UserAction::Guess(_) | UserAction::Exit => {
                interface.display_exit_message();
                return Ok(rounds);
            }
        }
    }
}

/// Feeds guesses into `round` until it ends. Returns `false` if the player quit mid-round.
fn play_round<I>(round: &mut RoundState, interface: &mut I) -> Result<bool, HangmanError>
where
    I: GameInterface + ?Sized,
{
    while round.status() == RoundStatus::InProgress {
        match interface.read_guess(round) {
            UserAction::Guess(input) => {
                let outcome = round.apply_guess(&input)?;
                interface.display_guess_result(&outcome);
            }
            UserAction::NewGame => {
                // Only meaningful at the replay prompt; keep asking for a guess.
                debug_log!("play_round() - Ignoring new game request mid-round");
            }
            UserAction::Exit => return Ok(false),
        }
    }
    Ok(true)
}
