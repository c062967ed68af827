use hangman::cli::{Cli, CliInterface, parse_cli};
use hangman::tui::TuiInterface;
use hangman::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_file, load_wordbank_from_str};
use hangman::{GameInterface, HangmanError, Matching, SessionSettings, Word, game_loop, logging};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

fn load_words(cli: &Cli) -> Result<Vec<Word>, HangmanError> {
    let words = match &cli.wordbank_path {
        Some(path) => load_wordbank_from_file(path)?,
        None => load_wordbank_from_str(EMBEDDED_WORDBANK),
    };
    if words.is_empty() {
        return Err(HangmanError::EmptyWordList);
    }
    log::info!("loaded {} words", words.len());
    Ok(words)
}

fn play<I: GameInterface + ?Sized>(
    cli: &Cli,
    words: &[Word],
    interface: &mut I,
) -> Result<usize, HangmanError> {
    interface.display_welcome();

    let difficulty = match cli.level {
        Some(level) => level,
        None => match interface.read_level() {
            Some(level) => level,
            None => {
                interface.display_exit_message();
                return Ok(0);
            }
        },
    };
    let matching = if cli.ignore_case {
        Matching::IgnoreAsciiCase
    } else {
        Matching::CaseSensitive
    };
    let settings = SessionSettings {
        difficulty,
        matching,
    };
    log::info!("starting session at {difficulty} ({matching:?})");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    game_loop(words, settings, interface, &mut rng)
}

/// A failed terminal restore is logged; the session's own result wins.
fn keep_session_result(
    result: Result<usize, HangmanError>,
    cleanup: Result<(), io::Error>,
) -> Result<usize, HangmanError> {
    if let Err(e) = cleanup {
        log::warn!("failed to restore terminal: {e}");
    }
    result
}

fn run(cli: &Cli) -> Result<usize, HangmanError> {
    let words = load_words(cli)?;

    if cli.tui {
        let mut interface = TuiInterface::new()?;
        let result = play(cli, &words, &mut interface);
        keep_session_result(result, interface.cleanup())
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock()).colored(!cli.plain);
        play(cli, &words, &mut interface)
    }
}

fn main() -> ExitCode {
    logging::init();
    let cli = parse_cli();

    match run(&cli) {
        Ok(rounds) => {
            log::info!("session ended after {rounds} rounds");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("hangman: {e}");
            ExitCode::FAILURE
        }
    }
}
