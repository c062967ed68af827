use crate::difficulty::{Difficulty, parse_level};
use crate::engine::{GuessOutcome, RoundState, RoundStatus};
use crate::game_state::{GameInterface, UserAction};
use clap::Parser;
use crossterm::style::{self, Color, Stylize};
use crossterm::{cursor, queue, terminal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Terminal hangman
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list (defaults to the built-in list)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Difficulty level; skips the level prompt when given
    #[arg(short, long, value_enum)]
    pub level: Option<Difficulty>,

    /// Match guesses against the word ignoring ASCII case
    #[arg(long)]
    pub ignore_case: bool,

    /// Disable colors and screen clearing
    #[arg(long)]
    pub plain: bool,

    /// Run the full-screen terminal interface
    #[arg(long, conflicts_with = "plain")]
    pub tui: bool,

    /// Seed for word and reveal selection, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const BANNER_RULE: &str =
    "|---------------------------------------------------------------------------------------------------|";
const BANNER_TITLE: &str =
    "|                                     Welcome to HANGMAN                                            |";

const LEVEL_PROMPT: &str = "Please, select your level (1. Beginner | 2. Moderate | 3. Hard): ";
const REPLAY_PROMPT: &str = "Press (1) to play again or any other key to quit: ";
const REPLAY_KEY: &str = "1";

fn mistakes_allowed(remaining: u32) -> String {
    let plural = if remaining == 1 { "" } else { "s" };
    format!("{remaining} mistake{plural} still allowed")
}

fn guess_prompt(round: &RoundState) -> String {
    format!("Guess a letter ({}): ", mistakes_allowed(round.remaining_errors()))
}

fn outcome_message(outcome: &GuessOutcome) -> (&'static str, Color) {
    match outcome {
        GuessOutcome::InvalidInput(_) => (
            "Wrong input! Only alphanumeric characters are allowed.",
            Color::Red,
        ),
        GuessOutcome::Hit { .. } => ("Correct! :)", Color::Green),
        GuessOutcome::Miss { .. } => ("Wrong guess! :(", Color::Red),
    }
}

fn result_message(status: RoundStatus) -> &'static str {
    if status == RoundStatus::Won {
        "Game is over. You win!"
    } else {
        "Game is over. You lose!"
    }
}

/// Strips the line terminator only; other whitespace belongs to the answer.
fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l))
}

/// Line-oriented interface over any reader and writer.
///
/// The reader is owned for the whole session and released when the
/// interface is dropped.
pub struct CliInterface<R: BufRead, W: Write = io::Stdout> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self::with_writer(reader, io::stdout())
    }
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn with_writer(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: true,
        }
    }

    /// Turns colors and screen clearing on or off.
    #[must_use]
    pub fn colored(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            style::style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_or_log(&mut self, text: &str) {
        let result = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            log::warn!("failed to write to terminal: {e}");
        }
    }

    fn println(&mut self, text: &str) {
        self.write_or_log(&format!("{text}\n"));
    }

    /// Prints `prompt` and reads one line. `None` on end of input or a read error.
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.write_or_log(prompt);
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(strip_line_ending(&input).to_string()),
            Err(e) => {
                log::warn!("failed to read input: {e}");
                None
            }
        }
    }

    fn clear_screen(&mut self) {
        if !self.color {
            return;
        }
        let result = queue!(
            self.writer,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        );
        if let Err(e) = result {
            log::warn!("failed to clear screen: {e}");
        }
    }

    fn print_header(&mut self) {
        let banner = format!("\n{BANNER_RULE}\n{BANNER_TITLE}\n{BANNER_RULE}\n");
        self.println(&banner);
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn display_welcome(&mut self) {
        self.print_header();
    }

    fn read_level(&mut self) -> Option<Difficulty> {
        self.read_line(LEVEL_PROMPT).map(|answer| parse_level(&answer))
    }

    fn read_guess(&mut self, round: &RoundState) -> UserAction {
        let word = self.paint(&round.display(), Color::Magenta);
        self.println(&format!("\n{word}"));
        match self.read_line(&guess_prompt(round)) {
            Some(input) => UserAction::Guess(input),
            None => UserAction::Exit,
        }
    }

    fn display_guess_result(&mut self, outcome: &GuessOutcome) {
        let (message, color) = outcome_message(outcome);
        let painted = self.paint(message, color);
        self.println(&format!("\n{painted}\n"));
    }

    fn display_round_over(&mut self, round: &RoundState) {
        let solution = self.paint(&round.solution(), Color::Yellow);
        let result = self.paint(result_message(round.status()), Color::Cyan);
        self.println(&format!("\n{solution}"));
        self.println(&format!("\n\n{result}"));
    }

    fn read_replay(&mut self) -> UserAction {
        let prompt = self.paint(REPLAY_PROMPT, Color::Cyan);
        match self.read_line(&prompt) {
            Some(answer) if answer == REPLAY_KEY => UserAction::NewGame,
            _ => UserAction::Exit,
        }
    }

    fn display_new_game_message(&mut self) {
        self.clear_screen();
        self.print_header();
    }

    fn display_exit_message(&mut self) {
        self.println("Bye!");
    }
}
