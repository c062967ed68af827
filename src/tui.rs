//! TUI (Terminal User Interface) module for Hangman
//!
//! Full-screen alternative to the line-oriented CLI, built on Ratatui.
//!
//! # State Machine
//! - `SelectingLevel` → `EnteringGuess` → `RoundOver`
//! - `RoundOver` → `EnteringGuess` when the player replays, otherwise the session ends

use crate::difficulty::{Difficulty, parse_level};
use crate::engine::{GuessOutcome, RoundState, RoundStatus};
use crate::game_state::{GameInterface, UserAction};
use crate::reveal::{PLACEHOLDER, RevealSet, masked};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const MAX_INPUT_LEN: usize = 16;
const MAX_HISTORY_DISPLAY: usize = 8;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const HIDDEN_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
const SHOWN_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Magenta);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    SelectingLevel,
    EnteringGuess,
    RoundOver { won: bool },
}

/// Whether a key finished the current prompt.
#[derive(Debug, PartialEq, Eq)]
enum Step<T> {
    Continue,
    Done(T),
}

/// Borrowed snapshot of everything drawn in one frame.
struct RenderContext<'a> {
    state: TuiState,
    word: &'a [Option<char>],
    remaining_errors: u32,
    current_input: &'a str,
    history: &'a [(String, GuessOutcome)],
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen interface.
///
/// Raw mode and the alternate screen are taken in [`TuiInterface::new`] and
/// given back in [`TuiInterface::cleanup`] or on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    state: TuiState,
    word: Vec<Option<char>>,
    remaining_errors: u32,
    current_input: String,
    pending_guess: Option<String>,
    history: Vec<(String, GuessOutcome)>,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("TuiInterface::new() - Terminal ready");

        Ok(Self {
            terminal,
            state: TuiState::SelectingLevel,
            word: Vec::new(),
            remaining_errors: 0,
            current_input: String::new(),
            pending_guess: None,
            history: Vec::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Choose a level".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            state: self.state,
            word: &self.word,
            remaining_errors: self.remaining_errors,
            current_input: &self.current_input,
            history: &self.history,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(6), // Word
                Constraint::Min(6),    // Info panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_word(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn word_spans(word: &[Option<char>]) -> Vec<Span<'static>> {
        let mut spans = vec![Span::raw("  ")];
        for cell in word {
            match cell {
                Some(' ') => spans.push(Span::raw("   ")),
                Some(c) => spans.push(Span::styled(format!(" {c} "), SHOWN_STYLE)),
                None => spans.push(Span::styled(format!(" {PLACEHOLDER} "), HIDDEN_STYLE)),
            }
            spans.push(Span::raw(" "));
        }
        spans
    }

    fn render_word(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![Line::from(""), Line::from(Self::word_spans(ctx.word)), Line::from("")];

        match ctx.state {
            TuiState::SelectingLevel => {}
            TuiState::EnteringGuess => {
                let plural = if ctx.remaining_errors == 1 { "" } else { "s" };
                lines.push(Line::from(vec![
                    Span::raw("  Guess: "),
                    Span::styled(format!("{}_", ctx.current_input), INFO_STYLE),
                    Span::raw(format!(
                        "   ({} mistake{plural} still allowed)",
                        ctx.remaining_errors
                    )),
                ]));
            }
            TuiState::RoundOver { won } => {
                let (text, style) = if won {
                    ("  Game is over. You win!", SUCCESS_STYLE)
                } else {
                    ("  Game is over. You lose!", ERROR_STYLE)
                };
                lines.push(Line::from(Span::styled(text, style)));
            }
        }

        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Your word").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn outcome_line(guess: &str, outcome: &GuessOutcome) -> Line<'static> {
        let (text, style) = match outcome {
            GuessOutcome::Hit { revealed } => (format!("Correct! ({revealed} uncovered)"), SUCCESS_STYLE),
            GuessOutcome::Miss { already_revealed: true } => {
                ("Wrong guess! (already shown)".to_string(), ERROR_STYLE)
            }
            GuessOutcome::Miss { already_revealed: false } => {
                ("Wrong guess!".to_string(), ERROR_STYLE)
            }
            GuessOutcome::InvalidInput(err) => (format!("Wrong input! {err}"), ERROR_STYLE),
        };
        Line::from(vec![
            Span::raw(format!("  {guess:?} ")),
            Span::styled(text, style),
        ])
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.history.is_empty() {
            lines.push(Line::from(Span::styled("Guesses:", HEADER_STYLE)));
            let skip = ctx.history.len().saturating_sub(MAX_HISTORY_DISPLAY);
            for (guess, outcome) in ctx.history.iter().skip(skip) {
                lines.push(Self::outcome_line(guess, outcome));
            }
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, INFO_STYLE)));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn level_menu() -> String {
        let mut menu: Vec<String> = [Difficulty::Beginner, Difficulty::Moderate, Difficulty::Hard]
            .iter()
            .map(|difficulty| format!("{}: {difficulty}", difficulty.level()))
            .collect();
        menu.push("ESC: Quit".to_string());
        menu.join(" | ")
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::SelectingLevel => Self::level_menu(),
            TuiState::EnteringGuess => {
                "Type one letter or digit | ENTER: Submit | BACKSPACE: Edit | ESC: Quit".to_string()
            }
            TuiState::RoundOver { .. } => "1: Play again | Any other key: Quit".to_string(),
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits briefly for a key press. Non-key events and terminal garbage are dropped.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character {:?}", c);
                    return Ok(None);
                }
                debug_log!("next_key() - {:?} {:?}", key.code, key.modifiers);
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event {:?}", other);
                Ok(None)
            }
        }
    }

    fn is_interrupt(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }

    fn level_key(key: &KeyEvent) -> Step<Option<Difficulty>> {
        if Self::is_interrupt(key) {
            return Step::Done(None);
        }
        match key.code {
            KeyCode::Char(c) => Step::Done(Some(parse_level(&c.to_string()))),
            KeyCode::Enter => Step::Done(Some(parse_level(""))),
            _ => Step::Continue,
        }
    }

    fn guess_key(input: &mut String, key: &KeyEvent) -> Step<UserAction> {
        if Self::is_interrupt(key) {
            return Step::Done(UserAction::Exit);
        }
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL)
                    && input.chars().count() < MAX_INPUT_LEN =>
            {
                input.push(c);
                Step::Continue
            }
            KeyCode::Backspace => {
                input.pop();
                Step::Continue
            }
            KeyCode::Enter => Step::Done(UserAction::Guess(std::mem::take(input))),
            _ => Step::Continue,
        }
    }

    fn replay_key(key: &KeyEvent) -> UserAction {
        if key.code == KeyCode::Char('1') && key.modifiers.is_empty() {
            UserAction::NewGame
        } else {
            UserAction::Exit
        }
    }

    /// Draws, then feeds keys to `handle` until it finishes. Terminal failures yield `on_error`.
    fn prompt_loop<T>(&mut self, on_error: T, mut handle: impl FnMut(&mut Self, &KeyEvent) -> Step<T>) -> T {
        loop {
            if let Err(e) = self.draw() {
                info_log!("prompt_loop() - Draw failed: {}", e);
                return on_error;
            }
            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Step::Done(value) = handle(self, &key) {
                        return value;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("prompt_loop() - Input failed: {}", e);
                    return on_error;
                }
            }
        }
    }

    fn show_round(&mut self, round: &RoundState) {
        self.word = masked(round.word(), round.revealed());
        self.remaining_errors = round.remaining_errors();
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self) {
        self.state = TuiState::SelectingLevel;
        self.message = "Welcome to HANGMAN".to_string();
        self.draw_or_log();
    }

    fn read_level(&mut self) -> Option<Difficulty> {
        self.state = TuiState::SelectingLevel;
        self.status = "Select your level".to_string();
        let level = self.prompt_loop(None, |_, key| Self::level_key(key));
        if let Some(difficulty) = level {
            info_log!("read_level() - {}", difficulty);
            self.message = format!("Level: {difficulty}");
        }
        level
    }

    fn read_guess(&mut self, round: &RoundState) -> UserAction {
        self.show_round(round);
        self.state = TuiState::EnteringGuess;
        self.status = "Waiting for guess...".to_string();

        let action = self.prompt_loop(UserAction::Exit, |tui, key| {
            Self::guess_key(&mut tui.current_input, key)
        });
        if let UserAction::Guess(ref guess) = action {
            self.pending_guess = Some(guess.clone());
        }
        action
    }

    fn display_guess_result(&mut self, outcome: &GuessOutcome) {
        let guess = self.pending_guess.take().unwrap_or_default();
        self.error_message = match outcome {
            GuessOutcome::InvalidInput(err) => format!("Wrong input! {err}"),
            _ => String::new(),
        };
        self.history.push((guess, *outcome));
        self.draw_or_log();
    }

    fn display_round_over(&mut self, round: &RoundState) {
        self.word = masked(round.word(), &RevealSet::full(round.word()));
        self.remaining_errors = round.remaining_errors();
        self.state = TuiState::RoundOver {
            won: round.status() == RoundStatus::Won,
        };
        self.status = format!("Game over - the word was \"{}\"", round.word());
        self.draw_or_log();
    }

    fn read_replay(&mut self) -> UserAction {
        self.prompt_loop(UserAction::Exit, |_, key| Step::Done(Self::replay_key(key)))
    }

    fn display_new_game_message(&mut self) {
        self.history.clear();
        self.current_input.clear();
        self.pending_guess = None;
        self.error_message.clear();
        self.message = "New word drawn".to_string();
        self.status = "New game - guess a letter".to_string();
        self.state = TuiState::EnteringGuess;
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GuessError;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render_to_string(ctx: &RenderContext) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| TuiInterface::render_static(f, ctx))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_level_keys() {
        assert_eq!(
            TuiInterface::level_key(&key(KeyCode::Char('1'))),
            Step::Done(Some(Difficulty::Beginner))
        );
        assert_eq!(
            TuiInterface::level_key(&key(KeyCode::Char('2'))),
            Step::Done(Some(Difficulty::Moderate))
        );
        assert_eq!(
            TuiInterface::level_key(&key(KeyCode::Char('x'))),
            Step::Done(Some(Difficulty::Hard))
        );
        assert_eq!(TuiInterface::level_key(&key(KeyCode::Esc)), Step::Done(None));
        assert_eq!(TuiInterface::level_key(&key(KeyCode::Left)), Step::Continue);
    }

    #[test]
    fn test_guess_keys_build_and_submit_input() {
        let mut input = String::new();
        assert_eq!(
            TuiInterface::guess_key(&mut input, &key(KeyCode::Char('a'))),
            Step::Continue
        );
        assert_eq!(
            TuiInterface::guess_key(&mut input, &key(KeyCode::Char('b'))),
            Step::Continue
        );
        assert_eq!(
            TuiInterface::guess_key(&mut input, &key(KeyCode::Backspace)),
            Step::Continue
        );
        assert_eq!(
            TuiInterface::guess_key(&mut input, &key(KeyCode::Enter)),
            Step::Done(UserAction::Guess("a".to_string()))
        );
        assert!(input.is_empty());
    }

    #[test]
    fn test_guess_enter_on_empty_input_submits_empty_guess() {
        let mut input = String::new();
        assert_eq!(
            TuiInterface::guess_key(&mut input, &key(KeyCode::Enter)),
            Step::Done(UserAction::Guess(String::new()))
        );
    }

    #[test]
    fn test_guess_keys_ignore_modified_chars_and_exit() {
        let mut input = String::new();
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(TuiInterface::guess_key(&mut input, &ctrl_a), Step::Continue);
        assert!(input.is_empty());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            TuiInterface::guess_key(&mut input, &ctrl_c),
            Step::Done(UserAction::Exit)
        );
        assert_eq!(
            TuiInterface::guess_key(&mut input, &key(KeyCode::Esc)),
            Step::Done(UserAction::Exit)
        );
    }

    #[test]
    fn test_guess_input_is_capped() {
        let mut input = String::new();
        for _ in 0..(MAX_INPUT_LEN + 5) {
            TuiInterface::guess_key(&mut input, &key(KeyCode::Char('z')));
        }
        assert_eq!(input.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_replay_keys() {
        assert_eq!(
            TuiInterface::replay_key(&key(KeyCode::Char('1'))),
            UserAction::NewGame
        );
        assert_eq!(
            TuiInterface::replay_key(&key(KeyCode::Char('n'))),
            UserAction::Exit
        );
        assert_eq!(TuiInterface::replay_key(&key(KeyCode::Enter)), UserAction::Exit);
    }

    #[test]
    fn test_render_in_progress_round() {
        let word = vec![Some('c'), None, None];
        let history = vec![
            ("c".to_string(), GuessOutcome::Hit { revealed: 1 }),
            (
                "!".to_string(),
                GuessOutcome::InvalidInput(GuessError::NotAlphanumeric('!')),
            ),
        ];
        let ctx = RenderContext {
            state: TuiState::EnteringGuess,
            word: &word,
            remaining_errors: 2,
            current_input: "a",
            history: &history,
            message: "",
            error_message: "",
            status: "Waiting for guess...",
        };

        let screen = render_to_string(&ctx);
        assert!(screen.contains("HANGMAN"));
        assert!(screen.contains(" c "));
        assert!(screen.contains(" _ "));
        assert!(screen.contains("2 mistakes still allowed"));
        assert!(screen.contains("Correct!"));
        assert!(screen.contains("Wrong input!"));
        assert!(screen.contains("Waiting for guess..."));
    }

    #[test]
    fn test_render_round_over() {
        let word = vec![Some('h'), Some('i')];
        let ctx = RenderContext {
            state: TuiState::RoundOver { won: false },
            word: &word,
            remaining_errors: 0,
            current_input: "",
            history: &[],
            message: "",
            error_message: "",
            status: "",
        };

        let screen = render_to_string(&ctx);
        assert!(screen.contains("You lose!"));
        assert!(screen.contains("1: Play again"));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn test_level_menu_matches_level_keys() {
        assert_eq!(
            TuiInterface::level_menu(),
            "1: Beginner | 2: Moderate | 3: Hard | ESC: Quit"
        );
        for difficulty in [Difficulty::Beginner, Difficulty::Moderate, Difficulty::Hard] {
            let digit = char::from(b'0' + difficulty.level());
            assert_eq!(
                TuiInterface::level_key(&key(KeyCode::Char(digit))),
                Step::Done(Some(difficulty))
            );
        }
    }

    #[test]
    fn test_word_spans_keep_spaces_unstyled() {
        let spans = TuiInterface::word_spans(&[Some('a'), Some(' '), None]);
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "   a       _  ");
    }
}
