// Integration tests for the hangman application
// These drive whole sessions through the CLI interface with scripted input

use hangman::cli::CliInterface;
use hangman::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;

fn run_session(words: &[Word], settings: SessionSettings, input: &str) -> (Result<usize, HangmanError>, String) {
    let mut interface = CliInterface::with_writer(Cursor::new(input), Vec::new()).colored(false);
    let mut rng = StdRng::seed_from_u64(2024);
    let result = game_loop(words, settings, &mut interface, &mut rng);
    let output = String::from_utf8(interface.into_writer()).unwrap();
    (result, output)
}

fn hard() -> SessionSettings {
    SessionSettings {
        difficulty: Difficulty::Hard,
        matching: Matching::CaseSensitive,
    }
}

#[test]
fn test_cat_round_won_with_one_mistake() {
    let words = load_wordbank_from_str("cat");
    let (result, output) = run_session(&words, hard(), "c\nz\na\nt\nq\n");

    assert_eq!(result.unwrap(), 1);
    assert!(output.contains("Your word: _ _ _"));
    assert!(output.contains("Your word: c _ _"));
    assert!(output.contains("Guess a letter (2 mistakes still allowed): "));
    assert!(output.contains("Your word: c a t"));
    assert!(output.contains("Game is over. You win!"));
    assert!(output.contains("Bye!"));
}

#[test]
fn test_cat_round_lost_after_three_misses() {
    let words = load_wordbank_from_str("cat");
    let (result, output) = run_session(&words, hard(), "x\ny\nz\n\n");

    assert_eq!(result.unwrap(), 1);
    assert_eq!(output.matches("Wrong guess! :(").count(), 3);
    assert!(output.contains("Guess a letter (1 mistake still allowed): "));
    assert!(output.contains("Your word: c a t"));
    assert!(output.contains("Game is over. You lose!"));
}

#[test]
fn test_invalid_inputs_cost_mistakes() {
    let words = load_wordbank_from_str("cat");
    let (_, output) = run_session(&words, hard(), "ca\n\n!\n");

    assert_eq!(
        output
            .matches("Wrong input! Only alphanumeric characters are allowed.")
            .count(),
        3
    );
    assert!(output.contains("You lose!"));
}

#[test]
fn test_replay_draws_another_round() {
    let words = load_wordbank_from_str("cat");
    let (result, output) = run_session(&words, hard(), "c\na\nt\n1\nx\ny\nz\n2\n");

    assert_eq!(result.unwrap(), 2);
    assert!(output.contains("You win!"));
    assert!(output.contains("You lose!"));
    assert_eq!(output.matches("Welcome to HANGMAN").count(), 1);
}

#[test]
fn test_end_of_input_mid_round_ends_session() {
    let words = load_wordbank_from_str("cat");
    let (result, output) = run_session(&words, hard(), "c\n");

    assert_eq!(result.unwrap(), 1);
    assert!(!output.contains("Game is over"));
    assert!(output.contains("Bye!"));
}

#[test]
fn test_phrase_spaces_are_shown_and_not_guessed() {
    let words = load_wordbank_from_str("hot dog");
    let (result, output) = run_session(&words, hard(), "h\no\nt\nd\ng\n");

    assert_eq!(result.unwrap(), 1);
    assert!(output.contains("Your word: _ _ _   _ _ _"));
    assert!(output.contains("Your word: h o t   d o g"));
    assert!(output.contains("You win!"));
}

#[test]
fn test_uppercase_guess_misses_without_ignore_case() {
    let words = load_wordbank_from_str("cat");
    let (_, output) = run_session(&words, hard(), "C\nA\nT\n");

    assert!(output.contains("You lose!"));
}

#[test]
fn test_uppercase_guess_hits_with_ignore_case() {
    let words = load_wordbank_from_str("cat");
    let settings = SessionSettings {
        difficulty: Difficulty::Hard,
        matching: Matching::IgnoreAsciiCase,
    };
    let (_, output) = run_session(&words, settings, "C\nA\nT\n");

    assert_eq!(output.matches("Correct! :)").count(), 3);
    assert!(output.contains("You win!"));
}

#[test]
fn test_beginner_reveals_before_first_guess() {
    let words = load_wordbank_from_str("elephant");
    let settings = SessionSettings {
        difficulty: Difficulty::Beginner,
        matching: Matching::CaseSensitive,
    };
    let (_, output) = run_session(&words, settings, "");

    let first_board = output
        .lines()
        .find(|line| line.starts_with("Your word: "))
        .unwrap();
    let hidden = first_board.matches('_').count();
    assert_eq!(hidden, 8 - 3);
}

#[test]
fn test_empty_wordbank_aborts_before_any_round() {
    let words = load_wordbank_from_str("# nothing here\n\n");
    let (result, output) = run_session(&words, hard(), "c\n");

    assert!(matches!(result, Err(HangmanError::EmptyWordList)));
    assert!(!output.contains("Your word"));
}

#[test]
fn test_guessing_every_distinct_letter_wins() {
    let mut rng = StdRng::seed_from_u64(17);
    for word in load_wordbank_from_str(EMBEDDED_WORDBANK) {
        let mut round = RoundState::start(word.clone(), Difficulty::Hard, Matching::CaseSensitive, &mut rng);
        let mut seen = Vec::new();
        for c in word.chars().iter().copied().filter(|c| *c != ' ') {
            if seen.contains(&c) {
                continue;
            }
            seen.push(c);
            let outcome = round.apply_guess(&c.to_string()).unwrap();
            assert!(matches!(outcome, GuessOutcome::Hit { .. }), "{word}: {c}");
        }
        assert_eq!(round.status(), RoundStatus::Won, "{word}");
        assert_eq!(round.errors(), 0);
    }
}

#[test]
fn test_custom_wordbank_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let wordbank_path = std::env::temp_dir().join("hangman_test_custom_wordbank.txt");
    {
        let mut file = File::create(&wordbank_path).unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "ox").unwrap();
    }

    let words = load_wordbank_from_file(&wordbank_path).unwrap();
    assert_eq!(words, vec![Word::new("ox")]);

    let (result, output) = run_session(&words, hard(), "o\nx\n");
    assert_eq!(result.unwrap(), 1);
    assert!(output.contains("Your word: o x"));

    std::fs::remove_file(&wordbank_path).unwrap();
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let words = load_wordbank_from_str(EMBEDDED_WORDBANK);
    let settings = SessionSettings {
        difficulty: Difficulty::Moderate,
        matching: Matching::CaseSensitive,
    };
    let (_, first) = run_session(&words, settings, "e\n");
    let (_, second) = run_session(&words, settings, "e\n");
    assert_eq!(first, second);
}
