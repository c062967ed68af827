use crate::error::HangmanError;
use crate::word::Word;
use rand::Rng;
use std::fs;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

/// Every letter must be guessable: ASCII letters and digits, words separated by single spaces.
fn is_playable(entry: &str) -> bool {
    entry
        .split(' ')
        .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn parse_entry(line: &str) -> Option<Word> {
    let entry = line.trim();
    if entry.is_empty() || entry.starts_with('#') {
        return None;
    }
    if !is_playable(entry) {
        log::warn!(
            "skipping word list entry {entry:?}: only letters, digits and single spaces are allowed"
        );
        return None;
    }
    Some(Word::new(entry))
}

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(parse_entry).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, HangmanError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| HangmanError::WordList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load_wordbank_from_str(&data))
}

/// Picks one entry uniformly at random.
pub fn select_random<'a, R: Rng + ?Sized>(
    words: &'a [Word],
    rng: &mut R,
) -> Result<&'a Word, HangmanError> {
    if words.is_empty() {
        return Err(HangmanError::EmptyWordList);
    }
    Ok(&words[rng.gen_range(0..words.len())])
}
