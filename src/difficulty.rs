use clap::ValueEnum;
use std::fmt;

/// How much of the word is uncovered before the first guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    /// 30% of the letters start visible.
    Beginner,
    /// 15% of the letters start visible.
    Moderate,
    /// Every letter starts hidden.
    #[default]
    Hard,
}

impl Difficulty {
    /// Share of the word revealed up front, in whole percent.
    #[must_use]
    pub const fn reveal_percent(self) -> usize {
        match self {
            Self::Beginner => 30,
            Self::Moderate => 15,
            Self::Hard => 0,
        }
    }

    /// `ceil(len * percent / 100)` in integer arithmetic.
    #[must_use]
    pub const fn initial_reveal_count(self, len: usize) -> usize {
        (len * self.reveal_percent()).div_ceil(100)
    }

    /// Menu number shown at the level prompt.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Moderate => 2,
            Self::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Beginner => "Beginner",
            Self::Moderate => "Moderate",
            Self::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Interprets an answer to the level prompt.
///
/// Leading whitespace and one leading `+` are ignored and only the leading
/// run of digits counts, so `"2"`, `" 2 "`, `"+2"` and `"2nd"` all pick
/// Moderate. Anything that does not
/// name level 1, 2 or 3 falls back to [`Difficulty::Hard`].
#[must_use]
pub fn parse_level(input: &str) -> Difficulty {
    let trimmed = input.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();

    match digits.parse::<u64>() {
        Ok(1) => Difficulty::Beginner,
        Ok(2) => Difficulty::Moderate,
        _ => Difficulty::Hard,
    }
}
