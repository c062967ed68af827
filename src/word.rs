use std::fmt;

/// A word or phrase to be guessed. Positions index characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    chars: Vec<char>,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        Self { text, chars }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[must_use]
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// Spaces separate the parts of a phrase and are never hidden.
    #[must_use]
    pub fn is_space(&self, index: usize) -> bool {
        self.char_at(index) == Some(' ')
    }

    /// Positions the player actually has to uncover.
    pub fn letter_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len()).filter(|&i| !self.is_space(i))
    }

    #[must_use]
    pub fn non_space_len(&self) -> usize {
        self.letter_positions().count()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Word {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Word {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
