//! Tokens, alphabets and sequences
//!
//! A token is one symbolic button (a colour, a planet, a note). Tokens are
//! plain indices into an [`Alphabet`]; the view layer decides how to draw them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ConfigError;

/// Smallest alphabet that still makes a memory game
pub const MIN_ALPHABET_SIZE: u8 = 2;

/// Largest supported alphabet
pub const MAX_ALPHABET_SIZE: u8 = 16;

/// Inline capacity for sequences (covers every default length cap)
pub const INLINE_SEQUENCE_LEN: usize = 16;

/// Ordered list of tokens to memorize and reproduce
pub type Sequence = SmallVec<[Token; INLINE_SEQUENCE_LEN]>;

/// One symbolic unit of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub u8);

impl Token {
    /// Index of this token within its alphabet
    pub fn index(self) -> u8 {
        self.0
    }

    /// Letter label (`A`, `B`, ...) used by text front-ends
    pub fn label(self) -> char {
        (b'A' + self.0.min(25)) as char
    }

    /// Parse a letter label back into a token (case-insensitive)
    pub fn from_label(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Token(upper as u8 - b'A'))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fixed token alphabet `[0, size)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    size: u8,
}

impl Alphabet {
    /// Create an alphabet with `size` symbols
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlphabetSize`] if `size` is outside
    /// [`MIN_ALPHABET_SIZE`]..=[`MAX_ALPHABET_SIZE`].
    pub fn new(size: u8) -> Result<Self, ConfigError> {
        if !(MIN_ALPHABET_SIZE..=MAX_ALPHABET_SIZE).contains(&size) {
            return Err(ConfigError::AlphabetSize(size));
        }
        Ok(Self { size })
    }

    /// Number of symbols
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether `token` belongs to this alphabet
    pub fn contains(&self, token: Token) -> bool {
        token.0 < self.size
    }

    /// Iterate over every token in order
    pub fn tokens(&self) -> impl Iterator<Item = Token> + use<> {
        (0..self.size).map(Token)
    }
}

impl Default for Alphabet {
    /// Classic four-button layout
    fn default() -> Self {
        Self { size: 4 }
    }
}

/// Render a sequence as letters, e.g. `ABA`
pub fn format_sequence(sequence: &[Token]) -> String {
    sequence.iter().map(|t| t.label()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_bounds() {
        assert!(Alphabet::new(1).is_err());
        assert!(Alphabet::new(17).is_err());
        assert_eq!(Alphabet::new(3).unwrap().size(), 3);
        assert_eq!(Alphabet::new(16).unwrap().size(), 16);
    }

    #[test]
    fn test_alphabet_contains() {
        let alphabet = Alphabet::new(3).unwrap();
        assert!(alphabet.contains(Token(0)));
        assert!(alphabet.contains(Token(2)));
        assert!(!alphabet.contains(Token(3)));
        assert_eq!(alphabet.tokens().count(), 3);
    }

    #[test]
    fn test_token_labels() {
        assert_eq!(Token(0).label(), 'A');
        assert_eq!(Token(2).label(), 'C');
        assert_eq!(Token::from_label('b'), Some(Token(1)));
        assert_eq!(Token::from_label('?'), None);
        assert_eq!(format_sequence(&[Token(0), Token(1), Token(0)]), "ABA");
    }
}
