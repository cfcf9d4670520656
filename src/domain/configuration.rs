//! Generation configuration types.
//!
//! A `GenerationConfiguration` is the caller-supplied description of the code shape.
//! It carries no invariants of its own; the configurator builder decides whether it is
//! usable.

use serde::{Deserialize, Serialize};

/// Named character pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterSet {
    /// `a-z`.
    Lowercase,
    /// `A-Z`.
    Uppercase,
    /// `0-9`.
    Digits,
    /// Punctuation safe to read aloud and to embed in URLs.
    Symbols,
}

impl CharacterSet {
    /// Characters of this set, in canonical order.
    #[must_use]
    pub const fn characters(self) -> &'static str {
        match self {
            Self::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            Self::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::Digits => "0123456789",
            Self::Symbols => "!#$%&*+-=?@^_",
        }
    }
}

impl std::fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lowercase => write!(f, "lowercase"),
            Self::Uppercase => write!(f, "uppercase"),
            Self::Digits => write!(f, "digits"),
            Self::Symbols => write!(f, "symbols"),
        }
    }
}

/// Configuration for a code generation batch.
///
/// Pattern syntax (used instead of `length` when `pattern` is set):
/// - `{RAND:N}` - N characters from the configured alphabet
/// - `{DIGIT:N}` - N digits
/// - `{ALPHA:N}` - N uppercase letters
/// - `{HEX:N}` - N uppercase hexadecimal digits
///
/// Any other text is copied literally. `excluded_characters` applies to every pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfiguration {
    /// Number of alphabet characters in the code body.
    pub length: usize,

    /// Character sets forming the alphabet.
    pub character_sets: Vec<CharacterSet>,

    /// Additional characters appended to the alphabet.
    pub extra_characters: String,

    /// Characters removed from every pool.
    pub excluded_characters: String,

    /// Literal text placed before the body.
    pub prefix: String,

    /// Literal text placed after the body.
    pub suffix: String,

    /// Template for the body.
    /// Example: "SUMMER-{ALPHA:2}{DIGIT:4}"
    pub pattern: Option<String>,
}

impl GenerationConfiguration {
    /// Compute the alphabet: character sets in declaration order, then extra
    /// characters, first occurrence wins, excluded characters removed.
    #[must_use]
    pub fn alphabet(&self) -> Vec<char> {
        let mut alphabet: Vec<char> = Vec::new();
        let candidates = self
            .character_sets
            .iter()
            .flat_map(|set| set.characters().chars())
            .chain(self.extra_characters.chars());

        for c in candidates {
            if !self.is_excluded(c) && !alphabet.contains(&c) {
                alphabet.push(c);
            }
        }

        alphabet
    }

    /// Check whether a character is excluded from every pool.
    #[must_use]
    pub fn is_excluded(&self, c: char) -> bool {
        self.excluded_characters.contains(c)
    }
}

impl Default for GenerationConfiguration {
    fn default() -> Self {
        Self {
            length: 8,
            character_sets: vec![CharacterSet::Uppercase, CharacterSet::Digits],
            extra_characters: String::new(),
            excluded_characters: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            pattern: None,
        }
    }
}
