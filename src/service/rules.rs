//! Built-in code validators.

use serde::{Deserialize, Serialize};

use crate::service::validator::CodeValidator;

/// Options for [`DenylistValidator`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenylistOptions {
    /// Words a code must not contain.
    pub words: Vec<String>,

    /// Match words with exact case.
    pub case_sensitive: bool,
}

/// Rejects codes containing a denied word.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenylistValidator;

impl CodeValidator for DenylistValidator {
    type Options = DenylistOptions;

    fn check_options(&self, options: &DenylistOptions) -> Result<(), String> {
        if options.words.iter().any(String::is_empty) {
            return Err("words cannot contain an empty string".to_string());
        }
        Ok(())
    }

    fn validate(&self, code: &str, options: &DenylistOptions) -> bool {
        if options.case_sensitive {
            return !options.words.iter().any(|word| code.contains(word.as_str()));
        }

        let code = code.to_lowercase();
        !options
            .words
            .iter()
            .any(|word| code.contains(&word.to_lowercase()))
    }
}

/// Options for [`RepetitionValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepetitionOptions {
    /// Longest allowed run of one character.
    pub max_consecutive: usize,
}

impl Default for RepetitionOptions {
    fn default() -> Self {
        Self { max_consecutive: 2 }
    }
}

/// Rejects codes with long runs of the same character, e.g. `AAA7`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepetitionValidator;

impl CodeValidator for RepetitionValidator {
    type Options = RepetitionOptions;

    fn check_options(&self, options: &RepetitionOptions) -> Result<(), String> {
        if options.max_consecutive == 0 {
            return Err("max_consecutive must be at least 1".to_string());
        }
        Ok(())
    }

    fn validate(&self, code: &str, options: &RepetitionOptions) -> bool {
        let mut previous = None;
        let mut run = 0;

        for c in code.chars() {
            if previous == Some(c) {
                run += 1;
            } else {
                previous = Some(c);
                run = 1;
            }
            if run > options.max_consecutive {
                return false;
            }
        }

        true
    }
}

/// Options for [`CompositionValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionOptions {
    /// Minimum number of ASCII letters.
    pub min_letters: usize,

    /// Minimum number of ASCII digits.
    pub min_digits: usize,
}

impl Default for CompositionOptions {
    fn default() -> Self {
        Self {
            min_letters: 1,
            min_digits: 1,
        }
    }
}

/// Rejects codes with too few letters or digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionValidator;

impl CodeValidator for CompositionValidator {
    type Options = CompositionOptions;

    fn validate(&self, code: &str, options: &CompositionOptions) -> bool {
        let letters = code.chars().filter(char::is_ascii_alphabetic).count();
        let digits = code.chars().filter(char::is_ascii_digit).count();
        letters >= options.min_letters && digits >= options.min_digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denylist() {
        let options = DenylistOptions {
            words: vec!["bad".to_string()],
            case_sensitive: false,
        };
        assert!(!DenylistValidator.validate("XBADX", &options));
        assert!(DenylistValidator.validate("XBAX", &options));

        let options = DenylistOptions {
            case_sensitive: true,
            ..options
        };
        assert!(DenylistValidator.validate("XBADX", &options));
        assert!(!DenylistValidator.validate("xbadx", &options));
    }

    #[test]
    fn test_denylist_rejects_empty_word() {
        let options = DenylistOptions {
            words: vec![String::new()],
            case_sensitive: false,
        };
        assert!(DenylistValidator.check_options(&options).is_err());
    }

    #[test]
    fn test_repetition() {
        let options = RepetitionOptions::default();
        assert!(RepetitionValidator.validate("AAB1", &options));
        assert!(!RepetitionValidator.validate("AAA1", &options));
        assert!(RepetitionValidator.validate("", &options));

        let strict = RepetitionOptions { max_consecutive: 1 };
        assert!(!RepetitionValidator.validate("AAB1", &strict));
        assert!(
            RepetitionValidator
                .check_options(&RepetitionOptions { max_consecutive: 0 })
                .is_err()
        );
    }

    #[test]
    fn test_composition() {
        let options = CompositionOptions::default();
        assert!(CompositionValidator.validate("A1", &options));
        assert!(!CompositionValidator.validate("AB", &options));
        assert!(!CompositionValidator.validate("12", &options));

        let relaxed = CompositionOptions {
            min_letters: 0,
            min_digits: 0,
        };
        assert!(CompositionValidator.validate("--", &relaxed));
    }
}
