//! Configurator builders.
//!
//! Turns a caller-supplied `GenerationConfiguration` into the `Configurator` that
//! generators draw from.

use std::sync::Arc;

use crate::domain::{CharacterSet, Configurator, GenerationConfiguration, Segment};
use crate::error::{GenerationError, GenerationResult};
use crate::service::pattern::{ParsedPattern, Placeholder};

/// Maximum body length, for both length-based and pattern-based configurations.
pub const MAX_CODE_LENGTH: usize = 64;

/// Builds configurators from configurations.
pub trait ConfiguratorBuilder: Send + Sync {
    /// Build a configurator.
    ///
    /// Must be deterministic for a given configuration.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Configuration` if the configuration is structurally
    /// invalid for this builder.
    fn build(&self, configuration: &GenerationConfiguration) -> GenerationResult<Configurator>;
}

/// Builder for prefix + body + suffix layouts, where the body is either `length`
/// alphabet characters or a parsed pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeConfiguratorBuilder;

impl CodeConfiguratorBuilder {
    /// Create a new builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn length_body(
        configuration: &GenerationConfiguration,
        segments: &mut Vec<Segment>,
    ) -> GenerationResult<()> {
        if configuration.length == 0 {
            return Err(invalid("length must be at least 1"));
        }
        if configuration.length > MAX_CODE_LENGTH {
            return Err(invalid(format!(
                "length cannot exceed {MAX_CODE_LENGTH}, got {}",
                configuration.length
            )));
        }

        let alphabet = alphabet_pool(configuration)?;
        segments.extend((0..configuration.length).map(|_| Segment::Slot(Arc::clone(&alphabet))));
        Ok(())
    }

    fn pattern_body(
        configuration: &GenerationConfiguration,
        pattern: &str,
        segments: &mut Vec<Segment>,
    ) -> GenerationResult<()> {
        let parsed = ParsedPattern::parse(pattern).map_err(invalid)?;
        if parsed.rendered_len() > MAX_CODE_LENGTH {
            return Err(invalid(format!(
                "pattern renders codes longer than {MAX_CODE_LENGTH} characters, got {}",
                parsed.rendered_len()
            )));
        }

        let alphabet = if parsed.uses_alphabet() {
            Some(alphabet_pool(configuration)?)
        } else {
            None
        };

        for part in parsed.parts() {
            let (pool, width) = match part {
                Placeholder::Literal(text) => {
                    segments.push(Segment::literal(text.clone()));
                    continue;
                }
                Placeholder::Random(width) => match &alphabet {
                    Some(pool) => (Arc::clone(pool), *width),
                    None => return Err(invalid("alphabet is empty")),
                },
                Placeholder::Digit(width) => (
                    filtered_pool(configuration, "DIGIT", CharacterSet::Digits.characters())?,
                    *width,
                ),
                Placeholder::Alpha(width) => (
                    filtered_pool(configuration, "ALPHA", CharacterSet::Uppercase.characters())?,
                    *width,
                ),
                Placeholder::Hex(width) => (
                    filtered_pool(configuration, "HEX", "0123456789ABCDEF")?,
                    *width,
                ),
            };
            segments.extend((0..width).map(|_| Segment::Slot(Arc::clone(&pool))));
        }

        Ok(())
    }
}

impl ConfiguratorBuilder for CodeConfiguratorBuilder {
    fn build(&self, configuration: &GenerationConfiguration) -> GenerationResult<Configurator> {
        let mut segments = Vec::new();

        if !configuration.prefix.is_empty() {
            segments.push(Segment::literal(configuration.prefix.clone()));
        }

        match configuration.pattern.as_deref() {
            Some(pattern) => Self::pattern_body(configuration, pattern, &mut segments)?,
            None => Self::length_body(configuration, &mut segments)?,
        }

        if !configuration.suffix.is_empty() {
            segments.push(Segment::literal(configuration.suffix.clone()));
        }

        Configurator::new(segments)
    }
}

fn invalid(message: impl Into<String>) -> GenerationError {
    GenerationError::Configuration(message.into())
}

/// Shared alphabet pool, rejecting an empty alphabet.
fn alphabet_pool(configuration: &GenerationConfiguration) -> GenerationResult<Arc<[char]>> {
    let alphabet = configuration.alphabet();
    if alphabet.is_empty() {
        return Err(invalid(
            "alphabet is empty; add character sets or extra characters",
        ));
    }
    Ok(alphabet.into())
}

/// Fixed pool with excluded characters removed, rejecting an empty result.
fn filtered_pool(
    configuration: &GenerationConfiguration,
    name: &str,
    characters: &str,
) -> GenerationResult<Arc<[char]>> {
    let pool: Vec<char> = characters
        .chars()
        .filter(|c| !configuration.is_excluded(*c))
        .collect();
    if pool.is_empty() {
        return Err(invalid(format!("every {name} character is excluded")));
    }
    Ok(pool.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(configuration: &GenerationConfiguration) -> GenerationResult<Configurator> {
        CodeConfiguratorBuilder::new().build(configuration)
    }

    #[test]
    fn test_default_configuration() {
        let configurator = build(&GenerationConfiguration::default()).unwrap();
        assert_eq!(configurator.slot_count(), 8);
        assert_eq!(configurator.max_quantity(), 36u128.pow(8));
    }

    #[test]
    fn test_prefix_and_suffix_do_not_change_capacity() {
        let configuration = GenerationConfiguration {
            length: 3,
            character_sets: vec![CharacterSet::Digits],
            prefix: "VIP-".to_string(),
            suffix: "-X".to_string(),
            ..Default::default()
        };
        let configurator = build(&configuration).unwrap();
        assert_eq!(configurator.max_quantity(), 1000);
        assert_eq!(configurator.code_at(7), "VIP-007-X");
    }

    #[test]
    fn test_pattern_capacity() {
        let configuration = GenerationConfiguration {
            pattern: Some("SUMMER-{ALPHA:2}{DIGIT:3}".to_string()),
            excluded_characters: "O".to_string(),
            ..Default::default()
        };
        let configurator = build(&configuration).unwrap();
        assert_eq!(configurator.max_quantity(), 25 * 25 * 1000);
        assert_eq!(configurator.code_at(0), "SUMMER-AA000");
    }

    #[test]
    fn test_pattern_ignores_empty_alphabet_when_unused() {
        let configuration = GenerationConfiguration {
            character_sets: Vec::new(),
            pattern: Some("{DIGIT:2}".to_string()),
            ..Default::default()
        };
        assert_eq!(build(&configuration).unwrap().max_quantity(), 100);
    }

    #[test]
    fn test_invalid_configurations() {
        let zero_length = GenerationConfiguration {
            length: 0,
            ..Default::default()
        };
        assert!(matches!(
            build(&zero_length),
            Err(GenerationError::Configuration(_))
        ));

        let too_long = GenerationConfiguration {
            length: MAX_CODE_LENGTH + 1,
            ..Default::default()
        };
        assert!(build(&too_long).is_err());

        let empty_alphabet = GenerationConfiguration {
            character_sets: vec![CharacterSet::Digits],
            excluded_characters: "0123456789".to_string(),
            ..Default::default()
        };
        assert!(build(&empty_alphabet).is_err());

        let bad_pattern = GenerationConfiguration {
            pattern: Some("{NOPE:3}".to_string()),
            ..Default::default()
        };
        assert!(build(&bad_pattern).is_err());

        let excluded_pool = GenerationConfiguration {
            pattern: Some("{DIGIT:2}".to_string()),
            excluded_characters: "0123456789".to_string(),
            ..Default::default()
        };
        assert!(build(&excluded_pool).is_err());
    }

    #[test]
    fn test_pattern_length_is_capped() {
        let oversized = GenerationConfiguration {
            pattern: Some("{RAND:32}".repeat(1000)),
            ..Default::default()
        };
        assert!(matches!(
            build(&oversized),
            Err(GenerationError::Configuration(message)) if message.contains("longer than 64")
        ));

        let literal_overflow = GenerationConfiguration {
            pattern: Some(format!("{}{{DIGIT:1}}", "X".repeat(MAX_CODE_LENGTH))),
            ..Default::default()
        };
        assert!(build(&literal_overflow).is_err());

        let at_limit = GenerationConfiguration {
            pattern: Some("{RAND:32}{RAND:32}".to_string()),
            ..Default::default()
        };
        assert_eq!(build(&at_limit).unwrap().slot_count(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_build_is_deterministic() {
        let configuration = GenerationConfiguration {
            pattern: Some("A{RAND:2}-{HEX:2}".to_string()),
            ..Default::default()
        };
        assert_eq!(build(&configuration), build(&configuration));
    }
}
