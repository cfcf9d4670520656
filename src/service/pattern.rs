//! Pattern parser for templated codes.
//!
//! Parses pattern strings like "SUMMER-{ALPHA:2}{DIGIT:4}" into placeholders that the
//! configurator builder turns into layout segments. `{{` and `}}` stand for literal
//! braces.

/// Parsed placeholder in a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// Literal text.
    Literal(String),
    /// Characters from the configured alphabet.
    Random(u8),
    /// Decimal digits.
    Digit(u8),
    /// Uppercase letters.
    Alpha(u8),
    /// Uppercase hexadecimal digits.
    Hex(u8),
}

/// Maximum width of a single placeholder.
const MAX_PLACEHOLDER_WIDTH: u8 = 32;

/// Parsed pattern.
#[derive(Debug, Clone)]
pub struct ParsedPattern {
    /// Pattern parts.
    parts: Vec<Placeholder>,
}

impl ParsedPattern {
    /// Parse a pattern string.
    ///
    /// # Errors
    ///
    /// Returns a message if a placeholder is unclosed or unknown, if its width is outside
    /// `1..=32`, or if a `}` is unmatched.
    pub fn parse(pattern: &str) -> Result<Self, String> {
        let mut parts = Vec::new();
        let mut chars = pattern.chars().peekable();
        let mut literal = String::new();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.next_if_eq(&'{').is_some() => literal.push('{'),
                '}' if chars.next_if_eq(&'}').is_some() => literal.push('}'),
                '}' => return Err("unmatched `}` (use `}}` for a literal brace)".to_string()),
                '{' => {
                    if !literal.is_empty() {
                        parts.push(Placeholder::Literal(std::mem::take(&mut literal)));
                    }

                    let mut placeholder = String::new();
                    let mut found_close = false;

                    for inner in chars.by_ref() {
                        if inner == '}' {
                            found_close = true;
                            break;
                        }
                        placeholder.push(inner);
                    }

                    if !found_close {
                        return Err("unclosed placeholder".to_string());
                    }

                    parts.push(parse_placeholder(&placeholder)?);
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            parts.push(Placeholder::Literal(literal));
        }

        Ok(Self { parts })
    }

    /// Pattern parts, in order.
    #[must_use]
    pub fn parts(&self) -> &[Placeholder] {
        &self.parts
    }

    /// Length in characters of every code the pattern renders.
    #[must_use]
    pub fn rendered_len(&self) -> usize {
        self.parts
            .iter()
            .map(|part| match part {
                Placeholder::Literal(text) => text.chars().count(),
                Placeholder::Random(width)
                | Placeholder::Digit(width)
                | Placeholder::Alpha(width)
                | Placeholder::Hex(width) => usize::from(*width),
            })
            .sum()
    }

    /// Whether the pattern draws from the configured alphabet.
    #[must_use]
    pub fn uses_alphabet(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, Placeholder::Random(_)))
    }
}

/// Parse a placeholder string.
fn parse_placeholder(placeholder: &str) -> Result<Placeholder, String> {
    let (kind, width) = placeholder
        .split_once(':')
        .ok_or_else(|| format!("unknown placeholder: {{{placeholder}}}"))?;

    let n: u8 = width
        .parse()
        .map_err(|_| format!("invalid width in {{{placeholder}}}: {width}"))?;
    if n == 0 || n > MAX_PLACEHOLDER_WIDTH {
        return Err(format!(
            "width must be 1-{MAX_PLACEHOLDER_WIDTH}, got {n} in {{{placeholder}}}"
        ));
    }

    match kind {
        "RAND" => Ok(Placeholder::Random(n)),
        "DIGIT" => Ok(Placeholder::Digit(n)),
        "ALPHA" => Ok(Placeholder::Alpha(n)),
        "HEX" => Ok(Placeholder::Hex(n)),
        _ => Err(format!("unknown placeholder: {{{placeholder}}}")),
    }
}
