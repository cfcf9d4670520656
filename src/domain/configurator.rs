//! Built, immutable generation constraints.
//!
//! A `Configurator` is an ordered list of segments. Literal segments are copied as-is;
//! slot segments emit exactly one character from their pool. The code space is the
//! cartesian product of all slot pools, so its size is known exactly.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{GenerationError, GenerationResult};

/// One part of a code layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Literal(String),
    /// One character drawn from a non-empty pool.
    Slot(Arc<[char]>),
}

impl Segment {
    /// Create a literal segment.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Create a slot segment from a pool of characters.
    pub fn slot(pool: impl IntoIterator<Item = char>) -> Self {
        Self::Slot(pool.into_iter().collect())
    }
}

/// Effective constraints derived from a `GenerationConfiguration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configurator {
    segments: Vec<Segment>,
    max_quantity: u128,
}

impl Configurator {
    /// Create a configurator from its segments.
    ///
    /// Repeated characters in a slot pool are collapsed to their first occurrence, so
    /// `max_quantity` counts distinct codes only.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Configuration` if a slot has an empty pool.
    pub fn new(segments: Vec<Segment>) -> GenerationResult<Self> {
        let mut max_quantity: u128 = 1;
        let mut normalized = Vec::with_capacity(segments.len());

        for (position, segment) in segments.into_iter().enumerate() {
            let segment = match segment {
                Segment::Slot(pool) => {
                    let pool = distinct(pool);
                    if pool.is_empty() {
                        return Err(GenerationError::Configuration(format!(
                            "segment {position} has an empty character pool"
                        )));
                    }
                    // Saturation only kicks in far beyond any feasible batch size.
                    max_quantity = max_quantity.saturating_mul(pool.len() as u128);
                    Segment::Slot(pool)
                }
                literal @ Segment::Literal(_) => literal,
            };
            normalized.push(segment);
        }

        Ok(Self {
            segments: normalized,
            max_quantity,
        })
    }

    /// Number of distinct codes this layout can produce.
    #[must_use]
    pub const fn max_quantity(&self) -> u128 {
        self.max_quantity
    }

    /// Number of slot segments.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots().count()
    }

    /// Iterate over slot pools, in order.
    pub fn slots(&self) -> impl DoubleEndedIterator<Item = &[char]> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(pool) => Some(&**pool),
            Segment::Literal(_) => None,
        })
    }

    /// Render a code, asking `pick` for the character of each slot.
    pub fn render(&self, mut pick: impl FnMut(&[char]) -> char) -> String {
        let mut code = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => code.push_str(text),
                Segment::Slot(pool) => code.push(pick(&pool[..])),
            }
        }

        code
    }

    /// Render the code at `index` in the mixed-radix enumeration of the code space.
    ///
    /// The last slot varies fastest. Indexes at or beyond `max_quantity` wrap around.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // remainder is below the pool length
    pub fn code_at(&self, index: u128) -> String {
        let mut remaining = index;
        let mut picks: Vec<char> = self
            .slots()
            .rev()
            .map(|pool| {
                let radix = pool.len() as u128;
                let digit = (remaining % radix) as usize;
                remaining /= radix;
                pool[digit]
            })
            .collect();
        picks.reverse();

        let mut picks = picks.into_iter();
        self.render(|pool| picks.next().unwrap_or(pool[0]))
    }
}

/// Pool with repeated characters removed, keeping first-seen order.
fn distinct(pool: Arc<[char]>) -> Arc<[char]> {
    let mut seen = HashSet::with_capacity(pool.len());
    if pool.iter().all(|c| seen.insert(*c)) {
        return pool;
    }

    seen.clear();
    pool.iter().copied().filter(|c| seen.insert(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Configurator {
        Configurator::new(vec![
            Segment::literal("X-"),
            Segment::slot("AB".chars()),
            Segment::slot("01".chars()),
        ])
        .unwrap()
    }

    #[test]
    fn test_max_quantity_is_product_of_pools() {
        assert_eq!(two_by_two().max_quantity(), 4);
        assert_eq!(two_by_two().slot_count(), 2);
    }

    #[test]
    fn test_literal_only_layout_has_one_code() {
        let configurator = Configurator::new(vec![Segment::literal("FIXED")]).unwrap();
        assert_eq!(configurator.max_quantity(), 1);
        assert_eq!(configurator.code_at(0), "FIXED");
    }

    #[test]
    fn test_empty_pool_rejected() {
        let result = Configurator::new(vec![Segment::slot(std::iter::empty())]);
        assert!(matches!(result, Err(GenerationError::Configuration(_))));
    }

    #[test]
    fn test_repeated_pool_characters_collapse() {
        let configurator = Configurator::new(vec![
            Segment::slot("AAB".chars()),
            Segment::slot("0".chars()),
        ])
        .unwrap();

        assert_eq!(configurator.max_quantity(), 2);
        let pools: Vec<&[char]> = configurator.slots().collect();
        assert_eq!(pools, vec![&['A', 'B'][..], &['0'][..]]);
        assert_eq!(configurator.code_at(1), "B0");
        assert_eq!(configurator.code_at(2), "A0");
    }

    #[test]
    fn test_code_at_enumerates_whole_space() {
        let configurator = two_by_two();
        let codes: Vec<String> = (0..4).map(|i| configurator.code_at(i)).collect();
        assert_eq!(codes, vec!["X-A0", "X-A1", "X-B0", "X-B1"]);
        assert_eq!(configurator.code_at(4), "X-A0");
    }

    #[test]
    fn test_max_quantity_saturates() {
        let pool: Vec<char> = ('a'..='z').collect();
        let segments = (0..40).map(|_| Segment::slot(pool.clone())).collect();
        let configurator = Configurator::new(segments).unwrap();
        assert_eq!(configurator.max_quantity(), u128::MAX);
    }

    #[test]
    fn test_render_uses_pick_per_slot() {
        let code = two_by_two().render(|pool| pool[pool.len() - 1]);
        assert_eq!(code, "X-B1");
    }
}
