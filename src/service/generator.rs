//! Code generators and their registry.
//!
//! A generator produces one candidate code per call. It may repeat itself; the manager
//! enforces uniqueness within a batch.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::Rng;
use tracing::debug;

use crate::domain::Configurator;

/// Alias of the default generator.
pub const RANDOM_GENERATOR: &str = "random";

/// Alias of the enumerating generator.
pub const SEQUENTIAL_GENERATOR: &str = "sequential";

/// Code generation strategy.
pub trait CodeGenerator: Send + Sync {
    /// Produce one candidate code from the configurator's layout.
    fn generate(&self, configurator: &Configurator) -> String;
}

/// Fills every slot uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, configurator: &Configurator) -> String {
        let mut rng = rand::rng();
        configurator.render(|pool| pool[rng.random_range(0..pool.len())])
    }
}

/// Walks the code space in mixed-radix order.
///
/// The cursor is shared across calls, so consecutive batches continue where the
/// previous one stopped and wrap once the space is exhausted.
#[derive(Debug, Default)]
pub struct SequentialCodeGenerator {
    cursor: Mutex<u128>,
}

impl SequentialCodeGenerator {
    /// Create a generator starting at the first code.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a generator starting at `index`.
    #[must_use]
    pub const fn starting_at(index: u128) -> Self {
        Self {
            cursor: Mutex::new(index),
        }
    }
}

impl CodeGenerator for SequentialCodeGenerator {
    fn generate(&self, configurator: &Configurator) -> String {
        let index = {
            let mut cursor = self.cursor.lock();
            let index = cursor
                .checked_rem(configurator.max_quantity())
                .unwrap_or(0);
            *cursor = index.wrapping_add(1);
            index
        };
        configurator.code_at(index)
    }
}

/// Registry of generators by alias.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: RwLock<HashMap<String, Arc<dyn CodeGenerator>>>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the `random` and `sequential` generators.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(RANDOM_GENERATOR, RandomCodeGenerator);
        registry.register(SEQUENTIAL_GENERATOR, SequentialCodeGenerator::new());
        registry
    }

    /// Register a generator, replacing any generator under the same alias.
    pub fn register(&self, alias: impl Into<String>, generator: impl CodeGenerator + 'static) {
        let alias = alias.into();
        debug!(%alias, "Registering code generator");
        self.generators.write().insert(alias, Arc::new(generator));
    }

    /// Look up a generator.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<Arc<dyn CodeGenerator>> {
        self.generators.read().get(alias).cloned()
    }

    /// Check whether an alias is registered.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.generators.read().contains_key(alias)
    }

    /// Registered aliases, sorted.
    #[must_use]
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = self.generators.read().keys().cloned().collect();
        aliases.sort();
        aliases
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("aliases", &self.aliases())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Segment;

    fn digits(width: usize) -> Configurator {
        let segments = (0..width)
            .map(|_| Segment::slot("0123456789".chars()))
            .collect();
        Configurator::new(segments).unwrap()
    }

    #[test]
    fn test_random_generator_respects_layout() {
        let configurator = Configurator::new(vec![
            Segment::literal("GIFT-"),
            Segment::slot("AB".chars()),
            Segment::slot("AB".chars()),
        ])
        .unwrap();
        let generator = RandomCodeGenerator;

        for _ in 0..50 {
            let code = generator.generate(&configurator);
            assert_eq!(code.len(), 7);
            assert!(code.starts_with("GIFT-"));
            assert!(code[5..].chars().all(|c| c == 'A' || c == 'B'));
        }
    }

    #[test]
    fn test_sequential_generator_enumerates_and_wraps() {
        let configurator = digits(1);
        let generator = SequentialCodeGenerator::starting_at(8);

        let codes: Vec<String> = (0..4).map(|_| generator.generate(&configurator)).collect();
        assert_eq!(codes, vec!["8", "9", "0", "1"]);
    }

    #[test]
    fn test_sequential_generator_continues_across_calls() {
        let configurator = digits(2);
        let generator = SequentialCodeGenerator::new();

        assert_eq!(generator.generate(&configurator), "00");
        assert_eq!(generator.generate(&configurator), "01");
        assert_eq!(generator.generate(&configurator), "02");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = GeneratorRegistry::with_defaults();
        assert!(registry.get(RANDOM_GENERATOR).is_some());
        assert!(registry.get(SEQUENTIAL_GENERATOR).is_some());
        assert!(registry.get("nope").is_none());
        assert_eq!(registry.aliases(), vec!["random", "sequential"]);
    }

    #[test]
    fn test_registry_replaces_alias() {
        struct Constant;
        impl CodeGenerator for Constant {
            fn generate(&self, _configurator: &Configurator) -> String {
                "SAME".to_string()
            }
        }

        let registry = GeneratorRegistry::with_defaults();
        registry.register(RANDOM_GENERATOR, Constant);

        let generator = registry.get(RANDOM_GENERATOR).unwrap();
        assert_eq!(generator.generate(&digits(4)), "SAME");
    }
}
