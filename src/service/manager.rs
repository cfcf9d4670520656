//! Code generation manager.
//!
//! Drives the generate/deduplicate/validate loop that turns a configuration, a generator
//! alias, and a validator chain into a batch of unique accepted codes.

use std::sync::Arc;
use std::time::Instant;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, trace};

use crate::domain::GenerationConfiguration;
use crate::error::{GenerationError, GenerationResult};
use crate::service::configurator::{CodeConfiguratorBuilder, ConfiguratorBuilder};
use crate::service::generator::{GeneratorRegistry, RANDOM_GENERATOR};
use crate::service::validator::{RawOptions, ValidatorRegistry};

/// Quantity generated when the caller does not ask for one.
pub const DEFAULT_QUANTITY: u64 = 42;

/// Optional guards against a loop that cannot finish in practice.
///
/// The capacity check only proves the code space is large enough; a skewed generator
/// or a strict validator chain can still make progress arbitrarily slow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationLimits {
    /// Maximum number of candidates drawn (unbounded when `None`).
    pub max_attempts: Option<u64>,

    /// Instant after which generation gives up (unbounded when `None`).
    pub deadline: Option<Instant>,
}

/// Parameters of one generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Number of codes to generate.
    pub quantity: u64,

    /// Code shape; `None` uses `GenerationConfiguration::default()`.
    pub configuration: Option<GenerationConfiguration>,

    /// Generator alias.
    pub generator: String,

    /// Validator aliases with raw options, applied in insertion order.
    pub validators: IndexMap<String, RawOptions>,

    /// Loop guards.
    pub limits: GenerationLimits,
}

impl GenerationRequest {
    /// Create a request for `quantity` codes with every other parameter defaulted.
    #[must_use]
    pub fn new(quantity: u64) -> Self {
        Self {
            quantity,
            ..Self::default()
        }
    }

    /// Set the configuration.
    #[must_use]
    pub fn with_configuration(mut self, configuration: GenerationConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    /// Set the generator alias.
    #[must_use]
    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// Append a validator to the chain.
    #[must_use]
    pub fn with_validator(mut self, alias: impl Into<String>, options: RawOptions) -> Self {
        self.validators.insert(alias.into(), options);
        self
    }

    /// Set the loop guards.
    #[must_use]
    pub const fn with_limits(mut self, limits: GenerationLimits) -> Self {
        self.limits = limits;
        self
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            quantity: DEFAULT_QUANTITY,
            configuration: None,
            generator: RANDOM_GENERATOR.to_string(),
            validators: IndexMap::new(),
            limits: GenerationLimits::default(),
        }
    }
}

/// Orchestrates configurator building, generation, and validation.
///
/// Holds no per-call state; concurrent calls are independent.
#[derive(Clone)]
pub struct CodeGeneratorManager {
    configurator_builder: Arc<dyn ConfiguratorBuilder>,
    generator_registry: Arc<GeneratorRegistry>,
    validator_registry: Arc<ValidatorRegistry>,
}

impl CodeGeneratorManager {
    /// Create a new manager.
    #[must_use]
    pub fn new(
        configurator_builder: Arc<dyn ConfiguratorBuilder>,
        generator_registry: Arc<GeneratorRegistry>,
        validator_registry: Arc<ValidatorRegistry>,
    ) -> Self {
        Self {
            configurator_builder,
            generator_registry,
            validator_registry,
        }
    }

    /// Create a manager with the default builder and the given registries.
    #[must_use]
    pub fn with_registries(
        generator_registry: Arc<GeneratorRegistry>,
        validator_registry: Arc<ValidatorRegistry>,
    ) -> Self {
        Self::new(
            Arc::new(CodeConfiguratorBuilder::new()),
            generator_registry,
            validator_registry,
        )
    }

    /// Generator registry used by this manager.
    #[must_use]
    pub const fn generators(&self) -> &Arc<GeneratorRegistry> {
        &self.generator_registry
    }

    /// Validator registry used by this manager.
    #[must_use]
    pub const fn validators(&self) -> &Arc<ValidatorRegistry> {
        &self.validator_registry
    }

    /// Generate a batch of unique codes accepted by every requested validator.
    ///
    /// # Returns
    ///
    /// Exactly `request.quantity` codes, in generation order.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the configuration cannot be built
    /// - `InvalidConfiguration` if the quantity exceeds the code space
    /// - `UnknownGenerator`, `UnknownValidator`, or `InvalidOptions` before any
    ///   candidate is drawn
    /// - `Stalled` or `DeadlineExceeded` when a limit is hit
    pub fn generate(&self, request: GenerationRequest) -> GenerationResult<IndexSet<String>> {
        let GenerationRequest {
            quantity,
            configuration,
            generator: generator_alias,
            validators,
            limits,
        } = request;

        let configuration = configuration.unwrap_or_default();
        let configurator = self.configurator_builder.build(&configuration)?;

        // Never loop against a code space smaller than the batch
        if u128::from(quantity) > configurator.max_quantity() {
            return Err(GenerationError::InvalidConfiguration {
                requested: quantity,
                max_quantity: configurator.max_quantity(),
            });
        }

        let generator = self
            .generator_registry
            .get(&generator_alias)
            .ok_or_else(|| GenerationError::UnknownGenerator(generator_alias.clone()))?;
        let chain = self.validator_registry.resolve_all(&validators)?;

        debug!(
            quantity,
            generator = %generator_alias,
            validators = chain.len(),
            max_quantity = %configurator.max_quantity(),
            "Starting code generation"
        );

        let mut codes: IndexSet<String> =
            IndexSet::with_capacity(usize::try_from(quantity).unwrap_or(0).min(1 << 16));
        let mut attempts: u64 = 0;
        let mut duplicates: u64 = 0;
        let mut rejections: u64 = 0;

        while (codes.len() as u64) < quantity {
            if limits.max_attempts.is_some_and(|max| attempts >= max) {
                record_rejections(duplicates, rejections);
                return Err(GenerationError::Stalled {
                    attempts,
                    generated: codes.len() as u64,
                    requested: quantity,
                });
            }
            if limits.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                record_rejections(duplicates, rejections);
                return Err(GenerationError::DeadlineExceeded {
                    generated: codes.len() as u64,
                    requested: quantity,
                });
            }
            attempts += 1;

            let code = generator.generate(&configurator);

            if codes.contains(&code) {
                duplicates += 1;
                continue;
            }

            if let Some(validator) = chain.iter().find(|validator| !validator.validate(&code)) {
                trace!(%code, validator = validator.alias(), "Candidate rejected");
                rejections += 1;
                continue;
            }

            codes.insert(code);
        }

        record_rejections(duplicates, rejections);
        let generator_label = generator_alias.clone();
        metrics::counter!("codebuilder_codes_generated_total", "generator" => generator_label)
            .increment(quantity);
        #[allow(clippy::cast_precision_loss)]
        let attempts_recorded = attempts as f64;
        metrics::histogram!("codebuilder_generation_attempts").record(attempts_recorded);

        info!(
            quantity,
            attempts,
            duplicates,
            rejections,
            generator = %generator_alias,
            "Code generation complete"
        );

        Ok(codes)
    }
}

impl std::fmt::Debug for CodeGeneratorManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeGeneratorManager")
            .field("generator_registry", &self.generator_registry)
            .field("validator_registry", &self.validator_registry)
            .finish_non_exhaustive()
    }
}

fn record_rejections(duplicates: u64, rejections: u64) {
    metrics::counter!("codebuilder_candidates_rejected_total", "reason" => "duplicate")
        .increment(duplicates);
    metrics::counter!("codebuilder_candidates_rejected_total", "reason" => "validator")
        .increment(rejections);
}
