//! Service layer module.
//!
//! Contains the generation core: configurator building, generator and validator
//! strategies with their registries, and the manager driving the loop.

pub mod configurator;
pub mod generator;
pub mod manager;
pub mod pattern;
pub mod rules;
pub mod validator;

pub use configurator::{CodeConfiguratorBuilder, ConfiguratorBuilder};
pub use generator::{
    CodeGenerator, GeneratorRegistry, RANDOM_GENERATOR, RandomCodeGenerator,
    SEQUENTIAL_GENERATOR, SequentialCodeGenerator,
};
pub use manager::{CodeGeneratorManager, DEFAULT_QUANTITY, GenerationLimits, GenerationRequest};
pub use validator::{
    CodeValidator, DynCodeValidator, RawOptions, ResolvedValidator, ValidatorRegistry,
    resolve_options,
};
