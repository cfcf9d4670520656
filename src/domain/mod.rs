//! Domain models for CodeBuilder.
//!
//! This module contains the generation configuration, the configurator derived from it,
//! and the API contracts.

pub mod configuration;
pub mod configurator;
pub mod dto;

pub use configuration::{CharacterSet, GenerationConfiguration};
pub use configurator::{Configurator, Segment};
pub use dto::{
    ApiResponse, GenerateRequest, GenerateResponse, HealthResponse, ReadyComponents,
    ReadyResponse, StrategiesResponse, ValidatorInfo,
};
