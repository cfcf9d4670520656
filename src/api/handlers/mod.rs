//! HTTP handlers.

pub mod codes;
pub mod health;
