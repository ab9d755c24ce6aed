//! Shared types and models for the Wood Workshop Management system
//!
//! This crate contains types shared between the backend and any future
//! frontend components, plus the pure derived-value functions (stock
//! classification, order totals) tested independently of persistence.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
