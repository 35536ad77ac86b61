//! Genetic operators for evolving call-sequence genomes.
//!
//! A genome is a list of statements: constructor and method calls plus the
//! value genes their parameters point at. Crossover runs in two phases,
//! structural statement exchange followed by value blending on calls both
//! parents share. Mutation covers plain strings and structured payload
//! trees in JSON and attribute-map form, with fresh values drawn from a
//! constant pool harvested ahead of time.

pub mod config;
pub mod error;
pub mod genome;
pub mod operators;
pub mod payload;

pub use error::{EvokitError, Result};
