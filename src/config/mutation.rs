use super::traits::{check_probability, ConfigSection};
use crate::error::EvokitError;
use serde::{Deserialize, Serialize};

/// Weights for string and structured-payload mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Upper bound on mutated string length, in characters.
    pub max_string_length: usize,
    /// Scale of the Gaussian delta applied to attribute-map numbers.
    pub max_delta: f64,
    /// Probability that an inserted element is the null marker.
    pub null_weight: f64,
    /// Probability that an inserted element is a primitive.
    pub primitive_weight: f64,
    /// Probability that an inserted element is a fresh array.
    pub array_weight: f64,
    /// Probability of redirecting an insertion into a compound child.
    pub nested_weight: f64,
    /// Probability of renaming an object key instead of mutating its value.
    pub rename_weight: f64,
    /// Upper bound on elements added when randomizing a container.
    pub max_elements: usize,
    /// Maximum nesting depth for generated compounds.
    pub max_depth: usize,
    /// Attempts a gene mutation makes before giving up unchanged.
    pub retry_limit: usize,
    /// Probability that a gene mutation rebuilds the tree from scratch.
    pub perturbation_rate: f64,
    /// Upper bound on delta passes applied by the payload string fuzzer.
    pub fuzz_rounds: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            max_string_length: 20,
            max_delta: 20.0,
            null_weight: 0.1,
            primitive_weight: 0.5,
            array_weight: 0.2,
            nested_weight: 0.2,
            rename_weight: 0.5,
            max_elements: 10,
            max_depth: 2,
            retry_limit: 4,
            perturbation_rate: 0.2,
            fuzz_rounds: 5,
        }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), EvokitError> {
        check_probability("null_weight", self.null_weight)?;
        check_probability("primitive_weight", self.primitive_weight)?;
        check_probability("array_weight", self.array_weight)?;
        check_probability("nested_weight", self.nested_weight)?;
        check_probability("rename_weight", self.rename_weight)?;
        check_probability("perturbation_rate", self.perturbation_rate)?;
        if self.max_string_length < 1 {
            return Err(EvokitError::Configuration(
                "max_string_length must be at least 1".to_string(),
            ));
        }
        if self.max_delta < 0.0 {
            return Err(EvokitError::Configuration(
                "max_delta must not be negative".to_string(),
            ));
        }
        if self.retry_limit < 1 {
            return Err(EvokitError::Configuration(
                "retry_limit must be at least 1".to_string(),
            ));
        }
        if self.fuzz_rounds < 1 {
            return Err(EvokitError::Configuration(
                "fuzz_rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
