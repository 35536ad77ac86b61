use super::traits::{check_probability, ConfigSection};
use crate::error::EvokitError;
use serde::{Deserialize, Serialize};

/// Weights for the crossover operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossoverConfig {
    /// Probability that the gene-level phase runs after structural crossover.
    pub data_crossover_rate: f64,
    /// Clamp bound for simulated binary crossover results, applied as [-M, M].
    pub value_bound: f64,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            data_crossover_rate: 0.5,
            value_bound: 2048.0,
        }
    }
}

impl ConfigSection for CrossoverConfig {
    fn section_name() -> &'static str {
        "crossover"
    }

    fn validate(&self) -> Result<(), EvokitError> {
        check_probability("data_crossover_rate", self.data_crossover_rate)?;
        if self.value_bound <= 0.0 {
            return Err(EvokitError::Configuration(
                "value_bound must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
