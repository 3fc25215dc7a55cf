use super::traits::ConfigSection;
use crate::error::EvolveError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of individuals kept after every selection.
    pub population_size: usize,
    /// Number of circles per individual.
    pub individual_size: usize,
    /// Standard deviation multiplier for the Gaussian mutation noise.
    pub mutation_scale: f64,
    /// Intensity every render starts from.
    pub background: u8,
    /// Fitness worker count; `None` uses one per available core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Seed for the engine's generator; `None` seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            individual_size: 100,
            mutation_scale: 1.0,
            background: 255,
            workers: None,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvolveError> {
        if self.population_size == 0 {
            return Err(EvolveError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.individual_size == 0 {
            return Err(EvolveError::Configuration(
                "Individual size must be positive".to_string(),
            ));
        }
        if !self.mutation_scale.is_finite() || self.mutation_scale < 0.0 {
            return Err(EvolveError::Configuration(
                "Mutation scale must be a finite, non-negative number".to_string(),
            ));
        }
        if self.workers == Some(0) {
            return Err(EvolveError::Configuration(
                "Worker count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EvolutionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let config = EvolutionConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvolutionConfig {
            individual_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_scale_and_workers() {
        let config = EvolutionConfig {
            mutation_scale: -0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvolutionConfig {
            mutation_scale: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EvolutionConfig {
            workers: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
