use super::genome::Individual;
use serde::{Deserialize, Serialize};

/// Per-generation record of the best individual and its fitness.
///
/// Both sequences always have one entry per completed generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    pub fitnesses: Vec<f64>,
    pub individuals: Vec<Individual>,
}

impl RunHistory {
    pub fn with_capacity(generations: usize) -> Self {
        Self {
            fitnesses: Vec::with_capacity(generations),
            individuals: Vec::with_capacity(generations),
        }
    }

    pub fn record(&mut self, fitness: f64, individual: Individual) {
        self.fitnesses.push(fitness);
        self.individuals.push(individual);
    }

    pub fn len(&self) -> usize {
        self.fitnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fitnesses.is_empty()
    }

    /// Best individual of the final generation.
    pub fn last(&self) -> Option<(f64, &Individual)> {
        self.fitnesses.last().copied().zip(self.individuals.last())
    }
}
