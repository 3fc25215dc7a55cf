pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use crate::config::{AppConfig, ConfigManager, EvolutionConfig, RunConfig};
pub use crate::engines::evaluation::{Fitness, MeanSquaredError, SumAbsoluteDifference};
pub use crate::engines::generation::{EvolutionEngine, Individual, RunHistory, Slot};
pub use crate::error::{EvolveError, Result};
pub use crate::types::{Canvas, Center, Circle};
