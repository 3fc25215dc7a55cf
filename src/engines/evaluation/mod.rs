pub mod evaluator;
pub mod fitness;
pub mod rasterizer;

pub use evaluator::FitnessEvaluator;
pub use fitness::{Fitness, MeanSquaredError, SumAbsoluteDifference};
pub use rasterizer::{rasterize, render};
