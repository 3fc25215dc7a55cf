use crate::types::Canvas;

/// Scores a rendered approximation against the target. Lower is better.
///
/// Implementations must be pure: the evaluator calls them concurrently from
/// several worker threads and expects a finite, non-negative score.
pub trait Fitness: Send + Sync {
    fn score(&self, approximation: &Canvas, target: &Canvas) -> f64;
}

impl<F> Fitness for F
where
    F: Fn(&Canvas, &Canvas) -> f64 + Send + Sync,
{
    fn score(&self, approximation: &Canvas, target: &Canvas) -> f64 {
        self(approximation, target)
    }
}

/// Mean of squared per-pixel differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl Fitness for MeanSquaredError {
    fn score(&self, approximation: &Canvas, target: &Canvas) -> f64 {
        debug_assert!(approximation.same_shape(target));
        let a = approximation.pixels();
        let b = target.pixels();
        if a.is_empty() {
            return 0.0;
        }
        let sum: u64 = a
            .iter()
            .zip(b)
            .map(|(&p, &q)| {
                let d = p.abs_diff(q) as u64;
                d * d
            })
            .sum();
        sum as f64 / a.len() as f64
    }
}

/// Sum of absolute per-pixel differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumAbsoluteDifference;

impl Fitness for SumAbsoluteDifference {
    fn score(&self, approximation: &Canvas, target: &Canvas) -> f64 {
        debug_assert!(approximation.same_shape(target));
        approximation
            .pixels()
            .iter()
            .zip(target.pixels())
            .map(|(&p, &q)| p.abs_diff(q) as u64)
            .sum::<u64>() as f64
    }
}
