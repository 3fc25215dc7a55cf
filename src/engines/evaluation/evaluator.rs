use super::fitness::Fitness;
use super::rasterizer::render;
use crate::engines::generation::genome::Individual;
use crate::error::{EvolveError, Result};
use crate::types::Canvas;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Private buffers owned by one worker: a scratch canvas to render into and
/// its own copy of the target. Never shared between workers.
struct WorkerScratch {
    canvas: Canvas,
    target: Canvas,
}

impl WorkerScratch {
    /// Render and score a contiguous batch, writing each score into the
    /// matching slot of `out`. `offset` is the batch's index in the full population.
    fn score_batch(
        &mut self,
        offset: usize,
        batch: &[Individual],
        out: &mut [f64],
        fitness: &dyn Fitness,
        background: u8,
    ) -> Result<()> {
        for (i, (individual, slot)) in batch.iter().zip(out.iter_mut()).enumerate() {
            render(&mut self.canvas, individual, background);
            let value = fitness.score(&self.canvas, &self.target);
            if !value.is_finite() || value < 0.0 {
                return Err(EvolveError::InvalidFitness {
                    index: offset + i,
                    value,
                });
            }
            *slot = value;
        }
        Ok(())
    }
}

/// Scatter-gather fitness evaluation over a fixed worker pool.
///
/// The pool and the per-worker scratch buffers are created once and live as
/// long as the evaluator. Dropping the evaluator releases the pool threads.
pub struct FitnessEvaluator {
    pool: ThreadPool,
    workers: Vec<WorkerScratch>,
    fitness: Arc<dyn Fitness>,
    background: u8,
}

impl FitnessEvaluator {
    pub fn new(
        target: &Canvas,
        fitness: Arc<dyn Fitness>,
        num_workers: usize,
        background: u8,
    ) -> Result<Self> {
        if num_workers == 0 {
            return Err(EvolveError::Configuration(
                "Worker pool needs at least one worker".to_string(),
            ));
        }
        if target.is_empty() {
            return Err(EvolveError::Configuration(
                "Target image must not be empty".to_string(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("evaluator-{i}"))
            .build()?;

        let workers = (0..num_workers)
            .map(|_| WorkerScratch {
                canvas: Canvas::new(target.width(), target.height(), background),
                target: target.clone(),
            })
            .collect();

        log::info!(
            "Started fitness worker pool: {} workers, {}x{} target",
            num_workers,
            target.width(),
            target.height()
        );

        Ok(Self {
            pool,
            workers,
            fitness,
            background,
        })
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }

    /// Fitness of every individual, index-aligned with `population`.
    ///
    /// Blocks until the whole batch is scored. Any invalid score or worker
    /// panic fails the entire call; no partial results are returned.
    pub fn evaluate(&mut self, population: &[Individual]) -> Result<Vec<f64>> {
        let mut fitnesses = vec![0.0; population.len()];
        if population.is_empty() {
            return Ok(fitnesses);
        }

        let Self {
            pool,
            workers,
            fitness,
            background,
        } = self;
        let fitness: &dyn Fitness = &**fitness;
        let background = *background;
        let chunk = population.len().div_ceil(workers.len());

        log::trace!(
            "Dispatching {} individuals in chunks of {}",
            population.len(),
            chunk
        );

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pool.install(|| {
                workers
                    .par_iter_mut()
                    .zip(population.par_chunks(chunk).zip(fitnesses.par_chunks_mut(chunk)))
                    .enumerate()
                    .map(|(n, (worker, (batch, out)))| {
                        worker.score_batch(n * chunk, batch, out, fitness, background)
                    })
                    .collect::<Result<()>>()
            })
        }));

        match outcome {
            Ok(result) => result.map(|()| fitnesses),
            Err(payload) => Err(EvolveError::WorkerFailed(panic_message(payload.as_ref()))),
        }
    }

    /// Release the worker pool.
    pub fn shutdown(self) {
        log::info!("Stopping fitness worker pool ({} workers)", self.workers.len());
        drop(self);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
