use crate::config::{ConfigSection, EvolutionConfig};
use crate::engines::evaluation::{Fitness, FitnessEvaluator};
use crate::engines::generation::{
    genome::Individual,
    history::RunHistory,
    operators::{self, initial_radius_bound, truncation_selection, MIN_INITIAL_RADIUS},
    progress::{ConsoleProgressCallback, LogProgressCallback, SilentProgressCallback},
};
use crate::error::EvolveError;
use crate::types::{Canvas, Circle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Population buffers the evaluator can score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The current population.
    General,
    /// The mutation buffer rebuilt by `mutate`.
    Mutations,
    /// Offspring of `reproduce`. Always empty: reproduction is not implemented.
    Children,
    /// `General`, `Mutations` and `Children`, in that order.
    All,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(
        &mut self,
        _generation: usize,
        _best_fitness: f64,
        _worst_fitness: f64,
    ) {
    }
    fn on_slot_evaluated(&mut self, _slot: Slot, _evaluated: usize) {}
    fn on_run_complete(&mut self, _generations: usize) {}
}

/// (μ+λ) evolutionary engine approximating a target image with circles.
///
/// Owns the population, the mutation buffer, the (inert) children buffer,
/// their index-aligned fitness arrays and the fitness worker pool. The pool
/// is started in the constructor and released when the engine is dropped.
pub struct EvolutionEngine<R: Rng = StdRng> {
    config: EvolutionConfig,
    width: usize,
    height: usize,
    population: Vec<Individual>,
    fitnesses: Vec<f64>,
    mutations: Vec<Individual>,
    mutation_fitnesses: Vec<f64>,
    children: Vec<Individual>,
    children_fitnesses: Vec<f64>,
    evaluator: FitnessEvaluator,
    rng: R,
}

impl EvolutionEngine<StdRng> {
    /// Engine seeded from `config.seed`, or from entropy when unset.
    pub fn new<F: Fitness + 'static>(
        target: &Canvas,
        config: EvolutionConfig,
        fitness: F,
    ) -> Result<Self, EvolveError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(target, config, fitness, rng)
    }
}

impl<R: Rng> EvolutionEngine<R> {
    /// Engine drawing all randomness from `rng`.
    pub fn with_rng<F: Fitness + 'static>(
        target: &Canvas,
        config: EvolutionConfig,
        fitness: F,
        rng: R,
    ) -> Result<Self, EvolveError> {
        config.validate()?;
        validate_target(target)?;

        let workers = config.workers.unwrap_or_else(rayon::current_num_threads);
        let evaluator =
            FitnessEvaluator::new(target, Arc::new(fitness), workers, config.background)?;

        let blank = vec![Circle::default(); config.individual_size];
        let population = vec![blank; config.population_size];

        Ok(Self {
            width: target.width(),
            height: target.height(),
            fitnesses: vec![0.0; config.population_size],
            mutations: population.clone(),
            mutation_fitnesses: vec![0.0; config.population_size],
            population,
            children: Vec::new(),
            children_fitnesses: Vec::new(),
            evaluator,
            config,
            rng,
        })
    }

    /// Randomly initialize every circle of every individual.
    pub fn init_population(&mut self) {
        let (width, height) = (self.width, self.height);
        for individual in self.population.iter_mut() {
            for circle in individual.iter_mut() {
                *circle = operators::random_circle(width, height, &mut self.rng);
            }
        }
    }

    /// Recompute the fitness array of `slot`, blocking until every
    /// individual is scored.
    pub fn evaluate(&mut self, slot: Slot) -> Result<(), EvolveError> {
        self.evaluate_with(slot, &mut SilentProgressCallback)
    }

    fn evaluate_with<C: ProgressCallback + ?Sized>(
        &mut self,
        slot: Slot,
        callback: &mut C,
    ) -> Result<(), EvolveError> {
        let evaluated = match slot {
            Slot::General => {
                self.fitnesses = self.evaluator.evaluate(&self.population)?;
                self.fitnesses.len()
            }
            Slot::Mutations => {
                self.mutation_fitnesses = self.evaluator.evaluate(&self.mutations)?;
                self.mutation_fitnesses.len()
            }
            Slot::Children => {
                self.children_fitnesses = self.evaluator.evaluate(&self.children)?;
                self.children_fitnesses.len()
            }
            Slot::All => {
                self.evaluate_with(Slot::General, callback)?;
                self.evaluate_with(Slot::Mutations, callback)?;
                return self.evaluate_with(Slot::Children, callback);
            }
        };
        log::debug!("Evaluated {} individuals in {:?} slot", evaluated, slot);
        callback.on_slot_evaluated(slot, evaluated);
        Ok(())
    }

    /// Rebuild the mutation buffer: copy the population, then perturb every
    /// circle of every copy with Gaussian noise of standard deviation `scale`.
    pub fn mutate(&mut self, scale: f64) -> Result<(), EvolveError> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(EvolveError::Configuration(format!(
                "Mutation scale must be a finite, non-negative number (got {})",
                scale
            )));
        }

        self.mutations.clone_from(&self.population);
        let (width, height) = (self.width, self.height);
        for mutant in self.mutations.iter_mut() {
            operators::mutate(mutant, scale, width, height, &mut self.rng);
        }
        Ok(())
    }

    /// Crossover between population members. There is no defined pairing or
    /// recombination policy, so this always fails and the children slot stays empty.
    pub fn reproduce(&mut self) -> Result<(), EvolveError> {
        Err(EvolveError::NotImplemented(
            "reproduction (crossover) has no defined policy",
        ))
    }

    /// Keep the best `population_size` of population + mutations.
    ///
    /// The children slot does not take part in selection.
    pub fn select(&mut self) {
        let (population, fitnesses) = truncation_selection(
            &self.population,
            &self.fitnesses,
            &self.mutations,
            &self.mutation_fitnesses,
            self.config.population_size,
        );
        self.population = population;
        self.fitnesses = fitnesses;
    }

    /// Index and fitness of the best (lowest) individual, first one on ties.
    pub fn best(&self) -> Option<(usize, f64)> {
        self.fitnesses
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, f)| match best {
                Some((_, b)) if b <= f => best,
                _ => Some((i, f)),
            })
    }

    pub fn worst_fitness(&self) -> Option<f64> {
        self.fitnesses.iter().copied().max_by(f64::total_cmp)
    }

    /// Run the evolution process
    ///
    /// Returns the best fitness and best individual of every generation.
    /// With `verbose`, a single status line is rewritten on stdout after each
    /// generation; otherwise progress goes to the log.
    pub fn run(&mut self, generations: usize, verbose: bool) -> Result<RunHistory, EvolveError> {
        if verbose {
            self.run_with_callback(generations, ConsoleProgressCallback)
        } else {
            self.run_with_callback(generations, LogProgressCallback)
        }
    }

    pub fn run_with_callback<C: ProgressCallback>(
        &mut self,
        generations: usize,
        mut callback: C,
    ) -> Result<RunHistory, EvolveError> {
        log::info!(
            "Starting evolution: {} generations, population {}, {} circles per individual",
            generations,
            self.config.population_size,
            self.config.individual_size
        );

        self.init_population();
        self.evaluate_with(Slot::General, &mut callback)?;

        let mut history = RunHistory::with_capacity(generations);
        for generation in 0..generations {
            callback.on_generation_start(generation);

            self.mutate(self.config.mutation_scale)?;
            // The population is re-scored even though selection left it unchanged.
            self.evaluate_with(Slot::General, &mut callback)?;
            self.evaluate_with(Slot::Mutations, &mut callback)?;
            self.select();

            let (best_idx, best_fitness) = self.best().ok_or_else(|| {
                EvolveError::Configuration("Population is empty after selection".to_string())
            })?;
            let worst_fitness = self.worst_fitness().unwrap_or(best_fitness);

            log::debug!(
                "Generation {}: best {:.4}, worst {:.4}",
                generation,
                best_fitness,
                worst_fitness
            );
            callback.on_generation_complete(generation, best_fitness, worst_fitness);

            history.record(best_fitness, self.population[best_idx].clone());
        }

        callback.on_run_complete(generations);
        if let Some((fitness, _)) = history.last() {
            log::info!("Evolution finished. Final best fitness: {:.4}", fitness);
        }
        Ok(history)
    }

    /// Stop the worker pool and drop the engine.
    pub fn shutdown(self) {
        self.evaluator.shutdown();
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn fitnesses(&self) -> &[f64] {
        &self.fitnesses
    }

    pub fn mutations(&self) -> &[Individual] {
        &self.mutations
    }

    pub fn mutation_fitnesses(&self) -> &[f64] {
        &self.mutation_fitnesses
    }

    pub fn children(&self) -> &[Individual] {
        &self.children
    }

    pub fn children_fitnesses(&self) -> &[f64] {
        &self.children_fitnesses
    }
}

fn validate_target(target: &Canvas) -> Result<(), EvolveError> {
    if target.is_empty() {
        return Err(EvolveError::Configuration(
            "Target image must not be empty".to_string(),
        ));
    }
    let bound = initial_radius_bound(target.width(), target.height());
    if bound <= MIN_INITIAL_RADIUS {
        return Err(EvolveError::Configuration(format!(
            "Target image {}x{} is too small: initial radii are drawn from [{}, {})",
            target.width(),
            target.height(),
            MIN_INITIAL_RADIUS,
            bound
        )));
    }
    Ok(())
}
