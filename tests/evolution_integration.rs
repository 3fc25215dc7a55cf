use circlevo::engines::evaluation::rasterize;
use circlevo::engines::generation::{
    ChannelProgressCallback, LogProgressCallback, ProgressMessage, SilentProgressCallback,
};
use circlevo::{
    Canvas, Circle, EvolutionConfig, EvolutionEngine, EvolveError, Fitness, MeanSquaredError,
    Slot,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::mpsc::channel;

/// Target with some structure so fitness actually moves.
fn test_target() -> Canvas {
    rasterize(
        &[Circle::new(120, 12, 20, 20), Circle::new(60, 8, 44, 30)],
        64,
        48,
        30,
    )
}

/// Create a minimal evolution config for fast testing
fn create_test_config(seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 10,
        individual_size: 8,
        mutation_scale: 1.0,
        background: 255,
        workers: Some(3),
        seed: Some(seed),
    }
}

#[test]
fn test_zero_generations_yield_empty_history() {
    let mut engine =
        EvolutionEngine::new(&test_target(), create_test_config(1), MeanSquaredError).unwrap();
    let history = engine.run(0, false).unwrap();
    assert!(history.is_empty());
    assert!(history.individuals.is_empty());
}

#[test]
fn test_history_length_and_elitism() {
    let generations = 15;
    let mut engine =
        EvolutionEngine::new(&test_target(), create_test_config(2), MeanSquaredError).unwrap();
    let history = engine.run(generations, false).unwrap();

    assert_eq!(history.fitnesses.len(), generations);
    assert_eq!(history.individuals.len(), generations);
    for pair in history.fitnesses.windows(2) {
        assert!(pair[1] <= pair[0], "best fitness increased: {:?}", pair);
    }
    for individual in &history.individuals {
        assert_eq!(individual.len(), 8);
    }

    // Population stays sorted and sized after the final selection.
    assert_eq!(engine.population().len(), 10);
    assert!(engine.fitnesses().windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(engine.fitnesses()[0], *history.fitnesses.last().unwrap());
}

#[test]
fn test_recorded_fitness_matches_recorded_genotype() {
    let target = test_target();
    let mut engine =
        EvolutionEngine::new(&target, create_test_config(3), MeanSquaredError).unwrap();
    let history = engine.run(5, false).unwrap();

    for (fitness, individual) in history.fitnesses.iter().zip(&history.individuals) {
        let approx = rasterize(individual, target.width(), target.height(), 255);
        assert_eq!(*fitness, MeanSquaredError.score(&approx, &target));
    }

    // Evaluator index alignment on the live population.
    engine.evaluate(Slot::General).unwrap();
    for (individual, fitness) in engine.population().iter().zip(engine.fitnesses()) {
        let approx = rasterize(individual, target.width(), target.height(), 255);
        assert_eq!(*fitness, MeanSquaredError.score(&approx, &target));
    }
}

#[test]
fn test_same_seed_same_run() {
    let target = test_target();
    let config = EvolutionConfig {
        seed: None,
        ..create_test_config(0)
    };

    let mut a = EvolutionEngine::with_rng(
        &target,
        config.clone(),
        MeanSquaredError,
        StdRng::seed_from_u64(99),
    )
    .unwrap();
    let mut b = EvolutionEngine::with_rng(
        &target,
        config,
        MeanSquaredError,
        StdRng::seed_from_u64(99),
    )
    .unwrap();

    assert_eq!(a.run(6, false).unwrap(), b.run(6, false).unwrap());
}

#[test]
fn test_initial_population_bounds() {
    let target = test_target();
    let mut engine =
        EvolutionEngine::new(&target, create_test_config(4), MeanSquaredError).unwrap();
    engine.init_population();

    // max(64, 48) / 8 = 8
    for circle in engine.population().iter().flatten() {
        assert!((0..256).contains(&(circle.color as i32)));
        assert!(circle.radius >= 5 && circle.radius < 8);
        assert!(circle.center.x >= 0 && circle.center.x < 64);
        assert!(circle.center.y >= 0 && circle.center.y < 48);
    }
}

#[test]
fn test_progress_messages() {
    let (tx, rx) = channel();
    let mut engine =
        EvolutionEngine::new(&test_target(), create_test_config(5), MeanSquaredError).unwrap();
    engine
        .run_with_callback(3, ChannelProgressCallback::new(tx))
        .unwrap();

    let messages: Vec<ProgressMessage> = rx.try_iter().collect();
    let completed: Vec<usize> = messages
        .iter()
        .filter_map(|m| match m {
            ProgressMessage::GenerationComplete { generation, .. } => Some(*generation),
            _ => None,
        })
        .collect();
    assert_eq!(completed, vec![0, 1, 2]);

    // Initial scoring plus two slots per generation.
    let evaluated = messages
        .iter()
        .filter(|m| matches!(m, ProgressMessage::SlotEvaluated { .. }))
        .count();
    assert_eq!(evaluated, 1 + 2 * 3);
    assert_eq!(messages.last(), Some(&ProgressMessage::RunComplete(3)));
}

#[test]
fn test_log_progress_matches_silent_run() {
    let target = test_target();
    let mut logged =
        EvolutionEngine::new(&target, create_test_config(7), MeanSquaredError).unwrap();
    let mut quiet =
        EvolutionEngine::new(&target, create_test_config(7), MeanSquaredError).unwrap();

    let history = logged.run_with_callback(4, LogProgressCallback).unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(
        history,
        quiet.run_with_callback(4, SilentProgressCallback).unwrap()
    );
}

#[test]
fn test_fitness_failure_aborts_run() {
    let negative = |_: &Canvas, _: &Canvas| -1.0;
    let mut engine = EvolutionEngine::new(&test_target(), create_test_config(6), negative).unwrap();
    match engine.run(3, false) {
        Err(EvolveError::InvalidFitness { value, .. }) => assert_eq!(value, -1.0),
        other => panic!("expected InvalidFitness, got {:?}", other.map(|h| h.len())),
    }
}
