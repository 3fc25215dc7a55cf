use anyhow::Context;
use circlevo::engines::evaluation::rasterize;
use circlevo::{Canvas, Circle, ConfigManager, EvolutionEngine, MeanSquaredError};
use std::env;

const TARGET_SIZE: usize = 96;

/// Synthetic target: a vertical gradient with two overlapping discs.
fn demo_target() -> anyhow::Result<Canvas> {
    let discs = rasterize(
        &[Circle::new(90, 20, 35, 40), Circle::new(60, 14, 60, 55)],
        TARGET_SIZE,
        TARGET_SIZE,
        0,
    );
    let pixels = discs
        .pixels()
        .iter()
        .enumerate()
        .map(|(i, &disc)| {
            let y = i / TARGET_SIZE;
            let shade = (y * 160 / TARGET_SIZE) as u8;
            shade.wrapping_add(disc)
        })
        .collect();
    Ok(Canvas::from_raw(TARGET_SIZE, TARGET_SIZE, pixels)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    match env::args().nth(1) {
        Some(path) => manager
            .load_from_file(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => manager.load_from_env().context("reading environment config")?,
    }
    let config = manager.get();

    let target = demo_target()?;
    let mut engine = EvolutionEngine::new(&target, config.evolution.clone(), MeanSquaredError)?;
    let history = engine.run(config.run.generations, config.run.verbose)?;
    engine.shutdown();

    if let Some((fitness, individual)) = history.last() {
        println!(
            "Best fitness after {} generations: {:.4} ({} circles)",
            history.len(),
            fitness,
            individual.len()
        );
    }

    if let Some(path) = &config.run.history_path {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &history)?;
        log::info!("Wrote history to {}", path.display());
    }

    Ok(())
}
