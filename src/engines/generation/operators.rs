use crate::engines::generation::genome::Individual;
use crate::types::{Center, Circle};
use rand::Rng;
use rand_distr::StandardNormal;

/// Smallest radius a freshly initialized circle can have.
pub const MIN_INITIAL_RADIUS: i32 = 5;

/// Exclusive upper bound for initial radii: `max(height, width) / 8`.
pub fn initial_radius_bound(width: usize, height: usize) -> i32 {
    (width.max(height) / 8).min(i32::MAX as usize) as i32
}

/// Random circle: color in [0, 256), radius in [5, max(h, w) / 8), center on the canvas.
///
/// Callers must ensure the radius range is non-empty (the engine checks this
/// at construction).
pub fn random_circle<R: Rng>(width: usize, height: usize, rng: &mut R) -> Circle {
    Circle {
        color: rng.gen_range(0..256),
        radius: rng.gen_range(MIN_INITIAL_RADIUS..initial_radius_bound(width, height)),
        center: Center {
            x: rng.gen_range(0..width as i32),
            y: rng.gen_range(0..height as i32),
        },
    }
}

/// Generate random individual
pub fn random_individual<R: Rng>(
    length: usize,
    width: usize,
    height: usize,
    rng: &mut R,
) -> Individual {
    (0..length)
        .map(|_| random_circle(width, height, rng))
        .collect()
}

/// Multiplicative Gaussian perturbation: `value * (1 + N(0, scale))`.
#[inline]
fn perturb<R: Rng>(value: f64, scale: f64, rng: &mut R) -> f64 {
    let noise: f64 = rng.sample(StandardNormal);
    value + noise * scale * value
}

/// Perturb radius, color and center of one circle together.
///
/// Results are clamped, then truncated toward zero into the integer fields:
/// radius >= 1, color in [-255, 255], x in [0, width], y in [0, height].
pub fn mutate_circle<R: Rng>(
    circle: &mut Circle,
    scale: f64,
    width: usize,
    height: usize,
    rng: &mut R,
) {
    let radius = perturb(circle.radius as f64, scale, rng).max(1.0);
    circle.radius = radius as i32;

    let color = perturb(circle.color as f64, scale, rng).clamp(-255.0, 255.0);
    circle.color = color as i16;

    let x = perturb(circle.center.x as f64, scale, rng).clamp(0.0, width as f64);
    let y = perturb(circle.center.y as f64, scale, rng).clamp(0.0, height as f64);
    circle.center.x = x as i32;
    circle.center.y = y as i32;
}

/// Mutation: perturb every circle of the individual
pub fn mutate<R: Rng>(
    individual: &mut Individual,
    scale: f64,
    width: usize,
    height: usize,
    rng: &mut R,
) {
    for circle in individual.iter_mut() {
        mutate_circle(circle, scale, width, height, rng);
    }
}

/// Truncation selection over the union of two populations.
///
/// Concatenates `population` and `mutants` (with their index-aligned
/// fitnesses), sorts ascending by fitness and keeps the first `keep`.
/// The sort is stable, so on ties current members rank ahead of mutants.
pub fn truncation_selection(
    population: &[Individual],
    fitnesses: &[f64],
    mutants: &[Individual],
    mutant_fitnesses: &[f64],
    keep: usize,
) -> (Vec<Individual>, Vec<f64>) {
    let mut ranked: Vec<(&Individual, f64)> = population
        .iter()
        .zip(fitnesses.iter().copied())
        .chain(mutants.iter().zip(mutant_fitnesses.iter().copied()))
        .collect();

    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.truncate(keep);

    ranked
        .into_iter()
        .map(|(individual, fitness)| (individual.clone(), fitness))
        .unzip()
}
