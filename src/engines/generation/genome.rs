/// Genotype representation for the circle approximation
///
/// An individual is a fixed-length, ordered sequence of circles. Order matters:
/// circles are painted in sequence and each one *adds* its color to whatever is
/// already at a pixel (modulo 256), so swapping two overlapping circles only
/// leaves the image unchanged because the addition commutes, not because the
/// later circle hides the earlier one.
///
/// # Lifecycle of the numeric fields
///
/// - Fresh circles: `color` in `[0, 256)`, `radius` in `[5, max(h, w) / 8)`,
///   center inside the canvas.
/// - After mutation: `color` in `[-255, 255]`, `radius >= 1`, center in
///   `[0, width] x [0, height]` (the far edge is inclusive).
///
/// # Rendering
///
/// Use `engines::evaluation::rasterizer::render()` to turn an Individual into a Canvas.
///
/// # Example
///
/// ```
/// use circlevo::types::Circle;
/// use circlevo::engines::generation::Individual;
///
/// let individual: Individual = vec![Circle::new(10, 4, 8, 8), Circle::new(50, 2, 9, 8)];
/// assert_eq!(individual.len(), 2);
/// ```
pub type Individual = Vec<crate::types::Circle>;
