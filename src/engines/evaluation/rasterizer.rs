use crate::types::{Canvas, Circle};

/// Render an individual onto `canvas`, overwriting it.
///
/// The canvas is filled with `background`, then each circle adds its color to
/// every pixel with `(x - cx)² + (y - cy)² <= r²`, wrapping modulo 256.
/// Circles are painted in genotype order; only in-bounds pixels are touched.
pub fn render(canvas: &mut Canvas, individual: &[Circle], background: u8) {
    canvas.fill(background);
    for circle in individual {
        paint_circle(canvas, circle);
    }
}

/// Allocate a canvas of the given shape and render `individual` into it.
pub fn rasterize(individual: &[Circle], width: usize, height: usize, background: u8) -> Canvas {
    let mut canvas = Canvas::new(width, height, background);
    render(&mut canvas, individual, background);
    canvas
}

/// Accumulate one circle, scanning only the clipped bounding box.
#[inline]
fn paint_circle(canvas: &mut Canvas, circle: &Circle) {
    let width = canvas.width() as i64;
    let height = canvas.height() as i64;
    if width == 0 || height == 0 {
        return;
    }

    // The membership test squares the radius, so a negative radius covers
    // the same disc as its magnitude.
    let r = (circle.radius as i64).abs();
    let r2 = r * r;
    let cx = circle.center.x as i64;
    let cy = circle.center.y as i64;

    let y_min = (cy - r).max(0);
    let y_max = (cy + r).min(height - 1);
    let x_min = (cx - r).max(0);
    let x_max = (cx + r).min(width - 1);
    if y_min > y_max || x_min > x_max {
        return;
    }

    // i16 -> u8 keeps the low byte, i.e. the color modulo 256.
    let color = circle.color as u8;

    for y in y_min..=y_max {
        let dy = y - cy;
        let budget = r2 - dy * dy;
        let row = canvas.row_mut(y as usize);
        for x in x_min..=x_max {
            let dx = x - cx;
            if dx * dx <= budget {
                let px = &mut row[x as usize];
                *px = px.wrapping_add(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Reference behaviour: test every pixel of the canvas against every circle.
    fn render_full_scan(canvas: &mut Canvas, individual: &[Circle], background: u8) {
        canvas.fill(background);
        let (w, h) = (canvas.width(), canvas.height());
        for circle in individual {
            let r = circle.radius as i64;
            for y in 0..h {
                let row = canvas.row_mut(y);
                for (x, px) in row.iter_mut().enumerate().take(w) {
                    let dx = x as i64 - circle.center.x as i64;
                    let dy = y as i64 - circle.center.y as i64;
                    if dx * dx + dy * dy <= r * r {
                        *px = px.wrapping_add(circle.color as u8);
                    }
                }
            }
        }
    }

    #[test]
    fn test_bounding_box_matches_full_scan() {
        let mut rng = StdRng::seed_from_u64(7);
        let (w, h) = (37, 23);
        for _ in 0..50 {
            let individual: Vec<Circle> = (0..6)
                .map(|_| {
                    Circle::new(
                        rng.gen_range(-255..=255),
                        rng.gen_range(1..30),
                        rng.gen_range(-10..=w as i32 + 10),
                        rng.gen_range(-10..=h as i32 + 10),
                    )
                })
                .collect();

            let mut fast = Canvas::new(w, h, 0);
            let mut slow = Canvas::new(w, h, 0);
            render(&mut fast, &individual, 255);
            render_full_scan(&mut slow, &individual, 255);
            assert_eq!(fast, slow);
        }
    }

    #[test]
    fn test_circle_fully_outside_is_ignored() {
        let mut canvas = Canvas::new(10, 10, 0);
        render(&mut canvas, &[Circle::new(40, 3, 50, 50)], 100);
        assert!(canvas.pixels().iter().all(|&p| p == 100));
    }

    #[test]
    fn test_negative_color_wraps() {
        let mut canvas = Canvas::new(5, 5, 0);
        render(&mut canvas, &[Circle::new(-10, 1, 2, 2)], 5);
        // 5 - 10 = -5 ≡ 251 (mod 256)
        assert_eq!(canvas.get(2, 2), Some(251));
        assert_eq!(canvas.get(0, 0), Some(5));
    }

    #[test]
    fn test_huge_radius_covers_canvas_without_overflow() {
        let mut canvas = Canvas::new(8, 8, 0);
        render(&mut canvas, &[Circle::new(3, i32::MAX, 4, 4)], 1);
        assert!(canvas.pixels().iter().all(|&p| p == 4));
    }
}
