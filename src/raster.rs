//! Rasterizer primitives: the host-provided pixel sink plus the line and
//! triangle scan-converters built on top of it. Every coordinate here is a
//! window-space pixel coordinate (`i32`), already past clipping and the
//! viewport transform.

use crate::color::Color15;

/// The host's pixel sink. `plot` is the only required method; `clear`,
/// `present`, and the three drawing primitives have defaults and may be
/// overridden if a host can provide a faster path (e.g. a hardware line
/// draw). The context never owns a `Plot` — it borrows one for the
/// duration of a call.
pub trait Plot {
    fn plot(&mut self, x: i32, y: i32, color: Color15);

    fn clear(&mut self) {}

    fn present(&mut self) {}

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color15) {
        line(self, x0, y0, x1, y1, color);
    }

    fn line_horizontal(&mut self, x0: i32, y0: i32, x1: i32, color: Color15) {
        self.line(x0, y0, x1, y0, color);
    }

    fn line_vertical(&mut self, x0: i32, y0: i32, y1: i32, color: Color15) {
        self.line(x0, y0, x0, y1, color);
    }

    fn triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color15,
    ) {
        triangle(self, x0, y0, x1, y1, x2, y2, color);
    }
}

/// Bresenham line with the steep-axis swap: if `|dy| > |dx|`, x/y roles are
/// swapped for the walk and un-swapped on plot. Inclusive of both endpoints.
pub fn line<P: Plot + ?Sized>(p: &mut P, x0: i32, y0: i32, x1: i32, y1: i32, color: Color15) {
    let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }

    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut error = dx / 2;
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut y = y0;

    for x in x0..=x1 {
        if steep {
            p.plot(y, x, color);
        } else {
            p.plot(x, y, color);
        }

        error -= dy;
        if error < 0 {
            y += ystep;
            error += dx;
        }
    }
}

/// Scanline-filled triangle using two Bresenham edge-steppers: Stepper A
/// walks the long edge (top to bottom), Stepper B walks first the upper
/// short edge (top to mid) and then is re-initialized for the lower short
/// edge (mid to bottom).
pub fn triangle<P: Plot + ?Sized>(
    p: &mut P,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color15,
) {
    let (mut top_x, mut top_y) = (x0, y0);
    let (mut mid_x, mut mid_y) = (x1, y1);
    let (mut bot_x, mut bot_y) = (x2, y2);

    // 1. Sort by y so top <= mid <= bot.
    if top_y > mid_y {
        std::mem::swap(&mut top_x, &mut mid_x);
        std::mem::swap(&mut top_y, &mut mid_y);
    }
    if mid_y > bot_y {
        std::mem::swap(&mut mid_x, &mut bot_x);
        std::mem::swap(&mut mid_y, &mut bot_y);
    }
    if top_y > mid_y {
        std::mem::swap(&mut top_x, &mut mid_x);
        std::mem::swap(&mut top_y, &mut mid_y);
    }

    // 2. Degenerate: a flat triangle collapses to one horizontal line.
    if top_y == bot_y {
        let min_x = top_x.min(mid_x).min(bot_x);
        let max_x = top_x.max(mid_x).max(bot_x);
        p.line_horizontal(min_x, top_y, max_x, color);
        return;
    }

    // 3. Stepper A: long edge, top -> bottom.
    let mut dx_a = bot_x - top_x;
    let dy_a = bot_y - top_y;
    let x_step_a = if dx_a < 0 { -1 } else { 1 };
    dx_a = dx_a.abs();
    let mut error_a = dy_a >> 1;
    let mut x_a = top_x;

    // 4. Stepper B: upper short edge, top -> mid.
    let mut dx_b = mid_x - top_x;
    let mut dy_b = mid_y - top_y;
    let mut x_step_b = if dx_b < 0 { -1 } else { 1 };
    dx_b = dx_b.abs();
    let mut error_b = dy_b >> 1;
    let mut x_b = top_x;

    // 5. Top half: y in [top_y, mid_y).
    for y in top_y..mid_y {
        p.line_horizontal(x_a, y, x_b, color);

        error_a -= dx_a;
        while error_a < 0 {
            x_a += x_step_a;
            error_a += dy_a;
        }

        if dy_b > 0 {
            error_b -= dx_b;
            while error_b < 0 {
                x_b += x_step_b;
                error_b += dy_b;
            }
        }
    }

    // 6. Re-initialize Stepper B for the lower short edge, mid -> bottom.
    dx_b = bot_x - mid_x;
    dy_b = bot_y - mid_y;
    x_step_b = if dx_b < 0 { -1 } else { 1 };
    dx_b = dx_b.abs();
    error_b = dy_b >> 1;
    x_b = mid_x;

    // Bottom half: y in [mid_y, bot_y], so row mid_y is only ever emitted
    // here (the resolved tie-break for shared-edge rows).
    for y in mid_y..=bot_y {
        p.line_horizontal(x_a, y, x_b, color);

        error_a -= dx_a;
        while error_a < 0 {
            x_a += x_step_a;
            error_a += dy_a;
        }

        if dy_b > 0 {
            error_b -= dx_b;
            while error_b < 0 {
                x_b += x_step_b;
                error_b += dy_b;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Recorder {
        pixels: Vec<(i32, i32)>,
    }

    impl Recorder {
        fn new() -> Self {
            Self { pixels: Vec::new() }
        }
    }

    impl Plot for Recorder {
        fn plot(&mut self, x: i32, y: i32, _color: Color15) {
            self.pixels.push((x, y));
        }
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut r = Recorder::new();
        r.line(0, 0, 4, 0, Color15::WHITE);
        assert_eq!(r.pixels.first(), Some(&(0, 0)));
        assert_eq!(r.pixels.last(), Some(&(4, 0)));
    }

    #[test]
    fn horizontal_line_sets_every_pixel_in_span() {
        let mut r = Recorder::new();
        r.line(0, 0, 4, 0, Color15::WHITE);
        let xs: HashSet<i32> = r.pixels.iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, (0..=4).collect());
    }

    #[test]
    fn line_is_symmetric_as_a_pixel_set() {
        let mut forward = Recorder::new();
        forward.line(2, 3, 17, 9, Color15::WHITE);
        let mut backward = Recorder::new();
        backward.line(17, 9, 2, 3, Color15::WHITE);

        let fwd: HashSet<_> = forward.pixels.into_iter().collect();
        let bwd: HashSet<_> = backward.pixels.into_iter().collect();
        assert_eq!(fwd, bwd);
    }

    #[test]
    fn line_is_eight_connected() {
        let mut r = Recorder::new();
        r.line(0, 0, 20, 7, Color15::WHITE);
        for pair in r.pixels.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            assert!((x1 - x0).abs() <= 1);
            assert!((y1 - y0).abs() <= 1);
        }
    }

    #[test]
    fn flat_triangle_emits_one_horizontal_line() {
        let mut r = Recorder::new();
        r.triangle(0, 5, 3, 5, 7, 5, Color15::WHITE);
        assert!(r.pixels.iter().all(|(_, y)| *y == 5));
        let xs: HashSet<i32> = r.pixels.iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, (0..=7).collect());
    }

    #[test]
    fn triangle_fill_is_convex_per_scanline() {
        let mut r = Recorder::new();
        r.triangle(0, 0, 10, 0, 0, 10, Color15::WHITE);

        use std::collections::BTreeMap;
        let mut by_row: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for (x, y) in r.pixels {
            by_row.entry(y).or_default().push(x);
        }
        for (_, mut xs) in by_row {
            xs.sort();
            let min = xs[0];
            let max = *xs.last().unwrap();
            let full: Vec<i32> = (min..=max).collect();
            assert_eq!(xs, full);
        }
    }

    #[test]
    fn right_triangle_covers_exact_diagonal_half() {
        let mut r = Recorder::new();
        r.triangle(0, 0, 10, 0, 0, 10, Color15::WHITE);
        for (x, y) in &r.pixels {
            assert!(*x >= 0 && *y >= 0 && x + y <= 10);
        }
    }
}
