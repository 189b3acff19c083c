//! Collage layout: normalized position, size, and rotation for each poster
//! in the display area.
//!
//! Placement starts from a near-square grid, then applies per-axis jitter
//! and a radial push away from the center so sparse collages still reach
//! the edges. All randomness flows through [`RandomSource`] so a seeded
//! implementation produces reproducible layouts.

/// Poster width (percent) at the reference poster count.
pub const BASE_WIDTH: f64 = 18.0;
/// Reference poster count the base width is tuned for.
pub const BASE_COUNT: f64 = 28.0;
/// Width cap so single-poster collages don't overflow the page.
pub const MAX_WIDTH: f64 = 30.0;
/// Rotation is uniform in [-MAX_ROTATION_DEG, +MAX_ROTATION_DEG].
pub const MAX_ROTATION_DEG: f64 = 8.0;

/// Display area bounds, in percent of the page. The margins leave room
/// for the title and venue strip around the collage.
pub const AREA_LEFT: f64 = 5.0;
pub const AREA_RIGHT: f64 = 95.0;
pub const AREA_TOP: f64 = 5.0;
pub const AREA_BOTTOM: f64 = 88.0;

/// Injectable randomness seam for layout generation.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// One poster's placement within the collage, all units in percent of the
/// display area except `rotation_deg` and `z_index`.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterPlacement {
    pub left_percent: f64,
    pub top_percent: f64,
    pub width_percent: f64,
    pub rotation_deg: f64,
    pub z_index: usize,
}

/// Global poster width for a collage of `count` items: shrinks with the
/// square root of the count, capped at [`MAX_WIDTH`].
pub fn poster_width(count: usize) -> f64 {
    if count == 0 {
        return MAX_WIDTH;
    }
    (BASE_WIDTH * (BASE_COUNT / count as f64).sqrt()).min(MAX_WIDTH)
}

/// Compute one placement per poster.
///
/// Order is preserved relative to the caller's (already shuffled) sequence;
/// `z_index` is the position in that sequence so later posters stack on
/// top. `count == 0` yields no placements.
pub fn generate(count: usize, rng: &mut dyn RandomSource) -> Vec<PosterPlacement> {
    if count == 0 {
        return Vec::new();
    }

    let width = poster_width(count);
    let cols = (count as f64).sqrt().ceil() as usize;
    let rows = count.div_ceil(cols);

    let cell_w = (AREA_RIGHT - AREA_LEFT) / cols as f64;
    let cell_h = (AREA_BOTTOM - AREA_TOP) / rows as f64;
    let center_x = (AREA_LEFT + AREA_RIGHT) / 2.0;
    let center_y = (AREA_TOP + AREA_BOTTOM) / 2.0;

    // Sparse collages get a stronger push so they still reach the edges.
    let push = 1.1 + 1.0 / count as f64;

    (0..count)
        .map(|index| {
            let col = index % cols;
            let row = index / cols;
            let cell_x = AREA_LEFT + (col as f64 + 0.5) * cell_w;
            let cell_y = AREA_TOP + (row as f64 + 0.5) * cell_h;

            // Jitter up to half a cell in each axis, independently.
            let x = cell_x + (rng.unit() - 0.5) * cell_w;
            let y = cell_y + (rng.unit() - 0.5) * cell_h;

            let x = center_x + (x - center_x) * push;
            let y = center_y + (y - center_y) * push;

            PosterPlacement {
                left_percent: x.clamp(AREA_LEFT, AREA_RIGHT),
                top_percent: y.clamp(AREA_TOP, AREA_BOTTOM),
                width_percent: width,
                rotation_deg: (rng.unit() * 2.0 - 1.0) * MAX_ROTATION_DEG,
                z_index: index,
            }
        })
        .collect()
}

/// Fisher-Yates shuffle over the same randomness seam as the layout, so a
/// seeded run reproduces its render order too.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = (rng.unit() * (i + 1) as f64) as usize;
        items.swap(i, j.min(i));
    }
}
