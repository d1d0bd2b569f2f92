//! Standard test grids.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use relax_core::{BoundaryConditions, Grid};

/// Default-boundary heat grid (top 200, bottom 400, left 100, right 300).
pub fn heat_grid(rows: usize, cols: usize) -> Grid {
    BoundaryConditions::default()
        .build(rows, cols)
        .expect("fixture dimensions are at least 3x3")
}

/// The 6x6 heat problem used by the cross-process-count scenarios.
pub fn scenario_6x6() -> Grid {
    heat_grid(6, 6)
}

/// Heat grid whose interior is replaced by seeded uniform noise in
/// `[0, 500)`. Same seed, same grid.
pub fn random_interior(rows: usize, cols: usize, seed: u64) -> Grid {
    let mut grid = heat_grid(rows, cols);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for y in 1..rows - 1 {
        for x in 1..cols - 1 {
            grid[(y, x)] = rng.random_range(0.0..500.0);
        }
    }
    grid
}

/// Panic unless `a` and `b` have the same logical shape and every cell
/// differs by at most `tolerance`.
pub fn assert_grids_close(a: &Grid, b: &Grid, tolerance: f64) {
    assert_eq!(
        (a.rows(), a.cols()),
        (b.rows(), b.cols()),
        "grid shapes differ"
    );
    for y in 0..a.rows() {
        for x in 0..a.cols() {
            let (va, vb) = (a[(y, x)], b[(y, x)]);
            assert!(
                (va - vb).abs() <= tolerance,
                "cell ({y}, {x}): {va} vs {vb} differs by more than {tolerance}"
            );
        }
    }
}
