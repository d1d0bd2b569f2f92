//! The 4-neighbour relaxation stencil.
//!
//! Every interior cell becomes the mean of its left, right, upper, and
//! lower neighbours, summed in exactly that order:
//!
//! ```text
//! new[y][x] = (old[y][x-1] + old[y][x+1] + old[y-1][x] + old[y+1][x]) / 4
//! ```
//!
//! Columns `0` and `cols - 1` are boundary cells and are never written.
//! Each function returns the largest absolute change it made, which the
//! convergence protocol compares against epsilon. A NaN change anywhere
//! makes the result NaN (see [`fold_delta`]).

use std::ops::Range;

use relax_core::Grid;

/// Running maximum of absolute changes that keeps NaN once seen.
/// `f64::max` would drop it.
pub fn fold_delta(max_delta: f64, delta: f64) -> f64 {
    if max_delta.is_nan() || delta <= max_delta {
        max_delta
    } else {
        delta
    }
}

/// Relax row `y` from the `prev` snapshot into `next`.
///
/// Reads rows `y - 1..=y + 1` of `prev` only. Both grids must have the
/// same column count.
pub fn relax_row_jacobi(prev: &Grid, next: &mut Grid, y: usize) -> f64 {
    let cols = prev.cols();
    let up = prev.row(y - 1);
    let mid = prev.row(y);
    let down = prev.row(y + 1);
    let out = next.row_mut(y);

    let mut max_delta = 0.0f64;
    for x in 1..cols - 1 {
        let value = (mid[x - 1] + mid[x + 1] + up[x] + down[x]) / 4.0;
        max_delta = fold_delta(max_delta, (value - mid[x]).abs());
        out[x] = value;
    }
    max_delta
}

/// Relax row `y` of `grid` in place, left to right.
///
/// Cell `x` sees the already-updated cell `x - 1` of this row and whatever
/// row `y - 1` currently holds.
pub fn relax_row_seidel(grid: &mut Grid, y: usize) -> f64 {
    let (up, mid, down) = grid.stencil_rows_mut(y);
    let cols = mid.len();

    let mut max_delta = 0.0f64;
    for x in 1..cols - 1 {
        let old = mid[x];
        let value = (mid[x - 1] + mid[x + 1] + up[x] + down[x]) / 4.0;
        max_delta = fold_delta(max_delta, (value - old).abs());
        mid[x] = value;
    }
    max_delta
}

/// Jacobi sweep over `rows`.
pub fn sweep_jacobi(prev: &Grid, next: &mut Grid, rows: Range<usize>) -> f64 {
    rows.map(|y| relax_row_jacobi(prev, next, y))
        .fold(0.0, fold_delta)
}

/// Gauss-Seidel sweep over `rows`, top to bottom.
pub fn sweep_seidel(grid: &mut Grid, rows: Range<usize>) -> f64 {
    rows.map(|y| relax_row_seidel(grid, y)).fold(0.0, fold_delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use relax_core::BoundaryConditions;

    fn ramp(rows: usize, cols: usize) -> Grid {
        let data = (0..rows * cols).map(|i| (i * i % 17) as f64).collect();
        Grid::from_vec(rows, cols, data).unwrap()
    }

    #[test]
    fn jacobi_row_is_neighbour_mean() {
        let prev = ramp(3, 4);
        let mut next = prev.clone();
        relax_row_jacobi(&prev, &mut next, 1);
        for x in 1..3 {
            let expected =
                (prev[(1, x - 1)] + prev[(1, x + 1)] + prev[(0, x)] + prev[(2, x)]) / 4.0;
            assert_eq!(next[(1, x)], expected);
        }
        assert_eq!(next[(1, 0)], prev[(1, 0)]);
        assert_eq!(next[(1, 3)], prev[(1, 3)]);
    }

    #[test]
    fn seidel_row_uses_fresh_left_neighbour() {
        let mut g = Grid::from_vec(
            3,
            4,
            vec![
                0.0, 0.0, 0.0, 0.0, //
                8.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, 0.0,
            ],
        )
        .unwrap();
        let delta = relax_row_seidel(&mut g, 1);
        assert_eq!(g[(1, 1)], 2.0);
        // Jacobi would leave this at 0; in place it sees the new 2.0.
        assert_eq!(g[(1, 2)], 0.5);
        assert_eq!(delta, 2.0);
    }

    #[test]
    fn uniform_field_is_a_fixed_point() {
        let bc = BoundaryConditions {
            top: 5.0,
            bottom: 5.0,
            left: 5.0,
            right: 5.0,
        };
        let prev = bc.build(6, 7).unwrap();
        let mut next = prev.clone();
        assert_eq!(sweep_jacobi(&prev, &mut next, 1..5), 0.0);
        assert_eq!(next, prev);
        let mut g = prev.clone();
        assert_eq!(sweep_seidel(&mut g, 1..5), 0.0);
    }

    #[test]
    fn sweep_reports_largest_change() {
        let prev = BoundaryConditions::default().build(4, 4).unwrap();
        let mut next = prev.clone();
        let delta = sweep_jacobi(&prev, &mut next, 1..3);
        let expected = prev.max_abs_diff(&next).unwrap();
        assert_eq!(delta, expected);
        assert!(delta > 0.0);
    }

    #[test]
    fn nan_delta_survives_the_fold() {
        assert!(fold_delta(1.0, f64::NAN).is_nan());
        assert!(fold_delta(f64::NAN, 3.0).is_nan());
        assert_eq!(fold_delta(1.0, 3.0), 3.0);
        assert_eq!(fold_delta(3.0, 1.0), 3.0);
    }

    #[test]
    fn nan_cell_poisons_both_sweeps() {
        let mut prev = BoundaryConditions::default().build(6, 6).unwrap();
        prev[(2, 2)] = f64::NAN;
        let mut next = prev.clone();
        assert!(sweep_jacobi(&prev, &mut next, 1..5).is_nan());
        let mut g = prev.clone();
        assert!(sweep_seidel(&mut g, 1..5).is_nan());
    }

    #[test]
    fn infinite_boundary_gives_nan_delta() {
        let bc = BoundaryConditions {
            top: f64::INFINITY,
            ..BoundaryConditions::default()
        };
        // The interior starts at the (infinite) mean, so the first update
        // computes inf - inf.
        let prev = bc.build(5, 5).unwrap();
        let mut next = prev.clone();
        assert!(sweep_jacobi(&prev, &mut next, 1..4).is_nan());
        let mut g = prev.clone();
        assert!(sweep_seidel(&mut g, 1..4).is_nan());
    }

    proptest! {
        #[test]
        fn jacobi_stencil_is_exact(
            rows in 3usize..9,
            cols in 3usize..9,
            seed in proptest::collection::vec(-500.0f64..500.0, 81),
        ) {
            let prev = Grid::from_vec(rows, cols, seed[..rows * cols].to_vec()).unwrap();
            let mut next = prev.clone();
            sweep_jacobi(&prev, &mut next, 1..rows - 1);
            for y in 1..rows - 1 {
                for x in 1..cols - 1 {
                    let expected = (prev[(y, x - 1)] + prev[(y, x + 1)]
                        + prev[(y - 1, x)] + prev[(y + 1, x)]) / 4.0;
                    prop_assert_eq!(next[(y, x)].to_bits(), expected.to_bits());
                }
            }
            for y in 0..rows {
                prop_assert_eq!(next[(y, 0)], prev[(y, 0)]);
                prop_assert_eq!(next[(y, cols - 1)], prev[(y, cols - 1)]);
            }
            prop_assert_eq!(next.row(0), prev.row(0));
            prop_assert_eq!(next.row(rows - 1), prev.row(rows - 1));
        }
    }
}
