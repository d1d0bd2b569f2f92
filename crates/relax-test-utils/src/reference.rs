//! Single-threaded reference relaxation over a flat row-major vector.

use relax_core::Grid;

/// Outcome of a reference solve.
#[derive(Clone, Debug)]
pub struct ReferenceRun {
    pub grid: Grid,
    pub iterations: u64,
    /// Largest change over the whole grid, per iteration.
    pub max_deltas: Vec<f64>,
}

impl ReferenceRun {
    /// Whether the last recorded iteration met the tolerance.
    pub fn converged(&self, epsilon: f64) -> bool {
        self.max_deltas.last().is_some_and(|&d| d <= epsilon)
    }
}

/// Running max that keeps NaN, matching the solver kernel.
fn fold_delta(max_delta: f64, delta: f64) -> f64 {
    if max_delta.is_nan() || delta <= max_delta {
        max_delta
    } else {
        delta
    }
}

fn run(
    grid: &Grid,
    epsilon: f64,
    max_iterations: Option<u64>,
    mut sweep: impl FnMut(&mut Vec<f64>, usize, usize) -> f64,
) -> ReferenceRun {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut values = grid.as_slice().to_vec();
    let mut max_deltas = Vec::new();
    loop {
        let delta = sweep(&mut values, rows, cols);
        max_deltas.push(delta);
        let iterations = max_deltas.len() as u64;
        if delta <= epsilon || max_iterations.is_some_and(|limit| iterations >= limit) {
            break;
        }
    }
    ReferenceRun {
        grid: Grid::from_vec(rows, cols, values).expect("shape is preserved"),
        iterations: max_deltas.len() as u64,
        max_deltas,
    }
}

/// Jacobi until the whole-grid max change is `<= epsilon`.
pub fn reference_jacobi(grid: &Grid, epsilon: f64, max_iterations: Option<u64>) -> ReferenceRun {
    run(grid, epsilon, max_iterations, |values, rows, cols| {
        let prev = values.clone();
        let mut max_delta = 0.0f64;
        for y in 1..rows - 1 {
            for x in 1..cols - 1 {
                let i = y * cols + x;
                let v = (prev[i - 1] + prev[i + 1] + prev[i - cols] + prev[i + cols]) / 4.0;
                max_delta = fold_delta(max_delta, (v - prev[i]).abs());
                values[i] = v;
            }
        }
        max_delta
    })
}

/// Gauss-Seidel, rows top to bottom, cells left to right.
pub fn reference_gauss_seidel(
    grid: &Grid,
    epsilon: f64,
    max_iterations: Option<u64>,
) -> ReferenceRun {
    run(grid, epsilon, max_iterations, |values, rows, cols| {
        let mut max_delta = 0.0f64;
        for y in 1..rows - 1 {
            for x in 1..cols - 1 {
                let i = y * cols + x;
                let old = values[i];
                let v = (values[i - 1] + values[i + 1] + values[i - cols] + values[i + cols]) / 4.0;
                max_delta = fold_delta(max_delta, (v - old).abs());
                values[i] = v;
            }
        }
        max_delta
    })
}
