//! The reference heat problem: a 200x200 plate with fixed edge
//! temperatures, relaxed on several in-process ranks and written to
//! `result_<P>.txt`.
//!
//! ```text
//! cargo run --release --example heat -- [processes] [jacobi|seidel|pipelined]
//! RUST_LOG=relax_solver=debug cargo run --example heat -- 4 seidel
//! ```

use std::process::ExitCode;

use relax::prelude::*;
use tracing_subscriber::EnvFilter;

const ROWS: usize = 200;
const COLS: usize = 200;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_names(true)
        .init();

    let mut args = std::env::args().skip(1);
    let processes: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(4);
    let config = match args.next().as_deref() {
        Some("seidel") => SolverConfig::gauss_seidel(),
        Some("pipelined") => {
            SolverConfig::gauss_seidel().with_seidel_termination(SeidelTermination::Pipelined)
        }
        _ => SolverConfig::jacobi(),
    };

    let grid = match BoundaryConditions::default().build(ROWS, COLS) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let control = RunControl::new();

    let report = match solve_parallel(processes, &grid, &config, &control) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let seconds = report.outcomes[report.collector].metrics.elapsed_us as f64 / 1e6;

    match write_result_file(".", &report.grid, processes) {
        Ok(path) => {
            println!(
                "{:?} in {} iterations, took {seconds:.6} seconds ({})",
                report.termination,
                report.iterations,
                path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
