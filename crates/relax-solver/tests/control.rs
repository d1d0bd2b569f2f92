//! Stop flag, iteration limit, and progress counter.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use relax_core::RunControl;
use relax_solver::{solve_parallel, SeidelTermination, SolverConfig, Termination};
use relax_test_utils::{heat_grid, reference_gauss_seidel, reference_jacobi};

fn all_configs() -> Vec<SolverConfig> {
    vec![
        SolverConfig::jacobi(),
        SolverConfig::gauss_seidel(),
        SolverConfig::gauss_seidel().with_seidel_termination(SeidelTermination::Pipelined),
    ]
}

#[test]
fn preset_stop_ends_every_rank_after_one_sweep() {
    let grid = heat_grid(12, 12);
    for config in all_configs() {
        let control = RunControl::new();
        control.request_stop();
        let report = solve_parallel(3, &grid, &config, &control).unwrap();
        assert_eq!(report.termination, Termination::Stopped, "{:?}", config.method);
        for outcome in &report.outcomes {
            assert_eq!(outcome.iterations, 1);
            assert_eq!(outcome.termination, Termination::Stopped);
        }
        assert_eq!(control.iteration(), 1);
    }
}

#[test]
fn iteration_limit_ends_every_rank_together() {
    let grid = heat_grid(16, 10);
    for config in all_configs() {
        let control = RunControl::new();
        let report = solve_parallel(4, &grid, &config.clone().with_max_iterations(7), &control).unwrap();
        assert_eq!(report.termination, Termination::IterationLimit);
        assert!(report.outcomes.iter().all(|o| o.iterations == 7));
        assert!(report
            .outcomes
            .iter()
            .all(|o| o.termination == Termination::IterationLimit));
        assert_eq!(control.iteration(), 7);
    }
}

#[test]
fn limited_runs_match_limited_reference() {
    let grid = heat_grid(16, 10);
    let control = RunControl::new();
    let jacobi = solve_parallel(4, &grid, &SolverConfig::jacobi().with_max_iterations(9), &control).unwrap();
    assert_eq!(jacobi.grid, reference_jacobi(&grid, 1e-4, Some(9)).grid);
    let seidel = solve_parallel(
        4,
        &grid,
        &SolverConfig::gauss_seidel().with_max_iterations(9),
        &control,
    )
    .unwrap();
    assert_eq!(seidel.grid, reference_gauss_seidel(&grid, 1e-4, Some(9)).grid);
}

#[test]
fn stop_from_another_thread_is_observed() {
    let grid = heat_grid(40, 40);
    let control = Arc::new(RunControl::new());
    let config = SolverConfig::jacobi().with_epsilon(0.0);

    let stopper = {
        let control = Arc::clone(&control);
        thread::spawn(move || {
            while control.iteration() < 5 {
                thread::sleep(Duration::from_millis(1));
            }
            control.request_stop();
        })
    };
    let report = solve_parallel(4, &grid, &config, &control).unwrap();
    stopper.join().unwrap();

    assert_eq!(report.termination, Termination::Stopped);
    assert!(report.iterations >= 5);
    let first = report.outcomes[0].iterations;
    assert!(report.outcomes.iter().all(|o| o.iterations == first));
    assert_eq!(control.iteration(), report.iterations);
}

#[test]
fn collector_override_receives_the_grid() {
    let grid = heat_grid(10, 6);
    let control = RunControl::new();
    let default = solve_parallel(3, &grid, &SolverConfig::jacobi(), &control).unwrap();
    let moved = solve_parallel(3, &grid, &SolverConfig::jacobi().with_collector(2), &control).unwrap();
    assert_eq!(default.collector, 0);
    assert_eq!(moved.collector, 2);
    assert_eq!(moved.grid, default.grid);
    assert!(moved.outcomes.iter().all(|o| o.grid.is_none()));
}
