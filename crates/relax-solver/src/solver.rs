//! Solve entry points.

use std::time::Instant;

use relax_comm::{launch, Communicator};
use relax_core::{Grid, GridError, Partition, RunControl};
use tracing::{debug, info};

use crate::config::{Method, SolverConfig};
use crate::convergence::{Termination, JACOBI_ROOT};
use crate::error::SolveError;
use crate::gather::gather_result;
use crate::metrics::SolveMetrics;
use crate::{jacobi, seidel};

/// What one rank reports after a solve.
#[derive(Clone, Debug, PartialEq)]
pub struct RankOutcome {
    /// The reporting rank.
    pub rank: usize,
    /// Sweeps this rank completed.
    pub iterations: u64,
    /// Why this rank stopped.
    pub termination: Termination,
    /// Timing and traffic counters.
    pub metrics: SolveMetrics,
    /// The assembled grid, on the collector rank only.
    pub grid: Option<Grid>,
}

/// Result of [`solve_parallel`].
#[derive(Clone, Debug, PartialEq)]
pub struct SolveReport {
    /// The assembled grid, with the logical shape of the input.
    pub grid: Grid,
    /// Rank that assembled `grid`.
    pub collector: usize,
    /// Sweeps completed by the collector.
    pub iterations: u64,
    /// Why the collector stopped.
    pub termination: Termination,
    /// Every rank's outcome in rank order. The collector's `grid` has been
    /// moved into [`grid`](Self::grid).
    pub outcomes: Vec<RankOutcome>,
}

/// Everything a driver needs for one rank's iteration loop.
pub(crate) struct RankContext<'a, C: ?Sized> {
    pub(crate) comm: &'a C,
    pub(crate) config: &'a SolverConfig,
    pub(crate) partition: Partition,
    pub(crate) control: &'a RunControl,
    pub(crate) collector: usize,
}

impl<C: Communicator + ?Sized> RankContext<'_, C> {
    /// Publish progress; only the collector writes the counter.
    pub(crate) fn record_iteration(&self, iterations: u64) {
        if self.comm.rank() == self.collector {
            self.control.set_iteration(iterations);
        }
    }
}

/// A driver's result before the gather.
pub(crate) struct RankRun {
    pub(crate) local: Grid,
    pub(crate) termination: Termination,
    pub(crate) metrics: SolveMetrics,
}

/// Rank that assembles the result under `config`.
fn resolve_collector(config: &SolverConfig, partition: &Partition) -> usize {
    config.collector.unwrap_or(match config.method {
        Method::Jacobi => JACOBI_ROOT,
        Method::GaussSeidel => partition.active_count() - 1,
    })
}

fn check_grid(grid: &Grid) -> Result<(), GridError> {
    if grid.rows() < 3 || grid.cols() < 3 {
        return Err(GridError::TooSmall {
            rows: grid.rows(),
            cols: grid.cols(),
        });
    }
    for (row, values) in grid.iter_rows().enumerate() {
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(GridError::NonFinite { row, col });
        }
    }
    Ok(())
}

/// One rank's solver.
///
/// Every rank of the world constructs a `Solver` with the same
/// configuration and calls [`solve`](Self::solve) with the same initial
/// grid.
#[derive(Debug)]
pub struct Solver<C> {
    comm: C,
    config: SolverConfig,
}

impl<C: Communicator> Solver<C> {
    /// Validate `config` against the world of `comm`.
    pub fn new(comm: C, config: SolverConfig) -> Result<Self, SolveError> {
        config.validate_for(comm.size())?;
        Ok(Self { comm, config })
    }

    /// This rank's communicator.
    pub fn comm(&self) -> &C {
        &self.comm
    }

    /// The validated configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Give the communicator back.
    pub fn into_comm(self) -> C {
        self.comm
    }

    /// Relax `grid` to convergence (or until stopped) and gather the
    /// result on the collector rank.
    ///
    /// `grid` holds the fixed boundary and the initial interior; it is not
    /// modified and must be finite everywhere (`GridError::NonFinite`).
    /// `control` is read for the stop flag and receives the iteration
    /// counter.
    pub fn solve(&self, grid: &Grid, control: &RunControl) -> Result<RankOutcome, SolveError> {
        check_grid(grid)?;
        let started = Instant::now();
        let rank = self.comm.rank();
        let partition = Partition::new(rank, self.comm.size(), grid.rows())?;
        let collector = resolve_collector(&self.config, &partition);
        debug!(
            rank,
            start_row = partition.start_row(),
            row_count = partition.row_count(),
            method = %self.config.method,
            collector,
            "rank starting"
        );

        let ctx = RankContext {
            comm: &self.comm,
            config: &self.config,
            partition,
            control,
            collector,
        };
        let RankRun {
            local,
            termination,
            mut metrics,
        } = match self.config.method {
            Method::Jacobi => jacobi::run(&ctx, grid)?,
            Method::GaussSeidel => seidel::run(&ctx, grid)?,
        };

        let assembled = gather_result(&self.comm, &partition, &local, grid, collector)?;
        metrics.elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        debug!(
            rank,
            iterations = metrics.iterations,
            ?termination,
            elapsed_us = metrics.elapsed_us,
            "rank finished"
        );

        Ok(RankOutcome {
            rank,
            iterations: metrics.iterations,
            termination,
            metrics,
            grid: assembled,
        })
    }
}

/// Solve `grid` on `process_count` in-process ranks.
///
/// Rejects an invalid configuration, a non-finite grid, or an impossible
/// partition before any rank is started. If ranks fail, the reported error is the first one that
/// is not merely a peer disconnecting.
pub fn solve_parallel(
    process_count: usize,
    grid: &Grid,
    config: &SolverConfig,
    control: &RunControl,
) -> Result<SolveReport, SolveError> {
    config.validate_for(process_count)?;
    check_grid(grid)?;
    let partitions = Partition::all(process_count, grid.rows())?;
    let collector = resolve_collector(config, &partitions[0]);

    info!(
        process_count,
        rows = grid.rows(),
        cols = grid.cols(),
        method = %config.method,
        epsilon = config.epsilon,
        "solve starting"
    );
    let started = Instant::now();

    let results = launch(process_count, |comm| {
        Solver::new(comm, config.clone())?.solve(grid, control)
    })?;

    let mut outcomes = Vec::with_capacity(process_count);
    let mut failure: Option<SolveError> = None;
    for result in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                let root_cause = failure
                    .as_ref()
                    .is_none_or(|prev| prev.is_disconnect() && !e.is_disconnect());
                if root_cause {
                    failure = Some(e);
                }
            }
        }
    }
    if let Some(e) = failure {
        return Err(e);
    }

    let grid = outcomes
        .get_mut(collector)
        .and_then(|o| o.grid.take())
        .ok_or(SolveError::MissingResult { collector })?;
    let iterations = outcomes[collector].iterations;
    let termination = outcomes[collector].termination;

    info!(
        iterations,
        ?termination,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "solve finished"
    );
    Ok(SolveReport {
        grid,
        collector,
        iterations,
        termination,
        outcomes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use relax_comm::ChannelComm;
    use relax_core::{BoundaryConditions, PartitionError};

    #[test]
    fn new_validates_config_against_world() {
        let comm = ChannelComm::world(2).unwrap().remove(0);
        let err = Solver::new(comm, SolverConfig::jacobi().with_collector(2)).unwrap_err();
        assert_eq!(
            err,
            SolveError::Config(ConfigError::CollectorOutOfRange {
                collector: 2,
                process_count: 2
            })
        );
    }

    #[test]
    fn single_rank_solve_returns_grid() {
        let comm = ChannelComm::world(1).unwrap().remove(0);
        let solver = Solver::new(comm, SolverConfig::jacobi()).unwrap();
        let grid = BoundaryConditions::default().build(5, 5).unwrap();
        let control = RunControl::new();
        let outcome = solver.solve(&grid, &control).unwrap();
        assert_eq!(outcome.rank, 0);
        assert_eq!(outcome.termination, Termination::Converged);
        assert_eq!(control.iteration(), outcome.iterations);
        let result = outcome.grid.unwrap();
        assert_eq!(result.rows(), 5);
        assert!(!result.is_padded());
    }

    #[test]
    fn too_many_processes_rejected_before_launch() {
        let grid = BoundaryConditions::default().build(5, 5).unwrap();
        let err = solve_parallel(4, &grid, &SolverConfig::jacobi(), &RunControl::new()).unwrap_err();
        assert_eq!(
            err,
            SolveError::Partition(PartitionError::TooManyProcesses {
                process_count: 4,
                interior_rows: 3
            })
        );
    }

    #[test]
    fn tiny_grid_rejected() {
        let grid = Grid::new(2, 5).unwrap();
        let err = solve_parallel(1, &grid, &SolverConfig::jacobi(), &RunControl::new()).unwrap_err();
        assert_eq!(err, SolveError::Grid(GridError::TooSmall { rows: 2, cols: 5 }));
    }

    #[test]
    fn non_finite_cells_rejected() {
        let mut grid = BoundaryConditions::default().build(6, 6).unwrap();
        grid[(2, 2)] = f64::NAN;
        for config in [SolverConfig::jacobi(), SolverConfig::gauss_seidel()] {
            let err = solve_parallel(2, &grid, &config, &RunControl::new()).unwrap_err();
            assert_eq!(err, SolveError::Grid(GridError::NonFinite { row: 2, col: 2 }));
        }

        let hot = BoundaryConditions {
            top: f64::INFINITY,
            ..BoundaryConditions::default()
        }
        .build(6, 6)
        .unwrap();
        let err = solve_parallel(1, &hot, &SolverConfig::gauss_seidel(), &RunControl::new())
            .unwrap_err();
        assert_eq!(err, SolveError::Grid(GridError::NonFinite { row: 0, col: 1 }));
    }

    #[test]
    fn default_collectors() {
        let parts = Partition::all(3, 6).unwrap();
        assert_eq!(resolve_collector(&SolverConfig::jacobi(), &parts[0]), 0);
        // Rank 2 is empty on a 6-row grid.
        assert_eq!(resolve_collector(&SolverConfig::gauss_seidel(), &parts[0]), 1);
        assert_eq!(
            resolve_collector(&SolverConfig::gauss_seidel().with_collector(2), &parts[0]),
            2
        );
    }
}
