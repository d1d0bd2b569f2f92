//! Relax: distributed iterative relaxation for the 2-D heat problem.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Relax sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use relax::prelude::*;
//!
//! // Top 200, bottom 400, left 100, right 300; interior at the mean.
//! let grid = BoundaryConditions::default().build(12, 12).unwrap();
//! let control = RunControl::new();
//!
//! let report = solve_parallel(3, &grid, &SolverConfig::jacobi(), &control).unwrap();
//! assert_eq!(report.termination, Termination::Converged);
//! assert_eq!(report.grid.rows(), 12);
//!
//! let mut text = Vec::new();
//! write_grid(&mut text, &report.grid).unwrap();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `relax-core` | `Grid`, `Partition`, boundary conditions, `RunControl` |
//! | [`comm`] | `relax-comm` | `Communicator`, in-process channel transport, rank launcher |
//! | [`solver`] | `relax-solver` | Jacobi and Gauss-Seidel solvers and their building blocks |
//! | [`io`] | `relax-io` | Text output and result-file naming |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grid storage, partitioning, and run control (`relax-core`).
pub use relax_core as types;

/// Message passing between ranks (`relax-comm`).
///
/// [`comm::Communicator`] is the seam for other transports;
/// [`comm::ChannelComm`] and [`comm::launch`] run ranks as threads.
pub use relax_comm as comm;

/// Solvers and their building blocks (`relax-solver`).
pub use relax_solver as solver;

/// Text output (`relax-io`).
pub use relax_io as io;

/// Common imports for typical Relax usage.
///
/// ```rust
/// use relax::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use relax_core::{BoundaryConditions, Grid, Partition, RunControl};

    // Transport
    pub use relax_comm::{launch, ChannelComm, Communicator};

    // Solver
    pub use relax_solver::{
        solve_parallel, Method, RankOutcome, SeidelTermination, SolveReport, Solver,
        SolverConfig, Termination,
    };

    // Errors
    pub use relax_comm::CommError;
    pub use relax_core::{GridError, PartitionError};
    pub use relax_io::OutputError;
    pub use relax_solver::{ConfigError, SolveError};

    // Output
    pub use relax_io::{result_file_name, write_grid, write_result_file};
}
