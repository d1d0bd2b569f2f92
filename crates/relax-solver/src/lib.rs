//! Distributed relaxation solvers for the 2-D heat problem.
//!
//! A [`Solver`] runs on every rank of a [`Communicator`] world. Each rank
//! owns a contiguous block of interior rows (see
//! [`Partition`](relax_core::Partition)), relaxes it with the 4-neighbour
//! stencil, trades boundary rows with its neighbours, and takes part in a
//! distributed termination decision. After termination the owned blocks
//! are gathered on one collector rank.
//!
//! Two update disciplines are provided:
//!
//! - [`Method::Jacobi`]: double-buffered, order-independent. Halo rows
//!   travel on non-blocking requests that overlap with the sweep, and
//!   termination is an AND-reduction on rank 0 followed by a broadcast.
//! - [`Method::GaussSeidel`]: in place, order-dependent. Ranks form a
//!   wavefront pipeline in rank order; convergence flags are ANDed along
//!   the pipeline. See [`SeidelTermination`] for the two ways the pipeline
//!   can end.
//!
//! The building blocks are public for callers that drive their own loop:
//! [`kernel`] (the stencil), [`halo`] (boundary-row exchange),
//! [`convergence`] (verdicts and the termination round), and [`gather`].
//!
//! [`solve_parallel`] launches a whole in-process world and returns the
//! assembled grid.
//!
//! [`Communicator`]: relax_comm::Communicator

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod convergence;
pub mod error;
pub mod gather;
pub mod halo;
mod jacobi;
pub mod kernel;
pub mod metrics;
mod seidel;
pub mod solver;

pub use config::{ConfigError, Method, SeidelTermination, SolverConfig};
pub use convergence::{ConvergenceState, Termination};
pub use error::SolveError;
pub use metrics::SolveMetrics;
pub use solver::{solve_parallel, RankOutcome, SolveReport, Solver};
