//! Benchmark profiles for the Relax solvers.
//!
//! - [`reference_profile`]: the 200x200 reference heat plate
//! - [`stress_profile`]: 600x600 plate for scaling runs
//! - [`fixed_sweeps`]: a config that runs an exact number of sweeps, so
//!   timings compare equal work across process counts

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use relax_core::{BoundaryConditions, Grid, GridError};
use relax_solver::{Method, SolverConfig};

/// Reference plate: 200x200 with the default edge temperatures.
pub fn reference_profile() -> Result<Grid, GridError> {
    BoundaryConditions::default().build(200, 200)
}

/// Stress plate: 600x600 (360K cells).
pub fn stress_profile() -> Result<Grid, GridError> {
    BoundaryConditions::default().build(600, 600)
}

/// Exactly `sweeps` iterations of `method`: epsilon 0 never converges
/// first on these plates.
pub fn fixed_sweeps(method: Method, sweeps: u64) -> SolverConfig {
    SolverConfig {
        method,
        ..SolverConfig::default()
    }
    .with_epsilon(0.0)
    .with_max_iterations(sweeps)
}
