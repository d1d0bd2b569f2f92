//! Solve error type.

use std::error::Error;
use std::fmt;

use relax_comm::CommError;
use relax_core::{GridError, PartitionError};

use crate::config::ConfigError;

/// Errors from [`Solver`](crate::Solver) and
/// [`solve_parallel`](crate::solve_parallel).
///
/// Every variant is fatal to the run.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The grid cannot be partitioned over the world.
    Partition(PartitionError),
    /// A grid buffer could not be built or reshaped.
    Grid(GridError),
    /// A transfer failed.
    Comm(CommError),
    /// The collector rank finished without an assembled grid.
    MissingResult {
        /// The collector rank.
        collector: usize,
    },
}

impl SolveError {
    /// Whether this error only reflects a peer going away. Such errors are
    /// usually a consequence of a different rank's failure.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::Comm(CommError::Disconnected { .. }))
    }
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Partition(e) => write!(f, "partition: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Comm(e) => write!(f, "comm: {e}"),
            Self::MissingResult { collector } => {
                write!(f, "collector rank {collector} produced no result")
            }
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Partition(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Comm(e) => Some(e),
            Self::MissingResult { .. } => None,
        }
    }
}

impl From<ConfigError> for SolveError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<PartitionError> for SolveError {
    fn from(e: PartitionError) -> Self {
        Self::Partition(e)
    }
}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<CommError> for SolveError {
    fn from(e: CommError) -> Self {
        Self::Comm(e)
    }
}
