//! Error types for grid storage and domain partitioning.

use std::error::Error;
use std::fmt;

/// Errors arising from grid construction or reshaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A dimension of zero.
    Empty,
    /// The backing buffer could not be allocated.
    AllocationFailed {
        /// Requested row capacity.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },
    /// A grid needs at least one interior cell, i.e. 3 rows and 3 columns.
    TooSmall {
        /// Requested logical rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
    },
    /// A padded row capacity smaller than the logical row count.
    CapacityTooSmall {
        /// Logical rows that must fit.
        rows: usize,
        /// The capacity that was requested.
        capacity: usize,
    },
    /// A row or block of the wrong length was supplied.
    LengthMismatch {
        /// Expected number of values.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// A NaN or infinite cell where every value must be finite.
    NonFinite {
        /// Row of the first offending cell.
        row: usize,
        /// Column of the first offending cell.
        col: usize,
    },
    /// A row index outside the allocated capacity.
    RowOutOfBounds {
        /// The offending row.
        row: usize,
        /// Allocated row capacity.
        capacity: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid must have at least one row and one column"),
            Self::AllocationFailed { rows, cols } => {
                write!(f, "failed to allocate a {rows}x{cols} grid buffer")
            }
            Self::TooSmall { rows, cols } => {
                write!(f, "grid {rows}x{cols} has no interior cells (minimum is 3x3)")
            }
            Self::CapacityTooSmall { rows, capacity } => {
                write!(f, "row capacity {capacity} cannot hold {rows} logical rows")
            }
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
            Self::NonFinite { row, col } => write!(f, "cell ({row}, {col}) is not finite"),
            Self::RowOutOfBounds { row, capacity } => {
                write!(f, "row {row} out of bounds for capacity {capacity}")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from [`Partition::new`](crate::Partition::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartitionError {
    /// Process count of zero.
    NoProcesses,
    /// Rank is not smaller than the process count.
    RankOutOfRange {
        /// The offending rank.
        rank: usize,
        /// Total number of processes.
        process_count: usize,
    },
    /// Grid has fewer than 3 rows, so there is no interior to split.
    NoInteriorRows {
        /// Logical rows of the grid.
        rows: usize,
    },
    /// More processes than interior rows.
    TooManyProcesses {
        /// Requested process count.
        process_count: usize,
        /// Interior rows available (`rows - 2`).
        interior_rows: usize,
    },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoProcesses => write!(f, "process count must be at least 1"),
            Self::RankOutOfRange {
                rank,
                process_count,
            } => write!(f, "rank {rank} out of range for {process_count} processes"),
            Self::NoInteriorRows { rows } => {
                write!(f, "grid with {rows} rows has no interior rows")
            }
            Self::TooManyProcesses {
                process_count,
                interior_rows,
            } => write!(
                f,
                "{process_count} processes exceed the {interior_rows} interior rows"
            ),
        }
    }
}

impl Error for PartitionError {}
