//! Core types for the Relax distributed relaxation solver.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! dense [`Grid`] buffer, the row-block [`Partition`] of the interior, the
//! initial [`BoundaryConditions`], the externally owned [`RunControl`]
//! record, and the error types shared by the rest of the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod control;
pub mod error;
pub mod grid;
pub mod partition;

pub use boundary::BoundaryConditions;
pub use control::RunControl;
pub use error::{GridError, PartitionError};
pub use grid::Grid;
pub use partition::{padded_rows, Neighbour, Partition};
