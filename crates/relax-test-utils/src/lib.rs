//! Test fixtures and a sequential reference solver for Relax development.
//!
//! [`reference`] relaxes a whole grid on one thread with plain index
//! arithmetic and no partitioning, so distributed results can be checked
//! against it bit for bit. [`fixtures`] builds the standard test grids.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod reference;

pub use fixtures::{assert_grids_close, heat_grid, random_interior, scenario_6x6};
pub use reference::{reference_gauss_seidel, reference_jacobi, ReferenceRun};
