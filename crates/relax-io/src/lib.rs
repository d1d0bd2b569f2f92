//! Plain-text grid output for Relax.
//!
//! The format is one line per grid row, cells separated by a single space
//! and printed with six decimals, every line newline-terminated:
//!
//! ```text
//! 100.000000 200.000000 200.000000 300.000000
//! 100.000000 250.000000 250.000000 300.000000
//! ```
//!
//! The collector of a run with `P` processes writes `result_<P>.txt`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod text;

pub use error::OutputError;
pub use text::{read_grid, result_file_name, write_grid, write_result_file};
