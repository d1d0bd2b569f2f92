//! Message passing between cooperating Relax ranks.
//!
//! Ranks share no grid memory. Everything they exchange goes through a
//! [`Communicator`]: tagged point-to-point sends and receives, non-blocking
//! [`Request`]s that must be waited on before their data is used, and the
//! two collectives the solvers need ([`broadcast`](Communicator::broadcast)
//! and [`gather`](Communicator::gather)).
//!
//! [`ChannelComm`] is the in-process transport: one OS thread per rank,
//! connected by a full mesh of unbounded `crossbeam-channel` channels, one
//! per (source, destination, [`Tag`]). [`launch`] spawns the ranks and
//! joins them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod communicator;
pub mod error;
pub mod launch;
pub mod message;
pub mod request;

pub use channel::ChannelComm;
pub use communicator::Communicator;
pub use error::CommError;
pub use launch::launch;
pub use message::{Payload, Signal, Tag};
pub use request::{Completion, Request};
