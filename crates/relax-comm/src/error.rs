//! Transport error types.

use std::error::Error;
use std::fmt;

use crate::message::Tag;

/// Errors from message passing. All of them are fatal to a run: the
/// transport is assumed reliable and nothing is retried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommError {
    /// A world of zero ranks was requested.
    EmptyWorld,
    /// A peer rank outside `0..size`.
    InvalidRank {
        /// The offending rank.
        rank: usize,
        /// World size.
        size: usize,
    },
    /// The peer's endpoint is gone (it finished, failed, or panicked).
    Disconnected {
        /// The peer rank.
        peer: usize,
        /// The stream that was being used.
        tag: Tag,
    },
    /// A message of the wrong kind arrived on a stream.
    UnexpectedPayload {
        /// Sending rank.
        source: usize,
        /// Stream it arrived on.
        tag: Tag,
        /// What the receiver expected.
        expected: &'static str,
    },
    /// A gathered block whose length differs from the root's own block.
    BlockSizeMismatch {
        /// Sending rank.
        source: usize,
        /// Length of the root's block.
        expected: usize,
        /// Length received.
        actual: usize,
    },
    /// A rank's thread panicked.
    RankPanicked {
        /// The rank that panicked.
        rank: usize,
    },
    /// A rank's thread could not be spawned.
    SpawnFailed {
        /// The rank that was being spawned.
        rank: usize,
        /// OS error text.
        reason: String,
    },
}

impl fmt::Display for CommError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWorld => write!(f, "world must contain at least one rank"),
            Self::InvalidRank { rank, size } => {
                write!(f, "rank {rank} out of range for world of size {size}")
            }
            Self::Disconnected { peer, tag } => {
                write!(f, "rank {peer} disconnected on {tag} stream")
            }
            Self::UnexpectedPayload {
                source,
                tag,
                expected,
            } => write!(
                f,
                "unexpected payload from rank {source} on {tag} stream, expected {expected}"
            ),
            Self::BlockSizeMismatch {
                source,
                expected,
                actual,
            } => write!(
                f,
                "gathered block from rank {source} has {actual} values, expected {expected}"
            ),
            Self::RankPanicked { rank } => write!(f, "rank {rank} panicked"),
            Self::SpawnFailed { rank, reason } => {
                write!(f, "failed to spawn rank {rank}: {reason}")
            }
        }
    }
}

impl Error for CommError {}
