//! The rank-level communication interface.

use tracing::trace;

use crate::error::CommError;
use crate::message::{Payload, Signal, Tag};
use crate::request::Request;

/// One rank's view of the message-passing world.
///
/// Required methods are the point-to-point primitives; the row, signal,
/// and collective helpers are provided on top of them so every transport
/// gets identical collective semantics.
///
/// Blocking calls suspend the rank until the transfer can complete.
/// Sends are buffered: a send completes once the transport holds the
/// payload, not when the peer receives it.
pub trait Communicator: Send {
    /// This rank's index in `0..size()`.
    fn rank(&self) -> usize;

    /// Number of ranks.
    fn size(&self) -> usize;

    /// Send `payload` to `dest` on stream `tag`.
    fn send(&self, dest: usize, tag: Tag, payload: Payload) -> Result<(), CommError>;

    /// Block until the next message from `source` on stream `tag` arrives.
    fn recv(&self, source: usize, tag: Tag) -> Result<Payload, CommError>;

    /// Start a send and return a handle for it.
    fn isend(&self, dest: usize, tag: Tag, payload: Payload) -> Result<Request, CommError>;

    /// Start a receive and return a handle for it. At most one receive per
    /// `(source, tag)` should be outstanding; concurrent ones are matched
    /// in the order they are waited on.
    fn irecv(&self, source: usize, tag: Tag) -> Result<Request, CommError>;

    /// Reject peers outside `0..size()`.
    fn check_rank(&self, rank: usize) -> Result<(), CommError> {
        if rank >= self.size() {
            return Err(CommError::InvalidRank {
                rank,
                size: self.size(),
            });
        }
        Ok(())
    }

    /// Send a control signal.
    fn send_signal(&self, dest: usize, signal: Signal) -> Result<(), CommError> {
        self.send(dest, Tag::Control, Payload::Signal(signal))
    }

    /// Receive a control signal.
    fn recv_signal(&self, source: usize) -> Result<Signal, CommError> {
        self.recv(source, Tag::Control)?
            .into_signal(source, Tag::Control)
    }

    /// Blocking send of one grid row.
    fn send_row(&self, dest: usize, row: &[f64]) -> Result<(), CommError> {
        self.send(dest, Tag::Data, Payload::Values(row.to_vec()))
    }

    /// Blocking receive of one grid row.
    fn recv_row(&self, source: usize) -> Result<Vec<f64>, CommError> {
        self.recv(source, Tag::Data)?.into_values(source, Tag::Data)
    }

    /// Non-blocking send of one grid row. The row is copied before the
    /// call returns, so the caller may overwrite its buffer immediately.
    fn isend_row(&self, dest: usize, row: &[f64]) -> Result<Request, CommError> {
        self.isend(dest, Tag::Data, Payload::Values(row.to_vec()))
    }

    /// Non-blocking receive of one grid row.
    fn irecv_row(&self, source: usize) -> Result<Request, CommError> {
        self.irecv(source, Tag::Data)
    }

    /// Distribute `root`'s signal to every rank. Non-root ranks' `signal`
    /// argument is ignored; every rank returns the root's value.
    fn broadcast(&self, root: usize, signal: Signal) -> Result<Signal, CommError> {
        self.check_rank(root)?;
        if self.rank() == root {
            for dest in (0..self.size()).filter(|&r| r != root) {
                self.send(dest, Tag::Collective, Payload::Signal(signal))?;
            }
            trace!(rank = root, ?signal, "broadcast");
            Ok(signal)
        } else {
            self.recv(root, Tag::Collective)?
                .into_signal(root, Tag::Collective)
        }
    }

    /// Collect one equal-length block from every rank at `root`.
    ///
    /// The root returns `Some(blocks)` in rank order (its own block
    /// included); every other rank returns `None` once its block is sent.
    fn gather(&self, root: usize, block: Vec<f64>) -> Result<Option<Vec<Vec<f64>>>, CommError> {
        self.check_rank(root)?;
        if self.rank() != root {
            self.send(root, Tag::Collective, Payload::Values(block))?;
            return Ok(None);
        }

        let expected = block.len();
        let mut own = Some(block);
        let mut blocks = Vec::with_capacity(self.size());
        for source in 0..self.size() {
            if source == root {
                blocks.push(own.take().unwrap_or_default());
                continue;
            }
            let values = self
                .recv(source, Tag::Collective)?
                .into_values(source, Tag::Collective)?;
            if values.len() != expected {
                return Err(CommError::BlockSizeMismatch {
                    source,
                    expected,
                    actual: values.len(),
                });
            }
            blocks.push(values);
        }
        trace!(rank = root, blocks = blocks.len(), "gather complete");
        Ok(Some(blocks))
    }
}
