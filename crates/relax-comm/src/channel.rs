//! In-process transport over `crossbeam-channel`.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::communicator::Communicator;
use crate::error::CommError;
use crate::message::{Payload, Tag};
use crate::request::Request;

type Streams<T> = [T; Tag::COUNT];

/// One rank's endpoint in a fully connected channel mesh.
///
/// Holds a sender to every rank and a receiver from every rank, per
/// [`Tag`]. Only this endpoint holds the senders of its outgoing streams,
/// so when it is dropped (the rank finished, failed, or panicked) peers
/// blocked on it see [`CommError::Disconnected`] instead of hanging.
pub struct ChannelComm {
    rank: usize,
    size: usize,
    outboxes: Vec<Streams<Sender<Payload>>>,
    inboxes: Vec<Streams<Receiver<Payload>>>,
}

impl ChannelComm {
    /// Build endpoints for a world of `size` ranks, in rank order.
    pub fn world(size: usize) -> Result<Vec<Self>, CommError> {
        if size == 0 {
            return Err(CommError::EmptyWorld);
        }

        // mesh[src][dst][tag]
        let mesh: Vec<Vec<Streams<(Sender<Payload>, Receiver<Payload>)>>> = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| std::array::from_fn(|_| unbounded()))
                    .collect()
            })
            .collect();

        let endpoints = (0..size)
            .map(|rank| Self {
                rank,
                size,
                outboxes: (0..size)
                    .map(|dst| std::array::from_fn(|t| mesh[rank][dst][t].0.clone()))
                    .collect(),
                inboxes: (0..size)
                    .map(|src| std::array::from_fn(|t| mesh[src][rank][t].1.clone()))
                    .collect(),
            })
            .collect();
        Ok(endpoints)
    }

    fn outbox(&self, dest: usize, tag: Tag) -> Result<&Sender<Payload>, CommError> {
        self.check_rank(dest)?;
        Ok(&self.outboxes[dest][tag.index()])
    }

    fn inbox(&self, source: usize, tag: Tag) -> Result<&Receiver<Payload>, CommError> {
        self.check_rank(source)?;
        Ok(&self.inboxes[source][tag.index()])
    }
}

impl Communicator for ChannelComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn send(&self, dest: usize, tag: Tag, payload: Payload) -> Result<(), CommError> {
        self.outbox(dest, tag)?
            .send(payload)
            .map_err(|_| CommError::Disconnected { peer: dest, tag })
    }

    fn recv(&self, source: usize, tag: Tag) -> Result<Payload, CommError> {
        self.inbox(source, tag)?
            .recv()
            .map_err(|_| CommError::Disconnected { peer: source, tag })
    }

    fn isend(&self, dest: usize, tag: Tag, payload: Payload) -> Result<Request, CommError> {
        // Unbounded streams never block a sender, so the send completes here.
        self.send(dest, tag, payload)?;
        Ok(Request::sent())
    }

    fn irecv(&self, source: usize, tag: Tag) -> Result<Request, CommError> {
        Ok(Request::receiving(
            source,
            tag,
            self.inbox(source, tag)?.clone(),
        ))
    }
}

impl std::fmt::Debug for ChannelComm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelComm")
            .field("rank", &self.rank)
            .field("size", &self.size)
            .finish()
    }
}
