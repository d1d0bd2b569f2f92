//! Handles for non-blocking transfers.
//!
//! A [`Request`] stands for a transfer that may still be in flight. A
//! receive request owns nothing of the caller's grid; the values land in
//! the caller's buffer only when the request is waited on and the caller
//! copies them in. That is what keeps a kernel from ever reading a
//! half-received halo row.

use crossbeam_channel::Receiver;

use crate::error::CommError;
use crate::message::{Payload, Tag};

/// Result of waiting on a [`Request`].
#[derive(Debug, PartialEq)]
pub enum Completion {
    /// A send finished; the payload was handed to the transport.
    Sent,
    /// A receive finished with this payload.
    Received(Payload),
}

impl Completion {
    /// Unwrap received grid values. A completed send yields an error.
    pub fn into_values(self, source: usize, tag: Tag) -> Result<Vec<f64>, CommError> {
        match self {
            Self::Received(p) => p.into_values(source, tag),
            Self::Sent => Err(CommError::UnexpectedPayload {
                source,
                tag,
                expected: "values",
            }),
        }
    }
}

enum RequestState {
    Sent,
    Receiving {
        source: usize,
        tag: Tag,
        rx: Receiver<Payload>,
    },
}

/// An outstanding non-blocking send or receive.
#[must_use = "a request must be waited on before its buffer is used"]
pub struct Request {
    state: RequestState,
}

impl Request {
    pub(crate) fn sent() -> Self {
        Self {
            state: RequestState::Sent,
        }
    }

    pub(crate) fn receiving(source: usize, tag: Tag, rx: Receiver<Payload>) -> Self {
        Self {
            state: RequestState::Receiving { source, tag, rx },
        }
    }

    /// Whether this is a receive.
    pub fn is_receive(&self) -> bool {
        matches!(self.state, RequestState::Receiving { .. })
    }

    /// Block until the transfer completes.
    pub fn wait(self) -> Result<Completion, CommError> {
        match self.state {
            RequestState::Sent => Ok(Completion::Sent),
            RequestState::Receiving { source, tag, rx } => rx
                .recv()
                .map(Completion::Received)
                .map_err(|_| CommError::Disconnected { peer: source, tag }),
        }
    }
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            RequestState::Sent => f.debug_struct("Request").field("kind", &"send").finish(),
            RequestState::Receiving { source, tag, .. } => f
                .debug_struct("Request")
                .field("kind", &"recv")
                .field("source", source)
                .field("tag", tag)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_request_completes_immediately() {
        let r = Request::sent();
        assert!(!r.is_receive());
        assert_eq!(r.wait().unwrap(), Completion::Sent);
    }

    #[test]
    fn receive_request_waits_for_payload() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let r = Request::receiving(1, Tag::Data, rx);
        assert!(r.is_receive());
        tx.send(Payload::Values(vec![2.0, 3.0])).unwrap();
        let values = r.wait().unwrap().into_values(1, Tag::Data).unwrap();
        assert_eq!(values, vec![2.0, 3.0]);
    }

    #[test]
    fn receive_from_dropped_sender_is_disconnected() {
        let (tx, rx) = crossbeam_channel::unbounded::<Payload>();
        drop(tx);
        let err = Request::receiving(4, Tag::Data, rx).wait().unwrap_err();
        assert_eq!(
            err,
            CommError::Disconnected {
                peer: 4,
                tag: Tag::Data
            }
        );
    }
}
