//! Spawning and joining one thread per rank.

use std::thread;

use tracing::{debug, warn};

use crate::channel::ChannelComm;
use crate::communicator::Communicator;
use crate::error::CommError;

/// Run `body` on `size` ranks, each on its own named thread
/// (`relax-rank-<k>`), and return their results in rank order.
///
/// Every rank is joined before returning. If any rank panicked the first
/// panicking rank is reported as [`CommError::RankPanicked`]; its dropped
/// endpoint will already have unblocked any peer waiting on it.
pub fn launch<T, F>(size: usize, body: F) -> Result<Vec<T>, CommError>
where
    F: Fn(ChannelComm) -> T + Sync,
    T: Send,
{
    let comms = ChannelComm::world(size)?;
    debug!(size, "launching ranks");

    thread::scope(|scope| {
        let body = &body;
        let mut handles = Vec::with_capacity(size);
        let mut spawn_error = None;
        for comm in comms {
            let rank = comm.rank();
            let spawned = thread::Builder::new()
                .name(format!("relax-rank-{rank}"))
                .spawn_scoped(scope, move || body(comm));
            match spawned {
                Ok(handle) => handles.push((rank, handle)),
                Err(e) => {
                    // Remaining endpoints drop with the iterator, which
                    // disconnects the ranks already running.
                    spawn_error = Some(CommError::SpawnFailed {
                        rank,
                        reason: e.to_string(),
                    });
                    break;
                }
            }
        }

        let mut results = Vec::with_capacity(handles.len());
        let mut panicked = None;
        for (rank, handle) in handles {
            match handle.join() {
                Ok(value) => results.push(value),
                Err(_) => {
                    warn!(rank, "rank panicked");
                    panicked.get_or_insert(CommError::RankPanicked { rank });
                }
            }
        }

        if let Some(e) = spawn_error.or(panicked) {
            return Err(e);
        }
        Ok(results)
    })
}
