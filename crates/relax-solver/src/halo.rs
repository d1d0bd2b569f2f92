//! Boundary-row exchange between row neighbours.
//!
//! Jacobi overlaps the exchange with the sweep through [`HaloRequests`]:
//! receives are posted before the sweep, the first row goes upstream as
//! soon as it is computed, the last row goes downstream after the sweep,
//! and [`HaloRequests::wait_all`] is the only place received rows are
//! copied into the grid. Gauss-Seidel uses the blocking helpers at the
//! bottom of this module, in strict pipeline order.

use relax_comm::{CommError, Communicator, Request, Tag};
use relax_core::{Grid, Partition};

use crate::error::SolveError;

/// Which side and which way a halo transfer goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Own first row to `rank - 1`.
    UpstreamSend,
    /// Upper halo row from `rank - 1`.
    UpstreamRecv,
    /// Own last row to `rank + 1`.
    DownstreamSend,
    /// Lower halo row from `rank + 1`.
    DownstreamRecv,
}

impl Direction {
    /// All directions in slot order.
    pub const ALL: [Direction; 4] = [
        Direction::UpstreamSend,
        Direction::UpstreamRecv,
        Direction::DownstreamSend,
        Direction::DownstreamRecv,
    ];

    fn slot(self) -> usize {
        match self {
            Self::UpstreamSend => 0,
            Self::UpstreamRecv => 1,
            Self::DownstreamSend => 2,
            Self::DownstreamRecv => 3,
        }
    }
}

/// In-flight Jacobi halo transfers, at most one per [`Direction`].
#[derive(Debug, Default)]
pub struct HaloRequests {
    slots: [Option<Request>; 4],
}

impl HaloRequests {
    /// No transfers in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a transfer in `direction` has been started and not waited on.
    pub fn is_pending(&self, direction: Direction) -> bool {
        self.slots[direction.slot()].is_some()
    }

    fn put(&mut self, direction: Direction, request: Request) {
        debug_assert!(
            !self.is_pending(direction),
            "{direction:?} already has a transfer in flight"
        );
        self.slots[direction.slot()] = Some(request);
    }

    /// Post receives for both halo rows this rank has neighbours for.
    pub fn post_receives<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        partition: &Partition,
    ) -> Result<(), CommError> {
        if let Some(down) = partition.downstream() {
            self.put(Direction::DownstreamRecv, comm.irecv_row(down.rank())?);
        }
        if let Some(up) = partition.upstream() {
            self.put(Direction::UpstreamRecv, comm.irecv_row(up.rank())?);
        }
        Ok(())
    }

    /// Start sending the freshly computed first owned row of `next`
    /// upstream. Returns whether a send was started.
    pub fn send_first_row<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        partition: &Partition,
        next: &Grid,
    ) -> Result<bool, CommError> {
        let Some(up) = partition.upstream() else {
            return Ok(false);
        };
        let row = next.row(partition.start_row());
        self.put(Direction::UpstreamSend, comm.isend_row(up.rank(), row)?);
        Ok(true)
    }

    /// Start sending the last owned row of `next` downstream. Returns
    /// whether a send was started.
    pub fn send_last_row<C: Communicator + ?Sized>(
        &mut self,
        comm: &C,
        partition: &Partition,
        next: &Grid,
    ) -> Result<bool, CommError> {
        let Some(down) = partition.downstream() else {
            return Ok(false);
        };
        let row = next.row(partition.end_row() - 1);
        self.put(Direction::DownstreamSend, comm.isend_row(down.rank(), row)?);
        Ok(true)
    }

    /// Wait for every outstanding transfer and copy received rows into the
    /// halo rows of `next`. Returns the number of rows received.
    pub fn wait_all(&mut self, partition: &Partition, next: &mut Grid) -> Result<u64, SolveError> {
        let mut received = 0;
        for direction in Direction::ALL {
            let Some(request) = self.slots[direction.slot()].take() else {
                continue;
            };
            let completion = request.wait()?;
            let (peer, halo_row) = match direction {
                Direction::UpstreamSend | Direction::DownstreamSend => continue,
                Direction::UpstreamRecv => (
                    partition.rank() - 1,
                    partition.upper_halo_row(),
                ),
                Direction::DownstreamRecv => (
                    partition.rank() + 1,
                    partition.lower_halo_row(),
                ),
            };
            let row = completion.into_values(peer, Tag::Data)?;
            next.copy_row_from(halo_row, &row)?;
            received += 1;
        }
        Ok(received)
    }
}

// ── Blocking pipeline exchange ─────────────────────────────────────

/// Receive the upper halo row from `rank - 1` into `grid`. Returns
/// whether there was an upstream neighbour.
pub fn recv_upper_halo<C: Communicator + ?Sized>(
    comm: &C,
    partition: &Partition,
    grid: &mut Grid,
) -> Result<bool, SolveError> {
    let Some(up) = partition.upstream() else {
        return Ok(false);
    };
    let row = comm.recv_row(up.rank())?;
    grid.copy_row_from(partition.upper_halo_row(), &row)?;
    Ok(true)
}

/// Receive the lower halo row from `rank + 1` into `grid`. Returns
/// whether there was a downstream neighbour.
pub fn recv_lower_halo<C: Communicator + ?Sized>(
    comm: &C,
    partition: &Partition,
    grid: &mut Grid,
) -> Result<bool, SolveError> {
    let Some(down) = partition.downstream() else {
        return Ok(false);
    };
    let row = comm.recv_row(down.rank())?;
    grid.copy_row_from(partition.lower_halo_row(), &row)?;
    Ok(true)
}

/// Send the first owned row of `grid` to `rank - 1`.
pub fn send_first_row<C: Communicator + ?Sized>(
    comm: &C,
    partition: &Partition,
    grid: &Grid,
) -> Result<bool, CommError> {
    let Some(up) = partition.upstream() else {
        return Ok(false);
    };
    comm.send_row(up.rank(), grid.row(partition.start_row()))?;
    Ok(true)
}

/// Send the last owned row of `grid` to `rank + 1`.
pub fn send_last_row<C: Communicator + ?Sized>(
    comm: &C,
    partition: &Partition,
    grid: &Grid,
) -> Result<bool, CommError> {
    let Some(down) = partition.downstream() else {
        return Ok(false);
    };
    comm.send_row(down.rank(), grid.row(partition.end_row() - 1))?;
    Ok(true)
}
