//! Contiguous row-block decomposition of the grid interior.
//!
//! The interior rows `[1, rows - 1)` are cut into blocks of
//! `ceil((rows - 2) / process_count)` rows. Rank `k` starts at
//! `1 + k * block` and owns `min(block, rows - 1 - start)` rows. With the
//! ceil block size a trailing rank can run past the interior (e.g. 5
//! interior rows over 4 processes gives blocks of 2 and a fourth rank
//! starting at row 7); its row count saturates at zero so the union of all
//! ranges is still exactly the interior. Empty ranks are always trailing,
//! have no row neighbours, and take part only in the collectives.

use smallvec::SmallVec;

use crate::error::PartitionError;

/// Which side of a rank's block a neighbour sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighbour {
    /// `rank - 1`, owning the rows above.
    Upstream(usize),
    /// `rank + 1`, owning the rows below.
    Downstream(usize),
}

impl Neighbour {
    /// The neighbour's rank.
    pub fn rank(self) -> usize {
        match self {
            Self::Upstream(r) | Self::Downstream(r) => r,
        }
    }
}

/// The contiguous row range owned by one rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    rank: usize,
    process_count: usize,
    rows: usize,
    block_size: usize,
    start_row: usize,
    row_count: usize,
}

/// `ceil((rows - 2) / process_count)`. Callers guarantee `rows >= 3` and
/// `process_count >= 1`.
fn block_size(rows: usize, process_count: usize) -> usize {
    (rows - 2).div_ceil(process_count)
}

/// Row capacity that gives every rank a full block of stride:
/// `ceil((rows - 2) / process_count) * process_count + 2`.
///
/// Returns `None` for the same inputs [`Partition::new`] rejects.
pub fn padded_rows(rows: usize, process_count: usize) -> Option<usize> {
    if rows < 3 || process_count == 0 {
        return None;
    }
    Some(block_size(rows, process_count) * process_count + 2)
}

impl Partition {
    /// Compute the row range owned by `rank` out of `process_count`
    /// processes on a grid with `rows` logical rows.
    ///
    /// Pure and deterministic. Rejects a zero process count, an
    /// out-of-range rank, a grid without interior rows, and more processes
    /// than interior rows.
    pub fn new(rank: usize, process_count: usize, rows: usize) -> Result<Self, PartitionError> {
        if process_count == 0 {
            return Err(PartitionError::NoProcesses);
        }
        if rank >= process_count {
            return Err(PartitionError::RankOutOfRange {
                rank,
                process_count,
            });
        }
        if rows < 3 {
            return Err(PartitionError::NoInteriorRows { rows });
        }
        let interior_rows = rows - 2;
        if process_count > interior_rows {
            return Err(PartitionError::TooManyProcesses {
                process_count,
                interior_rows,
            });
        }

        let block_size = block_size(rows, process_count);
        let start_row = (1 + rank * block_size).min(rows - 1);
        let row_count = block_size.min(rows - 1 - start_row);
        Ok(Self {
            rank,
            process_count,
            rows,
            block_size,
            start_row,
            row_count,
        })
    }

    /// Partitions for every rank, in rank order.
    pub fn all(process_count: usize, rows: usize) -> Result<Vec<Self>, PartitionError> {
        if process_count == 0 {
            return Err(PartitionError::NoProcesses);
        }
        (0..process_count)
            .map(|rank| Self::new(rank, process_count, rows))
            .collect()
    }

    /// Owning rank.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Total number of processes.
    pub fn process_count(&self) -> usize {
        self.process_count
    }

    /// Logical rows of the partitioned grid.
    pub fn grid_rows(&self) -> usize {
        self.rows
    }

    /// Uniform block stride shared by all ranks.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// First owned row.
    pub fn start_row(&self) -> usize {
        self.start_row
    }

    /// Number of owned rows (zero only for a degenerate trailing rank).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// One past the last owned row.
    pub fn end_row(&self) -> usize {
        self.start_row + self.row_count
    }

    /// Whether this rank owns no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Owned rows as a range.
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.start_row..self.end_row()
    }

    /// Padded row capacity for this layout.
    pub fn padded_rows(&self) -> usize {
        self.block_size * self.process_count + 2
    }

    /// Row index where block `rank` begins in a padded buffer.
    pub fn block_start(&self, rank: usize) -> usize {
        1 + rank * self.block_size
    }

    /// Halo row above the block, cached from `rank - 1`.
    pub fn upper_halo_row(&self) -> usize {
        self.start_row - 1
    }

    /// Halo row below the block, cached from `rank + 1`.
    pub fn lower_halo_row(&self) -> usize {
        self.end_row()
    }

    /// Number of ranks that own at least one row. Ranks `0..active_count()`
    /// are non-empty; the rest are empty.
    pub fn active_count(&self) -> usize {
        (self.rows - 2).div_ceil(self.block_size)
    }

    /// The upstream neighbour, if any. Empty ranks have none.
    pub fn upstream(&self) -> Option<Neighbour> {
        (self.rank > 0 && !self.is_empty()).then(|| Neighbour::Upstream(self.rank - 1))
    }

    /// The downstream neighbour, if any. A rank whose successor is empty
    /// has none: its lower halo is the fixed bottom boundary.
    pub fn downstream(&self) -> Option<Neighbour> {
        (self.rank + 1 < self.active_count()).then(|| Neighbour::Downstream(self.rank + 1))
    }

    /// Up to two row neighbours, upstream first.
    pub fn neighbours(&self) -> SmallVec<[Neighbour; 2]> {
        self.upstream().into_iter().chain(self.downstream()).collect()
    }

    /// Whether this is the last rank that owns rows, i.e. the tail of the
    /// row pipeline.
    pub fn is_last_active(&self) -> bool {
        self.rank + 1 == self.active_count()
    }
}
