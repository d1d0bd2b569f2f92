//! Assembling the owned blocks of every rank on the collector.
//!
//! Each rank contributes `block_size` rows starting at its block start in
//! the padded buffer, so every contribution has the same length even when
//! the last ranks own fewer rows (or none). The surplus rows are the
//! sender's copy of the bottom boundary and zero padding, which match the
//! collector's own copy and are cut off by the final truncation.

use relax_comm::Communicator;
use relax_core::{Grid, Partition};
use tracing::debug;

use crate::error::SolveError;

/// Send this rank's block of `local` to `collector`. On the collector,
/// return the full grid with the logical shape of `original`.
pub fn gather_result<C: Communicator + ?Sized>(
    comm: &C,
    partition: &Partition,
    local: &Grid,
    original: &Grid,
    collector: usize,
) -> Result<Option<Grid>, SolveError> {
    let stride = partition.block_size();
    let block = local
        .block(partition.block_start(partition.rank()), stride)?
        .to_vec();

    let Some(blocks) = comm.gather(collector, block)? else {
        return Ok(None);
    };

    let mut assembled = original.padded(partition.padded_rows())?;
    for (rank, values) in blocks.iter().enumerate() {
        assembled.write_block(partition.block_start(rank), values)?;
    }
    debug!(
        rank = collector,
        blocks = blocks.len(),
        rows = original.rows(),
        "result assembled"
    );
    Ok(Some(assembled.truncated()?))
}
