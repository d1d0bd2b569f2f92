//! Gauss-Seidel driver: in-place sweeps in a rank-ordered wavefront.
//!
//! Per iteration, rank `k`:
//!
//! 1. if listening upstream, receives `k - 1`'s convergence flag and its
//!    freshly swept last row;
//! 2. sweeps its block in place, sending its first row to `k - 1` (only
//!    when `k - 1` is listening, i.e. when step 1 happened) as soon as the
//!    row is done;
//! 3. if it has a downstream neighbour, sends its folded flag and last row
//!    to `k + 1` and receives `k + 1`'s first row as its lower halo.
//!
//! The lower halo is therefore one iteration old, exactly as in a
//! sequential top-to-bottom sweep. What follows depends on
//! [`SeidelTermination`]: a broadcast from the last active rank, or
//! independent per-rank termination.

use relax_comm::{Communicator, Signal};
use relax_core::Grid;
use tracing::{debug, trace};

use crate::config::SeidelTermination;
use crate::convergence::{decide, fold_upstream, termination_of, ConvergenceState, Termination};
use crate::error::SolveError;
use crate::halo::{recv_lower_halo, recv_upper_halo, send_first_row, send_last_row};
use crate::kernel::{fold_delta, relax_row_seidel};
use crate::metrics::SolveMetrics;
use crate::solver::{RankContext, RankRun};

pub(crate) fn run<C: Communicator + ?Sized>(
    ctx: &RankContext<'_, C>,
    original: &Grid,
) -> Result<RankRun, SolveError> {
    let part = &ctx.partition;
    let comm = ctx.comm;
    let mode = ctx.config.seidel_termination;
    let mut grid = original.padded(part.padded_rows())?;
    let mut metrics = SolveMetrics::default();

    if part.is_empty() && mode == SeidelTermination::Pipelined {
        // Nothing to relax and nobody waiting on us.
        debug!(rank = part.rank(), "empty rank skips the pipeline");
        return Ok(RankRun {
            local: grid,
            termination: Termination::Converged,
            metrics,
        });
    }

    let tail = part.active_count() - 1;
    let mut upstream_done = part.upstream().is_none();

    let termination = loop {
        let upstream = if upstream_done {
            None
        } else {
            let up = part.rank() - 1;
            let flag = comm.recv_signal(up)?;
            metrics.count_received(recv_upper_halo(comm, part, &mut grid)?);
            Some(flag)
        };

        let mut max_delta = 0.0f64;
        for y in part.rows() {
            max_delta = fold_delta(max_delta, relax_row_seidel(&mut grid, y));
            if y == part.start_row() && upstream.is_some() {
                metrics.count_sent(send_first_row(comm, part, &grid)?);
            }
        }
        metrics.iterations += 1;
        metrics.last_max_delta = max_delta;
        let iterations = metrics.iterations;
        let state = ConvergenceState::after_sweep(max_delta, ctx.config.epsilon);
        let local = state.is_locally_converged();

        let flag = match (mode, upstream) {
            (_, Some(Signal::Stop)) => Signal::Stop,
            (_, Some(up)) => fold_upstream(up, local),
            (SeidelTermination::Synchronized, None) => Signal::from_converged(local),
            // Head of a pipelined chain: this rank decides for itself and
            // everything downstream.
            (SeidelTermination::Pipelined, None) => {
                match decide(local, iterations, ctx.config, ctx.control) {
                    Signal::Continue => Signal::NotConverged,
                    decision => decision,
                }
            }
        };
        if mode == SeidelTermination::Pipelined && upstream.is_some_and(Signal::ends_run) {
            upstream_done = true;
            debug!(rank = part.rank(), iteration = iterations, "upstream finished");
        }

        if let Some(down) = part.downstream() {
            comm.send_signal(down.rank(), flag)?;
            metrics.count_sent(send_last_row(comm, part, &grid)?);
            metrics.count_received(recv_lower_halo(comm, part, &mut grid)?);
        }
        trace!(rank = part.rank(), iteration = iterations, max_delta, ?flag, "seidel sweep");

        let decision = match mode {
            SeidelTermination::Synchronized => {
                let mine = if part.rank() == tail {
                    decide(flag == Signal::Converged, iterations, ctx.config, ctx.control)
                } else {
                    Signal::Continue
                };
                comm.broadcast(tail, mine)?
            }
            SeidelTermination::Pipelined => flag,
        };
        ctx.record_iteration(iterations);
        if let Some(t) = termination_of(decision, iterations, ctx.config) {
            break t;
        }
    };

    Ok(RankRun {
        local: grid,
        termination,
        metrics,
    })
}
