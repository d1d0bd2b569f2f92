//! Jacobi driver: double-buffered sweeps with overlapped halo exchange.

use relax_comm::Communicator;
use relax_core::Grid;
use tracing::trace;

use crate::convergence::{reduce_and_broadcast, termination_of, ConvergenceState};
use crate::error::SolveError;
use crate::halo::HaloRequests;
use crate::kernel::{fold_delta, relax_row_jacobi};
use crate::metrics::SolveMetrics;
use crate::solver::{RankContext, RankRun};

pub(crate) fn run<C: Communicator + ?Sized>(
    ctx: &RankContext<'_, C>,
    original: &Grid,
) -> Result<RankRun, SolveError> {
    let part = &ctx.partition;
    let comm = ctx.comm;
    let mut current = original.padded(part.padded_rows())?;
    let mut next = current.clone();
    let mut halo = HaloRequests::new();
    let mut metrics = SolveMetrics::default();

    let termination = loop {
        halo.post_receives(comm, part)?;

        let mut max_delta = 0.0f64;
        for y in part.rows() {
            max_delta = fold_delta(max_delta, relax_row_jacobi(&current, &mut next, y));
            if y == part.start_row() {
                metrics.count_sent(halo.send_first_row(comm, part, &next)?);
            }
        }
        metrics.count_sent(halo.send_last_row(comm, part, &next)?);
        metrics.halo_rows_received += halo.wait_all(part, &mut next)?;

        std::mem::swap(&mut current, &mut next);
        metrics.iterations += 1;
        metrics.last_max_delta = max_delta;
        let iterations = metrics.iterations;

        let state = ConvergenceState::after_sweep(max_delta, ctx.config.epsilon);
        trace!(rank = part.rank(), iteration = iterations, max_delta, ?state, "jacobi sweep");

        let decision = reduce_and_broadcast(
            comm,
            state.is_locally_converged(),
            iterations,
            ctx.config,
            ctx.control,
        )?;
        ctx.record_iteration(iterations);
        if let Some(t) = termination_of(decision, iterations, ctx.config) {
            break t;
        }
    };

    Ok(RankRun {
        local: current,
        termination,
        metrics,
    })
}
