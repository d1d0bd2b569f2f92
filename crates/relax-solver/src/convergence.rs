//! Local convergence tracking and the distributed termination decision.
//!
//! Every rank classifies each sweep by its largest local change. Turning
//! those local verdicts into one decision is method-specific:
//!
//! - Jacobi: [`reduce_and_broadcast`]. Non-root ranks report to rank 0,
//!   rank 0 ANDs the reports with its own verdict and broadcasts the
//!   decision. Every rank leaves the iteration with the same decision.
//! - Gauss-Seidel: verdicts are ANDed along the pipeline
//!   ([`fold_upstream`]); see [`seidel`](crate::seidel) for how the
//!   pipeline ends.
//!
//! Decisions are [`Signal`]s: `Converged` and `Stop` end the run,
//! `Continue` does not. Only the deciding rank reads the stop flag in
//! [`RunControl`] or checks the iteration limit, so all ranks observe a
//! stop in the same iteration.

use relax_comm::{CommError, Communicator, Signal};
use relax_core::RunControl;

use crate::config::SolverConfig;

/// Rank that reduces Jacobi convergence flags and broadcasts the decision.
pub const JACOBI_ROOT: usize = 0;

/// Why a rank stopped iterating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The convergence predicate held.
    Converged,
    /// The external stop flag was set.
    Stopped,
    /// The configured iteration limit was reached.
    IterationLimit,
}

/// A rank's position in the convergence protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConvergenceState {
    /// The last sweep still moved some cell by more than epsilon.
    #[default]
    Running,
    /// The last sweep was locally converged; the global decision is pending.
    ConvergedLocal,
    /// The rank has left the iteration loop.
    Terminated(Termination),
}

impl ConvergenceState {
    /// State after a sweep with largest change `max_delta`.
    pub fn after_sweep(max_delta: f64, epsilon: f64) -> Self {
        if locally_converged(max_delta, epsilon) {
            Self::ConvergedLocal
        } else {
            Self::Running
        }
    }

    /// Whether the last sweep was locally converged.
    pub fn is_locally_converged(self) -> bool {
        matches!(self, Self::ConvergedLocal)
    }

    /// The termination reason, once terminated.
    pub fn termination(self) -> Option<Termination> {
        match self {
            Self::Terminated(t) => Some(t),
            _ => None,
        }
    }
}

/// No cell moved by more than `epsilon`. A NaN delta is never converged.
pub fn locally_converged(max_delta: f64, epsilon: f64) -> bool {
    max_delta <= epsilon
}

/// The deciding rank's verdict after `iterations` completed sweeps, given
/// the global convergence flag.
///
/// Convergence wins over the iteration limit, which wins over the stop
/// flag.
pub fn decide(
    converged: bool,
    iterations: u64,
    config: &SolverConfig,
    control: &RunControl,
) -> Signal {
    if converged {
        Signal::Converged
    } else if config.limit_reached(iterations) || control.stop_requested() {
        Signal::Stop
    } else {
        Signal::Continue
    }
}

/// Map a received decision to a termination reason, or `None` to keep
/// iterating. A `Stop` is reported as [`Termination::IterationLimit`] when
/// the limit has been reached, so every rank derives the same reason.
pub fn termination_of(decision: Signal, iterations: u64, config: &SolverConfig) -> Option<Termination> {
    match decision {
        Signal::Converged => Some(Termination::Converged),
        Signal::Stop if config.limit_reached(iterations) => Some(Termination::IterationLimit),
        Signal::Stop => Some(Termination::Stopped),
        Signal::Continue | Signal::NotConverged => None,
    }
}

/// AND this rank's verdict into the flag received from upstream.
pub fn fold_upstream(upstream: Signal, local: bool) -> Signal {
    Signal::from_converged(upstream == Signal::Converged && local)
}

/// Jacobi termination round: gather every rank's local verdict on
/// [`JACOBI_ROOT`], decide there, and broadcast. Returns the decision on
/// every rank.
pub fn reduce_and_broadcast<C: Communicator + ?Sized>(
    comm: &C,
    local: bool,
    iterations: u64,
    config: &SolverConfig,
    control: &RunControl,
) -> Result<Signal, CommError> {
    let decision = if comm.rank() == JACOBI_ROOT {
        let mut all = local;
        for source in (0..comm.size()).filter(|&r| r != JACOBI_ROOT) {
            // Every report is drained even after one says no.
            let report = comm.recv_signal(source)?;
            all &= report == Signal::Converged;
        }
        decide(all, iterations, config, control)
    } else {
        comm.send_signal(JACOBI_ROOT, Signal::from_converged(local))?;
        Signal::Continue
    };
    comm.broadcast(JACOBI_ROOT, decision)
}
