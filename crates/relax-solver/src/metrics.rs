//! Per-rank solve metrics.

/// Timing and traffic counters collected by one rank over a whole solve.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolveMetrics {
    /// Sweeps completed by this rank.
    pub iterations: u64,
    /// Wall-clock time from the start of the solve to the end of the
    /// gather, in microseconds.
    pub elapsed_us: u64,
    /// Largest local change in the final sweep.
    pub last_max_delta: f64,
    /// Halo rows sent to neighbours.
    pub halo_rows_sent: u64,
    /// Halo rows received from neighbours.
    pub halo_rows_received: u64,
}

impl SolveMetrics {
    /// Record one halo send if `sent`.
    pub(crate) fn count_sent(&mut self, sent: bool) {
        self.halo_rows_sent += u64::from(sent);
    }

    /// Record one halo receive if `received`.
    pub(crate) fn count_received(&mut self, received: bool) {
        self.halo_rows_received += u64::from(received);
    }
}
