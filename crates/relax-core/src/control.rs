//! Externally owned run/stop record.
//!
//! A [`RunControl`] belongs to whoever drives the solve (a UI, a signal
//! handler, a test). The solver only reads [`stop_requested()`] at
//! iteration boundaries and only writes the iteration counter after a
//! sweep, so a stop never interrupts a sweep or a communication round.
//!
//! [`stop_requested()`]: RunControl::stop_requested

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Stop flag and progress counter shared between a solve and its driver.
#[derive(Debug, Default)]
pub struct RunControl {
    stop: AtomicBool,
    iteration: AtomicU64,
}

impl RunControl {
    /// A fresh record: not stopped, zero iterations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the solve to stop at the next iteration boundary.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Whether a stop has been requested.
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Clear a previous stop request so the record can drive another run.
    pub fn clear_stop(&self) {
        self.stop.store(false, Ordering::Release);
    }

    /// Iterations completed by the most recent solve.
    pub fn iteration(&self) -> u64 {
        self.iteration.load(Ordering::Acquire)
    }

    /// Record completed iterations. Called by the solver after each sweep.
    pub fn set_iteration(&self, iteration: u64) {
        self.iteration.store(iteration, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_round_trip() {
        let c = RunControl::new();
        assert!(!c.stop_requested());
        c.request_stop();
        assert!(c.stop_requested());
        c.clear_stop();
        assert!(!c.stop_requested());
    }

    #[test]
    fn iteration_counter() {
        let c = RunControl::new();
        assert_eq!(c.iteration(), 0);
        c.set_iteration(17);
        assert_eq!(c.iteration(), 17);
    }

    #[test]
    fn shared_across_threads() {
        let c = std::sync::Arc::new(RunControl::new());
        let c2 = c.clone();
        std::thread::spawn(move || c2.request_stop()).join().unwrap();
        assert!(c.stop_requested());
    }
}
