//! Solver configuration, validation, and error types.

use std::error::Error;
use std::fmt;

/// Default convergence tolerance.
pub const DEFAULT_EPSILON: f64 = 1e-4;

// ── Method ─────────────────────────────────────────────────────────

/// Update discipline for the relaxation sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Double-buffered: every cell is computed from the previous
    /// iteration's snapshot.
    #[default]
    Jacobi,
    /// In place: every cell uses the freshest available neighbours.
    GaussSeidel,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jacobi => write!(f, "jacobi"),
            Self::GaussSeidel => write!(f, "gauss-seidel"),
        }
    }
}

// ── SeidelTermination ──────────────────────────────────────────────

/// How the Gauss-Seidel pipeline ends.
///
/// In both modes each rank ANDs its local convergence with the flag it
/// receives from upstream and forwards the result downstream, so the last
/// rank of the pipeline holds the global decision for the iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeidelTermination {
    /// The last active rank broadcasts stop/continue after every sweep.
    /// All ranks stop on the same iteration and the result matches a
    /// sequential Gauss-Seidel sweep exactly.
    #[default]
    Synchronized,
    /// No broadcast. A rank stops listening to its upstream neighbour once
    /// that neighbour reports convergence, keeps iterating against the
    /// frozen upstream halo, and stops on its own local convergence. Ranks
    /// may finish at different iteration counts.
    Pipelined,
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`SolverConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Epsilon is NaN, infinite, or negative.
    InvalidEpsilon {
        /// The invalid value.
        value: f64,
    },
    /// An iteration limit of zero.
    ZeroIterationLimit,
    /// The requested collector is not a rank of the world.
    CollectorOutOfRange {
        /// Requested collector rank.
        collector: usize,
        /// World size.
        process_count: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEpsilon { value } => {
                write!(f, "epsilon must be finite and non-negative, got {value}")
            }
            Self::ZeroIterationLimit => write!(f, "max_iterations must be at least 1"),
            Self::CollectorOutOfRange {
                collector,
                process_count,
            } => write!(
                f,
                "collector rank {collector} out of range for {process_count} processes"
            ),
        }
    }
}

impl Error for ConfigError {}

// ── SolverConfig ───────────────────────────────────────────────────

/// Parameters shared by every rank of a solve.
///
/// All ranks must be given the same configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// A cell whose update moved it by more than this is not converged.
    /// Default: `1e-4`.
    pub epsilon: f64,
    /// Update discipline. Default: [`Method::Jacobi`].
    pub method: Method,
    /// Gauss-Seidel termination mode. Ignored for Jacobi.
    pub seidel_termination: SeidelTermination,
    /// Upper bound on iterations. `None` = run until converged or stopped.
    pub max_iterations: Option<u64>,
    /// Rank that assembles the result. `None` = rank 0 for Jacobi, the
    /// last rank that owns rows for Gauss-Seidel.
    pub collector: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            method: Method::Jacobi,
            seidel_termination: SeidelTermination::Synchronized,
            max_iterations: None,
            collector: None,
        }
    }
}

impl SolverConfig {
    /// Jacobi with default settings.
    pub fn jacobi() -> Self {
        Self::default()
    }

    /// Gauss-Seidel with default settings.
    pub fn gauss_seidel() -> Self {
        Self {
            method: Method::GaussSeidel,
            ..Self::default()
        }
    }

    /// Replace the tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Cap the number of iterations.
    pub fn with_max_iterations(mut self, limit: u64) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Select the Gauss-Seidel termination mode.
    pub fn with_seidel_termination(mut self, mode: SeidelTermination) -> Self {
        self.seidel_termination = mode;
        self
    }

    /// Pin the collector rank.
    pub fn with_collector(mut self, rank: usize) -> Self {
        self.collector = Some(rank);
        self
    }

    /// Check the rank-independent invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon {
                value: self.epsilon,
            });
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigError::ZeroIterationLimit);
        }
        Ok(())
    }

    /// [`validate()`](Self::validate) plus the checks that need the world
    /// size.
    pub fn validate_for(&self, process_count: usize) -> Result<(), ConfigError> {
        self.validate()?;
        match self.collector {
            Some(collector) if collector >= process_count => {
                Err(ConfigError::CollectorOutOfRange {
                    collector,
                    process_count,
                })
            }
            _ => Ok(()),
        }
    }

    /// Whether `iterations` has reached the configured limit.
    pub fn limit_reached(&self, iterations: u64) -> bool {
        self.max_iterations.is_some_and(|limit| iterations >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_jacobi() {
        let c = SolverConfig::default();
        assert_eq!(c.epsilon, 1e-4);
        assert_eq!(c.method, Method::Jacobi);
        assert_eq!(c.seidel_termination, SeidelTermination::Synchronized);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn bad_epsilon_rejected() {
        for value in [f64::NAN, f64::INFINITY, -1e-9] {
            let err = SolverConfig::jacobi().with_epsilon(value).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEpsilon { .. }));
        }
        assert!(SolverConfig::jacobi().with_epsilon(0.0).validate().is_ok());
    }

    #[test]
    fn zero_limit_rejected() {
        assert_eq!(
            SolverConfig::jacobi().with_max_iterations(0).validate(),
            Err(ConfigError::ZeroIterationLimit)
        );
    }

    #[test]
    fn collector_checked_against_world() {
        let c = SolverConfig::gauss_seidel().with_collector(3);
        assert!(c.validate().is_ok());
        assert!(c.validate_for(4).is_ok());
        assert_eq!(
            c.validate_for(3),
            Err(ConfigError::CollectorOutOfRange {
                collector: 3,
                process_count: 3
            })
        );
    }

    #[test]
    fn limit_reached_only_when_set() {
        assert!(!SolverConfig::jacobi().limit_reached(u64::MAX));
        let c = SolverConfig::jacobi().with_max_iterations(5);
        assert!(!c.limit_reached(4));
        assert!(c.limit_reached(5));
    }
}
