//! Message vocabulary: stream tags, control signals, and payloads.

use std::fmt;

use crate::error::CommError;

/// Independent message streams between each pair of ranks.
///
/// Messages on one stream never overtake each other; messages on
/// different streams are unordered relative to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Convergence flags and stop/continue decisions.
    Control,
    /// Halo rows.
    Data,
    /// Broadcast and gather traffic.
    Collective,
}

impl Tag {
    /// Number of streams per rank pair.
    pub const COUNT: usize = 3;

    /// All tags in stream-index order.
    pub const ALL: [Tag; Tag::COUNT] = [Tag::Control, Tag::Data, Tag::Collective];

    /// Stream index in `0..Tag::COUNT`.
    pub fn index(self) -> usize {
        match self {
            Self::Control => 0,
            Self::Data => 1,
            Self::Collective => 2,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Control => write!(f, "control"),
            Self::Data => write!(f, "data"),
            Self::Collective => write!(f, "collective"),
        }
    }
}

/// Convergence and termination signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// The sender (and, in a pipeline, everything upstream of it) changed
    /// no cell by more than epsilon this iteration. As a termination
    /// decision: the whole world converged.
    Converged,
    /// Some cell still moved by more than epsilon.
    NotConverged,
    /// Run another iteration.
    Continue,
    /// Terminate after this iteration.
    Stop,
}

impl Signal {
    /// `Converged` or `NotConverged`.
    pub fn from_converged(converged: bool) -> Self {
        if converged {
            Self::Converged
        } else {
            Self::NotConverged
        }
    }

    /// `Stop` or `Continue`.
    pub fn from_stop(stop: bool) -> Self {
        if stop {
            Self::Stop
        } else {
            Self::Continue
        }
    }

    /// Whether this is an explicit stop.
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }

    /// Whether a rank receiving this as a decision terminates:
    /// `Converged` or `Stop`.
    pub fn ends_run(self) -> bool {
        matches!(self, Self::Converged | Self::Stop)
    }
}

/// What travels over a stream.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// A control signal.
    Signal(Signal),
    /// A row or block of grid values.
    Values(Vec<f64>),
}

impl Payload {
    /// Unwrap a signal, or report what arrived instead.
    pub fn into_signal(self, source: usize, tag: Tag) -> Result<Signal, CommError> {
        match self {
            Self::Signal(s) => Ok(s),
            Self::Values(_) => Err(CommError::UnexpectedPayload {
                source,
                tag,
                expected: "signal",
            }),
        }
    }

    /// Unwrap grid values, or report what arrived instead.
    pub fn into_values(self, source: usize, tag: Tag) -> Result<Vec<f64>, CommError> {
        match self {
            Self::Values(v) => Ok(v),
            Self::Signal(_) => Err(CommError::UnexpectedPayload {
                source,
                tag,
                expected: "values",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_indices_are_dense() {
        for (i, tag) in Tag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }

    #[test]
    fn signal_constructors() {
        assert_eq!(Signal::from_converged(true), Signal::Converged);
        assert_eq!(Signal::from_converged(false), Signal::NotConverged);
        assert!(Signal::from_stop(true).is_stop());
        assert!(!Signal::from_stop(false).is_stop());
        assert!(Signal::Converged.ends_run());
        assert!(Signal::Stop.ends_run());
        assert!(!Signal::Continue.ends_run());
        assert!(!Signal::NotConverged.ends_run());
    }

    #[test]
    fn payload_kind_mismatch_reports_source() {
        let err = Payload::Values(vec![1.0])
            .into_signal(3, Tag::Control)
            .unwrap_err();
        assert_eq!(
            err,
            CommError::UnexpectedPayload {
                source: 3,
                tag: Tag::Control,
                expected: "signal"
            }
        );
        assert!(Payload::Signal(Signal::Stop).into_values(0, Tag::Data).is_err());
    }
}
