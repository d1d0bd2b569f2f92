//! I/O error types.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use relax_core::GridError;

/// Errors from writing or reading grid files.
#[derive(Debug)]
pub enum OutputError {
    /// The output file could not be created.
    Open {
        /// The file that failed to open.
        path: PathBuf,
        /// The OS error.
        source: io::Error,
    },
    /// Writing or reading the stream failed.
    Io(io::Error),
    /// A line of input is not a row of numbers.
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },
    /// Rows of different lengths, or no rows at all.
    Shape(GridError),
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "failed to open file {}: {source}", path.display())
            }
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Parse { line, reason } => write!(f, "line {line}: {reason}"),
            Self::Shape(e) => write!(f, "shape: {e}"),
        }
    }
}

impl Error for OutputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            Self::Shape(e) => Some(e),
            Self::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GridError> for OutputError {
    fn from(e: GridError) -> Self {
        Self::Shape(e)
    }
}
