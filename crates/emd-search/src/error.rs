//! The error type for the crate.

use emd_distances::emd::{EmdError, SolverStatus};

/// Errors from configuring, loading, searching and reporting.
#[derive(Debug)]
pub enum Error {
    /// The window shape, `k`, or some other parameter is invalid. Raised
    /// before any distance is computed.
    Configuration(String),
    /// Two images, or an image and a batch, disagree on the number of pixels.
    Shape {
        /// The expected number of pixels.
        expected: usize,
        /// The actual number of pixels.
        actual: usize,
    },
    /// The transportation problem behind an Earth-Mover's distance could not
    /// be solved.
    Solver(SolverStatus),
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// A file is not in the expected format.
    Format(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "invalid configuration: {msg}"),
            Self::Shape { expected, actual } => {
                write!(f, "shape mismatch: expected {expected} pixels, got {actual}")
            }
            Self::Solver(status) => write!(f, "solver failure: {status}"),
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EmdError> for Error {
    fn from(e: EmdError) -> Self {
        match e {
            EmdError::Configuration(msg) => Self::Configuration(msg),
            EmdError::Shape { expected, actual } => Self::Shape { expected, actual },
            EmdError::Solver(status) => Self::Solver(status),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Self {
        Self::Format(e.to_string())
    }
}
