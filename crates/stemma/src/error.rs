//! Error types for Stemma operations.

use std::io;

use thiserror::Error;

/// The main error type for Stemma operations.
#[derive(Debug, Error)]
pub enum StemmaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid style configuration: {0}")]
    Config(String),

    /// A diagram declaration referenced a handle that does not belong to
    /// this diagram (handles are only valid for the diagram that issued
    /// them).
    #[error("dangling {kind} reference #{index}")]
    DanglingReference { kind: &'static str, index: usize },
}

impl StemmaError {
    pub(crate) fn dangling(kind: &'static str, index: usize) -> Self {
        Self::DanglingReference { kind, index }
    }
}
