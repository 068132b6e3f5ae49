//! Error types for the fusion annotator library.

use thiserror::Error;

/// Errors that can occur while loading annotation data.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// A validation constraint was violated.
    #[error("{0}")]
    Validation(String),

    /// A file format error was detected.
    #[error("{0}")]
    Format(String),

    /// Not a single protein domain could be loaded, so the domain annotation is unusable.
    #[error("failed to parse GFF3 file: no protein domains loaded from {0}")]
    NoProteinDomains(String),
}
