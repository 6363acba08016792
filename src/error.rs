use std::path::PathBuf;

/// Errors surfaced by the paragraph engine and session layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Requested paragraph lies beyond what the remaining source can produce.
    /// Recoverable: callers should stop advancing, nothing is corrupted.
    #[error("no paragraph {requested}: end of document after {available} paragraphs")]
    EndOfDocument { requested: usize, available: usize },

    /// Persisted project state could not be parsed. Callers may offer a
    /// fresh scan of the referenced source instead.
    #[error("malformed project state: {reason}")]
    MalformedState { reason: String },

    /// The referenced text source could not be opened or read.
    #[error("source unavailable: {path}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedState { reason: reason.into() }
    }
}

/// Result type for prompter operations.
pub type Result<T> = std::result::Result<T, Error>;
