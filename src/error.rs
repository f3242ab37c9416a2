//! Crate-wide error type.

/// Errors surfaced by the GA engine and its problem domains.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Construction-time misconfiguration: invalid GA parameters or
    /// problem data that would make evolution degenerate.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A catalog lookup referenced an id that does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// A chromosome broke a structural invariant of its domain.
    #[error("invalid chromosome: {0}")]
    InvalidChromosome(String),
}

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn not_found(kind: &'static str, id: impl Into<u64>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
