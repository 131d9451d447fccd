use thiserror::Error;

/// Errors reported by the index.
///
/// Every variant is an expected, recoverable condition: the tree is left
/// untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The requested range has `start > end`.
    #[error("invalid interval: start ({start}) must be <= end ({end})")]
    InvalidRange {
        /// Requested start frame
        start: i64,
        /// Requested end frame
        end: i64,
    },
    /// No interval in the index carries the requested id.
    #[error("interval with id `{0}` not found")]
    NotFound(String),
}
