//! Error taxonomy for the counting core

use thiserror::Error;

/// Errors surfaced by visitor-counting operations.
///
/// Validation failures carry a fixed message; operational failures wrap the
/// collaborator error transparently so the underlying description survives
/// to the caller.
#[derive(Debug, Error)]
pub enum CountError {
    /// The identifier is not a strict IPv4/IPv6 literal.
    #[error("invalid ip address")]
    InvalidIdentifier,

    /// A store or resolver call failed. Nothing is retried; the request
    /// aborts at the first failure.
    #[error(transparent)]
    Operational(#[from] anyhow::Error),
}
