//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors emitted by session assembly and the study loop.
///
/// An empty session is deliberately not an error: filters that match nothing
/// produce an empty plan the caller renders as a "nothing to review" state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session already completed")]
    Completed,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
