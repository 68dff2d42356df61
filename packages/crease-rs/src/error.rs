//! The pattern-matchable error type shared by all reducers.

use thiserror::Error;

/// Everything a reducer can refuse to do.
///
/// Only existence conflicts are errors: creating over a present entry, or
/// mutating an absent one. Out-of-domain and unrecognized actions are never
/// errors — reducers report those as "not mine" and the state is kept.
///
/// Errors propagate synchronously to whoever drives the dispatch; there is
/// no internal recovery and no partially-applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Insert targeted a key that is already present in a keyed domain.
    #[error("Item already exists")]
    AlreadyExists,

    /// Update or delete targeted a key that is absent from a keyed domain.
    #[error("Item not found")]
    NotFound,

    /// Insert targeted a single-object slot that already holds an item.
    #[error("The state is already initialized.")]
    AlreadyInitialized,

    /// Update targeted a single-object slot that is still empty.
    #[error("The state has not been initialized yet.")]
    NotInitialized,
}
