//! The reducer seam.

use crate::action::Action;
use crate::error::DomainError;

/// A pure fold of actions into state.
///
/// Reducers are the only place state transitions happen. They are
/// synchronous, side-effect-free, and total over foreign input: an action
/// that is not addressed to the reducer's domain is reported as unchanged,
/// never an error.
///
/// # Return contract
///
/// - `Ok(Some(next))` — the action was applied; `next` is a wholly new state
///   value, structurally independent of the input (the input is never
///   mutated in place, so callers may rely on shallow comparison for change
///   detection).
/// - `Ok(None)` — the action was not addressed to this reducer (missing or
///   mismatched routing metadata, unrecognized operation). The caller keeps
///   its existing state object untouched.
/// - `Err(_)` — the action was addressed here but the operation conflicts
///   with the current state (see [`DomainError`]). No partial transition is
///   ever observable.
pub trait Reduce {
    /// The state slice this reducer owns.
    type State;

    /// The state before any action has been applied.
    ///
    /// Reducers carry their own default, the way a reducer bakes in its
    /// initial slice of a combined state tree.
    fn initial_state(&self) -> Self::State;

    /// Fold one action into the state.
    fn reduce(&self, state: &Self::State, action: &Action)
        -> Result<Option<Self::State>, DomainError>;
}
