//! Testing utilities for driving reducers action by action.
//!
//! # Feature Flag
//!
//! This module is only available with the `testing` feature (it is always
//! compiled for the crate's own tests):
//!
//! ```toml
//! [dev-dependencies]
//! crease = { version = "0.1", features = ["testing"] }
//! ```
//!
//! [`Store`] is deliberately minimal — hold a state, fold actions into it,
//! surface reducer errors. It exists so tests read as dispatch scripts; the
//! real dispatch loop, middleware, and subscription mechanics belong to the
//! host application framework, not to this crate.

use crate::action::Action;
use crate::error::DomainError;
use crate::reduce::Reduce;

/// A synchronous dispatch harness around one reducer.
///
/// # Example
///
/// ```ignore
/// let domain = SingleValueDomain::named(0, "COUNTER");
/// let mut store = Store::new(domain.reducer);
/// store.dispatch(&domain.actions.set(1))?;
/// assert_eq!(store.state(), &1);
/// ```
pub struct Store<R: Reduce> {
    reducer: R,
    state: R::State,
}

impl<R: Reduce> Store<R> {
    /// Create a store seeded with the reducer's initial state.
    pub fn new(reducer: R) -> Self {
        let state = reducer.initial_state();
        Self { reducer, state }
    }

    /// Fold one action into the held state.
    ///
    /// Actions the reducer does not recognize leave the state object
    /// untouched — not replaced with an equal copy.
    pub fn dispatch(&mut self, action: &Action) -> Result<(), DomainError> {
        if let Some(next) = self.reducer.reduce(&self.state, action)? {
            self.state = next;
        }
        Ok(())
    }

    /// The current state.
    pub fn state(&self) -> &R::State {
        &self.state
    }
}
