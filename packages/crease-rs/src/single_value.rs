//! Single-value domains: one bare value, one verb.
//!
//! Set unconditionally replaces the state with the payload. No existence
//! checks, no merging, no errors beyond routing (and routing mismatches are
//! silent).

use std::marker::PhantomData;

use tracing::debug;

use crate::action::{Action, ActionMeta, DomainId, DomainKind};
use crate::error::DomainError;
use crate::reduce::Reduce;

/// Canonical tag of single-value set actions.
pub const UPDATE_SINGLE_VALUE: &str = "UPDATE_SINGLE_VALUE_ACTION";

/// The operations a single-value reducer understands.
pub enum SingleValueOp<T> {
    /// Replace the state with `value`.
    Set { value: T },
}

/// Action constructors bound to one single-value domain.
#[derive(Clone)]
pub struct SingleValueActions<T> {
    domain: DomainId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SingleValueActions<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(domain: DomainId) -> Self {
        Self {
            domain,
            _marker: PhantomData,
        }
    }

    /// An action that replaces the state with `value`.
    pub fn set(&self, value: T) -> Action {
        Action::new(
            UPDATE_SINGLE_VALUE,
            ActionMeta {
                kind: DomainKind::SingleValue,
                domain: self.domain.clone(),
                op: UPDATE_SINGLE_VALUE,
            },
            SingleValueOp::Set { value },
        )
    }
}

/// The reducer bound to one single-value domain.
#[derive(Clone)]
pub struct SingleValueReducer<T> {
    domain: DomainId,
    initial: T,
}

impl<T> Reduce for SingleValueReducer<T>
where
    T: Clone + Send + Sync + 'static,
{
    type State = T;

    fn initial_state(&self) -> Self::State {
        self.initial.clone()
    }

    fn reduce(
        &self,
        _state: &Self::State,
        action: &Action,
    ) -> Result<Option<Self::State>, DomainError> {
        let Some(op) =
            action.payload_for::<SingleValueOp<T>>(DomainKind::SingleValue, &self.domain)
        else {
            return Ok(None);
        };

        let SingleValueOp::Set { value } = op;
        debug!(domain = %self.domain, op = action.meta.op, "single-value transition applied");
        Ok(Some(value.clone()))
    }
}

/// A single-value domain: identifier, action constructors, reducer.
#[derive(Clone)]
pub struct SingleValueDomain<T> {
    /// The identifier every action of this domain carries.
    pub identifier: DomainId,
    /// Action constructors bound to [`Self::identifier`].
    pub actions: SingleValueActions<T>,
    /// Reducer bound to [`Self::identifier`].
    pub reducer: SingleValueReducer<T>,
}

impl<T> SingleValueDomain<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a domain with a freshly minted identifier.
    pub fn new(initial: T) -> Self {
        Self::bound_to(initial, DomainId::mint())
    }

    /// Create a domain scoped by a caller-supplied discriminator.
    pub fn named(initial: T, discriminator: impl Into<String>) -> Self {
        Self::bound_to(initial, DomainId::named(discriminator))
    }

    fn bound_to(initial: T, identifier: DomainId) -> Self {
        Self {
            actions: SingleValueActions::new(identifier.clone()),
            reducer: SingleValueReducer {
                domain: identifier.clone(),
                initial,
            },
            identifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Store;

    fn domain() -> SingleValueDomain<i32> {
        SingleValueDomain::named(0, "COUNTER")
    }

    // =========================================================================
    // Domain Guard Tests
    // =========================================================================

    #[test]
    fn test_ignores_action_of_other_kind() {
        let domain = domain();
        let mut store = Store::new(domain.reducer);
        let action = Action::new(
            "OUT_OF_THE_DOMAIN_ACTION",
            ActionMeta {
                kind: DomainKind::SingleProperty,
                domain: DomainId::named("COUNTER"),
                op: "OUT_OF_THE_DOMAIN_ACTION",
            },
            (),
        );

        store.dispatch(&action).unwrap();

        assert_eq!(store.state(), &0);
    }

    #[test]
    fn test_ignores_action_of_other_domain() {
        let domain = domain();
        let mut store = Store::new(domain.reducer);
        let foreign = SingleValueDomain::named(0, "ANOTHER_DOMAIN").actions.set(1);

        store.dispatch(&foreign).unwrap();

        assert_eq!(store.state(), &0);
    }

    #[test]
    fn test_ignores_action_with_unknown_operation() {
        let domain = domain();
        let mut store = Store::new(domain.reducer);
        let action = Action::new(
            "OUT_OF_THE_DOMAIN_ACTION",
            ActionMeta {
                kind: DomainKind::SingleValue,
                domain: DomainId::named("COUNTER"),
                op: "OUT_OF_THE_DOMAIN_ACTION",
            },
            (),
        );

        store.dispatch(&action).unwrap();

        assert_eq!(store.state(), &0);
    }

    // =========================================================================
    // Set Tests
    // =========================================================================

    #[test]
    fn test_default_state() {
        let store = Store::new(domain().reducer);
        assert_eq!(store.state(), &0);
    }

    #[test]
    fn test_set_replaces_state() {
        let domain = domain();
        let mut store = Store::new(domain.reducer);

        store.dispatch(&domain.actions.set(1)).unwrap();

        assert_eq!(store.state(), &1);
    }

    #[test]
    fn test_set_is_independent_of_previous_value() {
        let domain = domain();
        let mut store = Store::new(domain.reducer);

        store.dispatch(&domain.actions.set(41)).unwrap();
        store.dispatch(&domain.actions.set(7)).unwrap();

        assert_eq!(store.state(), &7);
    }
}
