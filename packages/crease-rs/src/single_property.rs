//! Single-property domains: one bare value, one verb.
//!
//! Behaviorally identical to the single-value domain. Only the kind flag
//! and the canonical tag differ, so actions of one never reach reducers of
//! the other and existing `UPDATE_SINGLE_PROPERTY_ACTION` consumers keep
//! their own slot.

use std::marker::PhantomData;

use tracing::debug;

use crate::action::{Action, ActionMeta, DomainId, DomainKind};
use crate::error::DomainError;
use crate::reduce::Reduce;

/// Canonical tag of single-property set actions.
pub const UPDATE_SINGLE_PROPERTY: &str = "UPDATE_SINGLE_PROPERTY_ACTION";

/// The operations a single-property reducer understands.
pub enum SinglePropertyOp<T> {
    /// Replace the state with `value`.
    Set { value: T },
}

/// Action constructors bound to one single-property domain.
#[derive(Clone)]
pub struct SinglePropertyActions<T> {
    domain: DomainId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SinglePropertyActions<T>
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
            UPDATE_SINGLE_PROPERTY,
            ActionMeta {
                kind: DomainKind::SingleProperty,
                domain: self.domain.clone(),
                op: UPDATE_SINGLE_PROPERTY,
            },
            SinglePropertyOp::Set { value },
        )
    }
}

/// The reducer bound to one single-property domain.
#[derive(Clone)]
pub struct SinglePropertyReducer<T> {
    domain: DomainId,
    initial: T,
}

impl<T> Reduce for SinglePropertyReducer<T>
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
            action.payload_for::<SinglePropertyOp<T>>(DomainKind::SingleProperty, &self.domain)
        else {
            return Ok(None);
        };

        let SinglePropertyOp::Set { value } = op;
        debug!(domain = %self.domain, op = action.meta.op, "single-property transition applied");
        Ok(Some(value.clone()))
    }
}

/// A single-property domain: identifier, action constructors, reducer.
#[derive(Clone)]
pub struct SinglePropertyDomain<T> {
    /// The identifier every action of this domain carries.
    pub identifier: DomainId,
    /// Action constructors bound to [`Self::identifier`].
    pub actions: SinglePropertyActions<T>,
    /// Reducer bound to [`Self::identifier`].
    pub reducer: SinglePropertyReducer<T>,
}

impl<T> SinglePropertyDomain<T>
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
            actions: SinglePropertyActions::new(identifier.clone()),
            reducer: SinglePropertyReducer {
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
    use crate::single_value::SingleValueDomain;
    use crate::testing::Store;

    fn domain() -> SinglePropertyDomain<i32> {
        SinglePropertyDomain::named(0, "COUNTER")
    }

    #[test]
    fn test_ignores_single_value_actions_with_same_discriminator() {
        // Same discriminator, different component family: the kind flag
        // keeps the two slots independent.
        let domain = domain();
        let mut store = Store::new(domain.reducer);
        let value_domain = SingleValueDomain::named(0, "COUNTER");

        store.dispatch(&value_domain.actions.set(1)).unwrap();

        assert_eq!(store.state(), &0);
    }

    #[test]
    fn test_ignores_action_of_other_domain() {
        let domain = domain();
        let mut store = Store::new(domain.reducer);
        let foreign = SinglePropertyDomain::named(0, "ANOTHER_DOMAIN")
            .actions
            .set(1);

        store.dispatch(&foreign).unwrap();

        assert_eq!(store.state(), &0);
    }

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
        store.dispatch(&domain.actions.set(2)).unwrap();

        assert_eq!(store.state(), &2);
    }
}
