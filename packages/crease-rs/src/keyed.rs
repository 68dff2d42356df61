//! Keyed domains: the legacy un-specialized keyed map.
//!
//! Predates the collection domain and is kept so callers still dispatching
//! `GENERIC_*`-tagged actions keep working. Same verbs, same map semantics;
//! only the domain-kind flag and the canonical tags differ, so the reducer
//! delegates to the collection module's map transitions.

use std::marker::PhantomData;

use tracing::debug;

use crate::action::{Action, ActionMeta, DomainId, DomainKind};
use crate::collection::{insert_entry, remove_entry, update_entry, upsert_entry};
use crate::error::DomainError;
use crate::patch::Patchable;
use crate::reduce::Reduce;

/// Canonical tag of keyed insert actions.
pub const GENERIC_INSERT: &str = "GENERIC_INSERT_ACTION";
/// Canonical tag of keyed upsert actions.
pub const GENERIC_UPSERT: &str = "GENERIC_UPSERT_ACTION";
/// Canonical tag of keyed update actions.
pub const GENERIC_UPDATE: &str = "GENERIC_UPDATE_ACTION";
/// Canonical tag of keyed delete actions.
pub const GENERIC_DELETE: &str = "GENERIC_DELETE_ACTION";

/// State slice owned by a keyed domain.
pub type KeyedState<T> = std::collections::HashMap<String, T>;

/// The operations a keyed reducer understands.
pub enum KeyedOp<T: Patchable> {
    /// Add a new entry; the key must be absent.
    Insert { id: String, item: T },
    /// Insert if absent, otherwise merge the item onto the existing entry.
    Upsert { id: String, item: T },
    /// Shallow-merge a patch onto an existing entry.
    Update { id: String, patch: T::Patch },
    /// Remove an existing entry.
    Delete { id: String },
}

impl<T: Patchable> KeyedOp<T> {
    fn tag(&self) -> &'static str {
        match self {
            Self::Insert { .. } => GENERIC_INSERT,
            Self::Upsert { .. } => GENERIC_UPSERT,
            Self::Update { .. } => GENERIC_UPDATE,
            Self::Delete { .. } => GENERIC_DELETE,
        }
    }
}

/// Action constructors bound to one keyed domain.
#[derive(Clone)]
pub struct KeyedActions<T> {
    domain: DomainId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> KeyedActions<T>
where
    T: Patchable + Send + Sync + 'static,
{
    pub(crate) fn new(domain: DomainId) -> Self {
        Self {
            domain,
            _marker: PhantomData,
        }
    }

    /// An action that adds `item` under `id`.
    pub fn insert(&self, id: impl Into<String>, item: T) -> Action {
        self.wrap(KeyedOp::Insert {
            id: id.into(),
            item,
        })
    }

    /// An action that inserts `item` under `id`, or merges it onto the
    /// existing entry.
    pub fn upsert(&self, id: impl Into<String>, item: T) -> Action {
        self.wrap(KeyedOp::Upsert {
            id: id.into(),
            item,
        })
    }

    /// An action that shallow-merges `patch` onto the entry under `id`.
    pub fn update(&self, id: impl Into<String>, patch: T::Patch) -> Action {
        self.wrap(KeyedOp::Update {
            id: id.into(),
            patch,
        })
    }

    /// An action that removes the entry under `id`.
    pub fn delete(&self, id: impl Into<String>) -> Action {
        self.wrap(KeyedOp::Delete { id: id.into() })
    }

    fn wrap(&self, op: KeyedOp<T>) -> Action {
        let tag = op.tag();
        Action::new(
            tag,
            ActionMeta {
                kind: DomainKind::Keyed,
                domain: self.domain.clone(),
                op: tag,
            },
            op,
        )
    }
}

/// The reducer bound to one keyed domain.
#[derive(Clone)]
pub struct KeyedReducer<T> {
    domain: DomainId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Reduce for KeyedReducer<T>
where
    T: Patchable + Send + Sync + 'static,
{
    type State = KeyedState<T>;

    fn initial_state(&self) -> Self::State {
        KeyedState::new()
    }

    fn reduce(
        &self,
        state: &Self::State,
        action: &Action,
    ) -> Result<Option<Self::State>, DomainError> {
        let Some(op) = action.payload_for::<KeyedOp<T>>(DomainKind::Keyed, &self.domain) else {
            return Ok(None);
        };

        let next = match op {
            KeyedOp::Insert { id, item } => insert_entry(state, id, item)?,
            KeyedOp::Upsert { id, item } => upsert_entry(state, id, item)?,
            KeyedOp::Update { id, patch } => update_entry(state, id, patch)?,
            KeyedOp::Delete { id } => remove_entry(state, id)?,
        };
        debug!(domain = %self.domain, op = action.meta.op, "keyed transition applied");
        Ok(Some(next))
    }
}

/// A keyed domain: identifier, action constructors, reducer.
#[derive(Clone)]
pub struct KeyedDomain<T> {
    /// The identifier every action of this domain carries.
    pub identifier: DomainId,
    /// Action constructors bound to [`Self::identifier`].
    pub actions: KeyedActions<T>,
    /// Reducer bound to [`Self::identifier`].
    pub reducer: KeyedReducer<T>,
}

impl<T> KeyedDomain<T>
where
    T: Patchable + Send + Sync + 'static,
{
    /// Create a domain with a freshly minted identifier.
    pub fn new() -> Self {
        Self::bound_to(DomainId::mint())
    }

    /// Create a domain scoped by a caller-supplied discriminator.
    pub fn named(discriminator: impl Into<String>) -> Self {
        Self::bound_to(DomainId::named(discriminator))
    }

    fn bound_to(identifier: DomainId) -> Self {
        Self {
            actions: KeyedActions::new(identifier.clone()),
            reducer: KeyedReducer {
                domain: identifier.clone(),
                _marker: PhantomData,
            },
            identifier,
        }
    }
}

impl<T> Default for KeyedDomain<T>
where
    T: Patchable + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
