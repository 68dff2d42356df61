//! Collection domains: a keyed map of items with four verbs.
//!
//! State is a `HashMap<String, T>`. Insert refuses to overwrite, update and
//! delete refuse to invent, upsert branches on presence. Every applied
//! operation yields a new map; the previous state is never mutated.

use std::collections::HashMap;
use std::marker::PhantomData;

use tracing::debug;

use crate::action::{Action, ActionMeta, DomainId, DomainKind};
use crate::error::DomainError;
use crate::patch::Patchable;
use crate::reduce::Reduce;

/// Canonical tag of collection insert actions.
pub const COLLECTION_INSERT: &str = "COLLECTION_INSERT_ACTION";
/// Canonical tag of collection upsert actions.
pub const COLLECTION_UPSERT: &str = "COLLECTION_UPSERT_ACTION";
/// Canonical tag of collection update actions.
pub const COLLECTION_UPDATE: &str = "COLLECTION_UPDATE_ACTION";
/// Canonical tag of collection delete actions.
pub const COLLECTION_DELETE: &str = "COLLECTION_DELETE_ACTION";

/// State slice owned by a collection domain.
///
/// Keys are unique and absence of a key is the only representation of
/// absence — no entry ever maps to a tombstone.
pub type CollectionState<T> = HashMap<String, T>;

/// The operations a collection reducer understands.
///
/// This enum is the authoritative dispatch key: it travels as the action
/// payload and the reducer matches on it exhaustively.
pub enum CollectionOp<T: Patchable> {
    /// Add a new entry; the key must be absent.
    Insert { id: String, item: T },
    /// Insert if absent, otherwise merge the item onto the existing entry.
    Upsert { id: String, item: T },
    /// Shallow-merge a patch onto an existing entry.
    Update { id: String, patch: T::Patch },
    /// Remove an existing entry.
    Delete { id: String },
}

impl<T: Patchable> CollectionOp<T> {
    fn tag(&self) -> &'static str {
        match self {
            Self::Insert { .. } => COLLECTION_INSERT,
            Self::Upsert { .. } => COLLECTION_UPSERT,
            Self::Update { .. } => COLLECTION_UPDATE,
            Self::Delete { .. } => COLLECTION_DELETE,
        }
    }
}

// Map transitions shared by the collection and keyed domains. Each returns a
// fresh map; the input is read-only.

pub(crate) fn insert_entry<T: Clone>(
    state: &HashMap<String, T>,
    id: &str,
    item: &T,
) -> Result<HashMap<String, T>, DomainError> {
    if state.contains_key(id) {
        return Err(DomainError::AlreadyExists);
    }
    let mut next = state.clone();
    next.insert(id.to_owned(), item.clone());
    Ok(next)
}

pub(crate) fn update_entry<T: Patchable>(
    state: &HashMap<String, T>,
    id: &str,
    patch: &T::Patch,
) -> Result<HashMap<String, T>, DomainError> {
    let existing = state.get(id).ok_or(DomainError::NotFound)?;
    let mut next = state.clone();
    next.insert(id.to_owned(), existing.apply(patch));
    Ok(next)
}

pub(crate) fn upsert_entry<T: Patchable>(
    state: &HashMap<String, T>,
    id: &str,
    item: &T,
) -> Result<HashMap<String, T>, DomainError> {
    if state.contains_key(id) {
        update_entry(state, id, &item.as_patch())
    } else {
        insert_entry(state, id, item)
    }
}

pub(crate) fn remove_entry<T: Clone>(
    state: &HashMap<String, T>,
    id: &str,
) -> Result<HashMap<String, T>, DomainError> {
    if !state.contains_key(id) {
        return Err(DomainError::NotFound);
    }
    let mut next = state.clone();
    next.remove(id);
    Ok(next)
}

/// Action constructors bound to one collection domain.
#[derive(Clone)]
pub struct CollectionActions<T> {
    domain: DomainId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CollectionActions<T>
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
        self.wrap(CollectionOp::Insert {
            id: id.into(),
            item,
        })
    }

    /// An action that inserts `item` under `id`, or merges it onto the
    /// existing entry.
    pub fn upsert(&self, id: impl Into<String>, item: T) -> Action {
        self.wrap(CollectionOp::Upsert {
            id: id.into(),
            item,
        })
    }

    /// An action that shallow-merges `patch` onto the entry under `id`.
    pub fn update(&self, id: impl Into<String>, patch: T::Patch) -> Action {
        self.wrap(CollectionOp::Update {
            id: id.into(),
            patch,
        })
    }

    /// An action that removes the entry under `id`.
    pub fn delete(&self, id: impl Into<String>) -> Action {
        self.wrap(CollectionOp::Delete { id: id.into() })
    }

    fn wrap(&self, op: CollectionOp<T>) -> Action {
        let tag = op.tag();
        Action::new(
            tag,
            ActionMeta {
                kind: DomainKind::Collection,
                domain: self.domain.clone(),
                op: tag,
            },
            op,
        )
    }
}

/// The reducer bound to one collection domain.
#[derive(Clone)]
pub struct CollectionReducer<T> {
    domain: DomainId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Reduce for CollectionReducer<T>
where
    T: Patchable + Send + Sync + 'static,
{
    type State = CollectionState<T>;

    fn initial_state(&self) -> Self::State {
        CollectionState::new()
    }

    fn reduce(
        &self,
        state: &Self::State,
        action: &Action,
    ) -> Result<Option<Self::State>, DomainError> {
        let Some(op) =
            action.payload_for::<CollectionOp<T>>(DomainKind::Collection, &self.domain)
        else {
            return Ok(None);
        };

        let next = match op {
            CollectionOp::Insert { id, item } => insert_entry(state, id, item)?,
            CollectionOp::Upsert { id, item } => upsert_entry(state, id, item)?,
            CollectionOp::Update { id, patch } => update_entry(state, id, patch)?,
            CollectionOp::Delete { id } => remove_entry(state, id)?,
        };
        debug!(domain = %self.domain, op = action.meta.op, "collection transition applied");
        Ok(Some(next))
    }
}

/// A collection domain: identifier, action constructors, reducer.
///
/// # Example
///
/// ```ignore
/// let users = CollectionDomain::<User>::named("users");
/// let action = users.actions.insert("u1", User::new("Ada"));
/// let state = users.reducer.reduce(&users.reducer.initial_state(), &action)?;
/// ```
#[derive(Clone)]
pub struct CollectionDomain<T> {
    /// The identifier every action of this domain carries.
    pub identifier: DomainId,
    /// Action constructors bound to [`Self::identifier`].
    pub actions: CollectionActions<T>,
    /// Reducer bound to [`Self::identifier`].
    pub reducer: CollectionReducer<T>,
}

impl<T> CollectionDomain<T>
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
            actions: CollectionActions::new(identifier.clone()),
            reducer: CollectionReducer {
                domain: identifier.clone(),
                _marker: PhantomData,
            },
            identifier,
        }
    }
}

impl<T> Default for CollectionDomain<T>
where
    T: Patchable + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
