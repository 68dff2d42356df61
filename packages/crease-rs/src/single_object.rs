//! Single-object domains: one nullable slot.
//!
//! The state machine has two states, `None` (uninitialized) and `Some(T)`.
//! Insert only fills an empty slot, update only mutates a full one, upsert
//! branches, and delete always empties — idempotently, with no error.

use std::marker::PhantomData;

use tracing::debug;

use crate::action::{Action, ActionMeta, DomainId, DomainKind};
use crate::error::DomainError;
use crate::patch::Patchable;
use crate::reduce::Reduce;

/// Canonical tag of single-object insert actions.
pub const SINGLE_OBJECT_INSERT: &str = "SINGLE_OBJECT_INSERT_ACTION";
/// Canonical tag of single-object upsert actions.
pub const SINGLE_OBJECT_UPSERT: &str = "SINGLE_OBJECT_UPSERT_ACTION";
/// Canonical tag of single-object update actions.
pub const SINGLE_OBJECT_UPDATE: &str = "SINGLE_OBJECT_UPDATE_ACTION";
/// Canonical tag of single-object delete actions.
pub const SINGLE_OBJECT_DELETE: &str = "SINGLE_OBJECT_DELETE_ACTION";

/// The operations a single-object reducer understands.
pub enum SingleObjectOp<T: Patchable> {
    /// Fill the slot; it must be empty.
    Insert { item: T },
    /// Fill the slot if empty, otherwise merge the item onto its content.
    Upsert { item: T },
    /// Shallow-merge a patch onto the slot's content.
    Update { patch: T::Patch },
    /// Empty the slot. Never fails, even when already empty.
    Delete,
}

impl<T: Patchable> SingleObjectOp<T> {
    fn tag(&self) -> &'static str {
        match self {
            Self::Insert { .. } => SINGLE_OBJECT_INSERT,
            Self::Upsert { .. } => SINGLE_OBJECT_UPSERT,
            Self::Update { .. } => SINGLE_OBJECT_UPDATE,
            Self::Delete => SINGLE_OBJECT_DELETE,
        }
    }
}

/// Action constructors bound to one single-object domain.
#[derive(Clone)]
pub struct SingleObjectActions<T> {
    domain: DomainId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> SingleObjectActions<T>
where
    T: Patchable + Send + Sync + 'static,
{
    pub(crate) fn new(domain: DomainId) -> Self {
        Self {
            domain,
            _marker: PhantomData,
        }
    }

    /// An action that fills the empty slot with `item`.
    pub fn insert(&self, item: T) -> Action {
        self.wrap(SingleObjectOp::Insert { item })
    }

    /// An action that fills the slot with `item`, or merges it onto the
    /// current content.
    pub fn upsert(&self, item: T) -> Action {
        self.wrap(SingleObjectOp::Upsert { item })
    }

    /// An action that shallow-merges `patch` onto the slot's content.
    pub fn update(&self, patch: T::Patch) -> Action {
        self.wrap(SingleObjectOp::Update { patch })
    }

    /// An action that empties the slot.
    pub fn delete(&self) -> Action {
        self.wrap(SingleObjectOp::Delete)
    }

    fn wrap(&self, op: SingleObjectOp<T>) -> Action {
        let tag = op.tag();
        Action::new(
            tag,
            ActionMeta {
                kind: DomainKind::SingleObject,
                domain: self.domain.clone(),
                op: tag,
            },
            op,
        )
    }
}

/// The reducer bound to one single-object domain.
///
/// Carries the caller-supplied initial slot, which may already hold an item.
#[derive(Clone)]
pub struct SingleObjectReducer<T> {
    domain: DomainId,
    initial: Option<T>,
}

impl<T> Reduce for SingleObjectReducer<T>
where
    T: Patchable + Send + Sync + 'static,
{
    type State = Option<T>;

    fn initial_state(&self) -> Self::State {
        self.initial.clone()
    }

    fn reduce(
        &self,
        state: &Self::State,
        action: &Action,
    ) -> Result<Option<Self::State>, DomainError> {
        let Some(op) =
            action.payload_for::<SingleObjectOp<T>>(DomainKind::SingleObject, &self.domain)
        else {
            return Ok(None);
        };

        let next = match op {
            SingleObjectOp::Insert { item } => match state {
                Some(_) => return Err(DomainError::AlreadyInitialized),
                None => Some(item.clone()),
            },
            SingleObjectOp::Update { patch } => match state {
                Some(existing) => Some(existing.apply(patch)),
                None => return Err(DomainError::NotInitialized),
            },
            SingleObjectOp::Upsert { item } => match state {
                Some(existing) => Some(existing.apply(&item.as_patch())),
                None => Some(item.clone()),
            },
            SingleObjectOp::Delete => None,
        };
        debug!(domain = %self.domain, op = action.meta.op, "single-object transition applied");
        Ok(Some(next))
    }
}

/// A single-object domain: identifier, action constructors, reducer.
#[derive(Clone)]
pub struct SingleObjectDomain<T> {
    /// The identifier every action of this domain carries.
    pub identifier: DomainId,
    /// Action constructors bound to [`Self::identifier`].
    pub actions: SingleObjectActions<T>,
    /// Reducer bound to [`Self::identifier`].
    pub reducer: SingleObjectReducer<T>,
}

impl<T> SingleObjectDomain<T>
where
    T: Patchable + Send + Sync + 'static,
{
    /// Create a domain with a freshly minted identifier.
    ///
    /// The slot may start filled — pass `Some(item)` as the initial state.
    pub fn new(initial: Option<T>) -> Self {
        Self::bound_to(initial, DomainId::mint())
    }

    /// Create a domain scoped by a caller-supplied discriminator.
    pub fn named(initial: Option<T>, discriminator: impl Into<String>) -> Self {
        Self::bound_to(initial, DomainId::named(discriminator))
    }

    fn bound_to(initial: Option<T>, identifier: DomainId) -> Self {
        Self {
            actions: SingleObjectActions::new(identifier.clone()),
            reducer: SingleObjectReducer {
                domain: identifier.clone(),
                initial,
            },
            identifier,
        }
    }
}
