//! # Crease
//!
//! Domain-scoped reducers and action factories for a composable application
//! state tree.
//!
//! ## Core Concepts
//!
//! Crease separates **what happened** from **who cares**:
//! - [`Action`] = a type-erased transition request, routed by [`ActionMeta`]
//! - a **domain** = an identifier, a set of action constructors, and a pure
//!   reducer, all bound to the same [`DomainId`]
//!
//! The key principle: **reducers never mutate or fail on actions outside
//! their domain**. A reducer that is not addressed reports "unchanged", so
//! any number of domains can fold the same action stream into one state tree
//! without stepping on each other.
//!
//! ## Architecture
//!
//! ```text
//! actions.insert(..) ──► Action { label, meta, payload }
//!                               │
//!                               ▼ dispatch (host store loop)
//!            ┌──────────────────┼──────────────────┐
//!            ▼                  ▼                  ▼
//!      Reducer A          Reducer B          Reducer C
//!   meta match? ──no──► Ok(None)  (state kept, by identity)
//!        │yes
//!        ▼
//!   apply op ──► Ok(Some(next))   or   Err(DomainError)
//! ```
//!
//! ## Domain shapes
//!
//! Five recurring shapes of state, one factory type each:
//!
//! | Shape                  | State                | Verbs                          |
//! |------------------------|----------------------|--------------------------------|
//! | [`CollectionDomain`]   | `HashMap<String, T>` | insert, upsert, update, delete |
//! | [`KeyedDomain`]        | `HashMap<String, T>` | insert, upsert, update, delete |
//! | [`SingleObjectDomain`] | `Option<T>`          | insert, upsert, update, delete |
//! | [`SingleValueDomain`]  | `T`                  | set                            |
//! | [`SinglePropertyDomain`] | `T`                | set                            |
//!
//! ## Key Invariants
//!
//! 1. **Reducers are pure** - No IO, no async, no interior mutability
//! 2. **Out-of-domain actions are identity** - Never an error, never a clone
//! 3. **Applied transitions are copy-on-write** - Every `Ok(Some(next))` is
//!    structurally independent of the input state
//! 4. **Existence conflicts are errors** - Insert-over-present and
//!    mutate-absent surface as [`DomainError`], atomically
//! 5. **Labels are cosmetic** - The typed payload dispatches; relabeling an
//!    action never changes what it does
//!
//! ## Example
//!
//! ```ignore
//! use crease::{CollectionDomain, Field, Patchable, Reduce};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     name: String,
//!     nickname: Option<String>,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct UserPatch {
//!     name: Option<String>,
//!     nickname: Field<String>,
//! }
//!
//! impl Patchable for User {
//!     type Patch = UserPatch;
//!
//!     fn apply(&self, patch: &UserPatch) -> Self {
//!         User {
//!             name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
//!             nickname: patch.nickname.merge(self.nickname.as_ref()),
//!         }
//!     }
//!
//!     fn as_patch(&self) -> UserPatch {
//!         UserPatch {
//!             name: Some(self.name.clone()),
//!             nickname: Field::from_populated(self.nickname.as_ref()),
//!         }
//!     }
//! }
//!
//! let users = CollectionDomain::<User>::named("users");
//! let mut state = users.reducer.initial_state();
//!
//! for action in [
//!     users.actions.insert("u1", User { name: "Ada".into(), nickname: None }),
//!     users.actions.update("u1", UserPatch { nickname: Field::Set("ada".into()), ..Default::default() }),
//! ] {
//!     if let Some(next) = users.reducer.reduce(&state, &action)? {
//!         state = next;
//!     }
//! }
//!
//! assert_eq!(state["u1"].nickname.as_deref(), Some("ada"));
//! ```
//!
//! ## What This Is Not
//!
//! Crease is **not**:
//! - A store or dispatch loop (the host framework owns that)
//! - A middleware or subscription layer
//! - A persistence layer
//!
//! Crease **is**:
//! > The factory for self-contained domains — identifier, action
//! > constructors, pure reducer — that fold a shared action stream into
//! > their own slice of the state tree.

// Core modules
mod action;
mod collection;
mod error;
mod keyed;
mod patch;
mod reduce;
mod single_object;
mod single_property;
mod single_value;

// Testing utilities (feature-gated)
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Cross-domain composition tests (test-only)
#[cfg(test)]
mod compose_tests;

// Re-export the action vocabulary
pub use action::{Action, ActionMeta, DomainId, DomainKind};

// Re-export error types
pub use error::DomainError;

// Re-export patch primitives
pub use patch::{Field, Patchable};

// Re-export the reducer seam
pub use reduce::Reduce;

// Re-export the collection domain
pub use collection::{
    CollectionActions, CollectionDomain, CollectionOp, CollectionReducer, CollectionState,
    COLLECTION_DELETE, COLLECTION_INSERT, COLLECTION_UPDATE, COLLECTION_UPSERT,
};

// Re-export the keyed domain
pub use keyed::{
    KeyedActions, KeyedDomain, KeyedOp, KeyedReducer, KeyedState, GENERIC_DELETE, GENERIC_INSERT,
    GENERIC_UPDATE, GENERIC_UPSERT,
};

// Re-export the single-object domain
pub use single_object::{
    SingleObjectActions, SingleObjectDomain, SingleObjectOp, SingleObjectReducer,
    SINGLE_OBJECT_DELETE, SINGLE_OBJECT_INSERT, SINGLE_OBJECT_UPDATE, SINGLE_OBJECT_UPSERT,
};

// Re-export the single-value domain
pub use single_value::{
    SingleValueActions, SingleValueDomain, SingleValueOp, SingleValueReducer, UPDATE_SINGLE_VALUE,
};

// Re-export the single-property domain
pub use single_property::{
    SinglePropertyActions, SinglePropertyDomain, SinglePropertyOp, SinglePropertyReducer,
    UPDATE_SINGLE_PROPERTY,
};
