//! Shallow-merge patches with explicit field removal.
//!
//! # Why a three-state field
//!
//! In a dynamic object model a patch distinguishes three cases for free:
//! a field that is absent (keep the current value), a field set to a value
//! (replace it), and a field explicitly present with no value (remove it).
//! A typed language has to spell that out, so patches here describe optional
//! fields as [`Field`]:
//!
//! - [`Field::Keep`] — the field is not mentioned; the current value stays
//! - [`Field::Set`] — replace the current value
//! - [`Field::Unset`] — clear the field
//!
//! Required fields don't have an "unset" case; by convention a patch models
//! them as `Option<V>` where `None` means keep.
//!
//! # Example
//!
//! ```
//! use crease::{Field, Patchable};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Contact {
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct ContactPatch {
//!     name: Option<String>,
//!     email: Field<String>,
//! }
//!
//! impl Patchable for Contact {
//!     type Patch = ContactPatch;
//!
//!     fn apply(&self, patch: &ContactPatch) -> Self {
//!         Contact {
//!             name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
//!             email: patch.email.merge(self.email.as_ref()),
//!         }
//!     }
//!
//!     fn as_patch(&self) -> ContactPatch {
//!         ContactPatch {
//!             name: Some(self.name.clone()),
//!             email: Field::from_populated(self.email.as_ref()),
//!         }
//!     }
//! }
//!
//! let contact = Contact { name: "n".into(), email: Some("e".into()) };
//! let cleared = contact.apply(&ContactPatch { name: None, email: Field::Unset });
//! assert_eq!(cleared, Contact { name: "n".into(), email: None });
//! ```

use serde::{Deserialize, Serialize};

/// One optional field of a patch.
///
/// The default is [`Field::Keep`], so `#[derive(Default)]` on a patch struct
/// yields the empty patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Field<V> {
    /// Leave the current value untouched.
    #[default]
    Keep,
    /// Replace the current value.
    Set(V),
    /// Clear the field.
    Unset,
}

impl<V: Clone> Field<V> {
    /// Merge this field against the current value of an optional slot.
    pub fn merge(&self, current: Option<&V>) -> Option<V> {
        match self {
            Self::Keep => current.cloned(),
            Self::Set(value) => Some(value.clone()),
            Self::Unset => None,
        }
    }

    /// The field an item's populated slot contributes when the item stands
    /// in for a patch: `Set` if populated, `Keep` otherwise.
    ///
    /// Deliberately not `Unset` for empty slots — an item used as a patch
    /// merges onto the existing entry, it does not erase what it doesn't
    /// carry. See [`Patchable::as_patch`].
    pub fn from_populated(value: Option<&V>) -> Self {
        match value {
            Some(value) => Self::Set(value.clone()),
            None => Self::Keep,
        }
    }
}

impl<V> Field<V> {
    /// True if this field leaves the current value untouched.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// Items that can absorb a shallow patch.
///
/// Implemented by the item types stored in collection, keyed, and
/// single-object domains. `apply` is the merge used by update operations;
/// `as_patch` is how a full item stands in for a patch on the upsert path.
pub trait Patchable: Clone {
    /// The patch record merged onto items of this type.
    type Patch: Clone + Send + Sync + 'static;

    /// Produce a new item with the patch shallow-merged onto `self`.
    ///
    /// Fields the patch keeps must survive unchanged; fields it unsets must
    /// come out empty.
    fn apply(&self, patch: &Self::Patch) -> Self;

    /// The patch equivalent to this item: every populated field `Set`,
    /// unpopulated optional fields `Keep`.
    ///
    /// Upserting over an existing entry merges rather than replaces, so an
    /// item's empty optional fields leave the existing values alone.
    fn as_patch(&self) -> Self::Patch;
}
