//! The action envelope and the vocabulary types that scope it.
//!
//! # Overview
//!
//! Every state transition in crease is described by an [`Action`]: a
//! type-erased record that carries a display label, an [`ActionMeta`] block,
//! and an opaque payload. The meta block is what reducers look at first:
//!
//! - [`DomainKind`] — which component family the action belongs to
//! - [`DomainId`] — which domain *instance* it is addressed to
//! - `op` — the canonical tag of the operation, for logging and labels
//!
//! The payload holds the typed operation enum of the owning component
//! (e.g. `CollectionOp<T>`). Reducers recover it with [`Action::downcast_ref`];
//! a failed downcast means the action is not theirs and the state is left
//! untouched. The outer label is cosmetic and overridable; the typed payload
//! is the dispatch key and cannot be forged by relabeling.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

/// Identifier scoping all actions of one domain instance.
///
/// Two domains with equal identifiers share a slice of the state tree; two
/// domains with different identifiers ignore each other's actions entirely.
/// Identifiers are immutable once created.
///
/// # Example
///
/// ```
/// use crease::DomainId;
///
/// let named = DomainId::named("users");
/// assert_eq!(named, DomainId::named("users"));
///
/// // Minted tokens are unique per call.
/// assert_ne!(DomainId::mint(), DomainId::mint());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainId {
    /// Caller-supplied discriminator.
    Named(String),
    /// Auto-minted token for domains created without a discriminator.
    Token(Uuid),
}

impl DomainId {
    /// Create an identifier from a caller-supplied discriminator.
    pub fn named(discriminator: impl Into<String>) -> Self {
        Self::Named(discriminator.into())
    }

    /// Mint a fresh unique identifier.
    ///
    /// Used when no discriminator is supplied, so unnamed domain instances
    /// never collide within (or across) processes.
    pub fn mint() -> Self {
        Self::Token(Uuid::new_v4())
    }

    /// The discriminator, if this identifier was created from one.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Token(_) => None,
        }
    }
}

impl From<&str> for DomainId {
    fn from(discriminator: &str) -> Self {
        Self::named(discriminator)
    }
}

impl From<String> for DomainId {
    fn from(discriminator: String) -> Self {
        Self::Named(discriminator)
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "{}", name),
            Self::Token(token) => write!(f, "{}", token),
        }
    }
}

/// The component family an action belongs to.
///
/// Stands in for per-component boolean flags (`collection: true`,
/// `generic: true`, ...) as a closed set, so a reducer checks one equality
/// instead of probing for its own flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainKind {
    /// Keyed map of items with insert/upsert/update/delete verbs.
    Collection,
    /// Legacy un-specialized keyed map (tagged `generic` on the wire).
    Keyed,
    /// One nullable slot.
    SingleObject,
    /// One bare value with a single set verb.
    SingleValue,
    /// Same as `SingleValue` under a different flag.
    SingleProperty,
}

impl DomainKind {
    /// Stable lowercase name, used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Keyed => "keyed",
            Self::SingleObject => "single_object",
            Self::SingleValue => "single_value",
            Self::SingleProperty => "single_property",
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing metadata carried by every action.
///
/// Reducers accept an action iff `kind` and `domain` both match their
/// binding and the payload downcasts to their operation type. `op` is the
/// canonical operation tag; it seeds the default label and shows up in logs,
/// but dispatch never branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMeta {
    /// Component family flag.
    pub kind: DomainKind,
    /// Identifier of the domain instance this action is addressed to.
    pub domain: DomainId,
    /// Canonical operation tag.
    pub op: &'static str,
}

/// A dispatched state transition request.
///
/// Actions are produced by a domain's action constructors and folded into
/// state by its reducer. The payload is type-erased so that actions from
/// many differently-typed domains can flow through one dispatch loop; each
/// reducer recovers its own operations and ignores everything else.
#[derive(Clone)]
pub struct Action {
    label: Cow<'static, str>,
    /// Routing metadata. See [`ActionMeta`].
    pub meta: ActionMeta,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Action {
    /// Create an action from raw parts.
    ///
    /// Domain action constructors are the usual way to obtain actions; this
    /// is public so callers can hand-build records for tooling or tests.
    pub fn new<P: Any + Send + Sync>(
        label: impl Into<Cow<'static, str>>,
        meta: ActionMeta,
        payload: P,
    ) -> Self {
        Self {
            label: label.into(),
            meta,
            payload: Arc::new(payload),
        }
    }

    /// Replace the display label.
    ///
    /// Labels exist for tooling and logs. Dispatch is driven by the typed
    /// payload, so relabeling never changes which reducer accepts the action
    /// or what it does.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = label.into();
        self
    }

    /// The display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Downcast the payload to a concrete operation type.
    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.payload.downcast_ref()
    }

    /// Resolve the payload for a reducer bound to `kind` + `domain`.
    ///
    /// Returns `None` on any mismatch: wrong component family, wrong domain
    /// instance, or a payload that is not `P`.
    pub(crate) fn payload_for<P: Any>(&self, kind: DomainKind, domain: &DomainId) -> Option<&P> {
        if self.meta.kind != kind || self.meta.domain != *domain {
            return None;
        }
        let payload = self.downcast_ref::<P>();
        if payload.is_none() {
            trace!(
                kind = kind.as_str(),
                domain = %domain,
                label = %self.label,
                "ignoring action with unrecognized operation payload"
            );
        }
        payload
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // DomainId Tests
    // =========================================================================

    #[test]
    fn test_named_ids_compare_by_discriminator() {
        assert_eq!(DomainId::named("users"), DomainId::named("users"));
        assert_ne!(DomainId::named("users"), DomainId::named("sessions"));
    }

    #[test]
    fn test_minted_ids_are_unique() {
        assert_ne!(DomainId::mint(), DomainId::mint());
    }

    #[test]
    fn test_minted_id_never_equals_named() {
        assert_ne!(DomainId::mint(), DomainId::named("users"));
    }

    #[test]
    fn test_as_named() {
        assert_eq!(DomainId::named("users").as_named(), Some("users"));
        assert_eq!(DomainId::mint().as_named(), None);
    }

    #[test]
    fn test_display_named() {
        assert_eq!(DomainId::named("users").to_string(), "users");
    }

    #[test]
    fn test_from_str() {
        let id: DomainId = "users".into();
        assert_eq!(id, DomainId::named("users"));
    }

    // =========================================================================
    // Action Tests
    // =========================================================================

    fn meta() -> ActionMeta {
        ActionMeta {
            kind: DomainKind::Collection,
            domain: DomainId::named("users"),
            op: "COLLECTION_INSERT_ACTION",
        }
    }

    #[test]
    fn test_label_defaults_to_construction_label() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32);
        assert_eq!(action.label(), "COLLECTION_INSERT_ACTION");
    }

    #[test]
    fn test_with_label_keeps_meta_intact() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32).with_label("ADD_USER");
        assert_eq!(action.label(), "ADD_USER");
        assert_eq!(action.meta.op, "COLLECTION_INSERT_ACTION");
        assert_eq!(action.meta.domain, DomainId::named("users"));
    }

    #[test]
    fn test_downcast_to_payload_type() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32);
        assert_eq!(action.downcast_ref::<u32>(), Some(&7));
        assert!(action.downcast_ref::<String>().is_none());
    }

    #[test]
    fn test_payload_for_rejects_wrong_kind() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32);
        let bound = DomainId::named("users");
        assert!(action
            .payload_for::<u32>(DomainKind::Keyed, &bound)
            .is_none());
    }

    #[test]
    fn test_payload_for_rejects_wrong_domain() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32);
        let bound = DomainId::named("sessions");
        assert!(action
            .payload_for::<u32>(DomainKind::Collection, &bound)
            .is_none());
    }

    #[test]
    fn test_payload_for_rejects_foreign_payload() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32);
        let bound = DomainId::named("users");
        assert!(action
            .payload_for::<String>(DomainKind::Collection, &bound)
            .is_none());
    }

    #[test]
    fn test_payload_for_accepts_full_match() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32);
        let bound = DomainId::named("users");
        assert_eq!(
            action.payload_for::<u32>(DomainKind::Collection, &bound),
            Some(&7)
        );
    }

    #[test]
    fn test_debug_omits_payload() {
        let action = Action::new("COLLECTION_INSERT_ACTION", meta(), 7u32);
        let debug = format!("{:?}", action);
        assert!(debug.contains("COLLECTION_INSERT_ACTION"));
        assert!(debug.contains(".."));
    }
}
