//! Tests for composing many domains over one action stream.
//!
//! Each scenario folds the same dispatched actions into several independent
//! stores, the way a combined state tree feeds every reducer every action.

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use crate::patch::{Field, Patchable};
    use crate::testing::Store;
    use crate::{
        Action, CollectionDomain, DomainId, SingleObjectDomain, SinglePropertyDomain,
        SingleValueDomain,
    };

    // ==========================================================================
    // Test Types
    // ==========================================================================

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct TestItem {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        optional0: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        optional1: Option<String>,
    }

    #[derive(Debug, Clone, Default)]
    struct TestItemPatch {
        name: Option<String>,
        optional0: Field<String>,
        optional1: Field<String>,
    }

    impl Patchable for TestItem {
        type Patch = TestItemPatch;

        fn apply(&self, patch: &TestItemPatch) -> Self {
            TestItem {
                name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
                optional0: patch.optional0.merge(self.optional0.as_ref()),
                optional1: patch.optional1.merge(self.optional1.as_ref()),
            }
        }

        fn as_patch(&self) -> TestItemPatch {
            TestItemPatch {
                name: Some(self.name.clone()),
                optional0: Field::from_populated(self.optional0.as_ref()),
                optional1: Field::from_populated(self.optional1.as_ref()),
            }
        }
    }

    fn item(name: &str) -> TestItem {
        TestItem {
            name: name.to_owned(),
            optional0: None,
            optional1: None,
        }
    }

    // ==========================================================================
    // Composition Tests
    // ==========================================================================

    #[test]
    fn test_one_action_stream_feeds_many_domains() {
        let users = CollectionDomain::<TestItem>::named("users");
        let profile = SingleObjectDomain::<TestItem>::named(None, "profile");
        let counter = SingleValueDomain::<i32>::named(0, "counter");

        let mut user_store = Store::new(users.reducer.clone());
        let mut profile_store = Store::new(profile.reducer.clone());
        let mut counter_store = Store::new(counter.reducer.clone());

        let stream: Vec<Action> = vec![
            users.actions.insert("u1", item("Ada")),
            counter.actions.set(1),
            profile.actions.insert(item("me")),
            users.actions.insert("u2", item("Grace")),
            counter.actions.set(2),
        ];

        // Every reducer sees every action, as in a combined state tree.
        for action in &stream {
            user_store.dispatch(action).unwrap();
            profile_store.dispatch(action).unwrap();
            counter_store.dispatch(action).unwrap();
        }

        assert_eq!(user_store.state().len(), 2);
        assert_eq!(profile_store.state(), &Some(item("me")));
        assert_eq!(counter_store.state(), &2);
    }

    #[test]
    fn test_anonymous_domains_never_collide() {
        let left = CollectionDomain::<TestItem>::new();
        let right = CollectionDomain::<TestItem>::new();
        let mut left_store = Store::new(left.reducer);
        let mut right_store = Store::new(right.reducer);

        let action = left.actions.insert("id", item("name"));
        left_store.dispatch(&action).unwrap();
        right_store.dispatch(&action).unwrap();

        assert_eq!(left_store.state().len(), 1);
        assert!(right_store.state().is_empty());
    }

    #[test]
    fn test_anonymous_identifiers_are_tokens() {
        let domain = SingleValueDomain::<i32>::new(0);
        assert!(matches!(domain.identifier, DomainId::Token(_)));
        assert_ne!(
            SingleValueDomain::<i32>::new(0).identifier,
            SingleValueDomain::<i32>::new(0).identifier
        );
    }

    #[test]
    fn test_relabeled_action_still_dispatches() {
        let users = CollectionDomain::<TestItem>::named("users");
        let mut store = Store::new(users.reducer);

        let action = users.actions.insert("u1", item("Ada")).with_label("ADD_USER");
        assert_eq!(action.label(), "ADD_USER");

        store.dispatch(&action).unwrap();

        assert_eq!(store.state()["u1"], item("Ada"));
    }

    #[test]
    fn test_same_discriminator_different_kind_stays_separate() {
        let value = SingleValueDomain::<i32>::named(0, "COUNTER");
        let property = SinglePropertyDomain::<i32>::named(0, "COUNTER");
        let mut value_store = Store::new(value.reducer);
        let mut property_store = Store::new(property.reducer);

        let action = value.actions.set(5);
        value_store.dispatch(&action).unwrap();
        property_store.dispatch(&action).unwrap();

        assert_eq!(value_store.state(), &5);
        assert_eq!(property_store.state(), &0);
    }

    #[test]
    fn test_collection_end_to_end() {
        let domain = CollectionDomain::<TestItem>::named("DOMAIN");
        let mut store = Store::new(domain.reducer);

        store
            .dispatch(&domain.actions.insert("id", item("name")))
            .unwrap();
        assert_eq!(
            serde_json::to_value(store.state()).unwrap(),
            json!({ "id": { "name": "name" } })
        );

        store.dispatch(&domain.actions.delete("id")).unwrap();
        assert_eq!(serde_json::to_value(store.state()).unwrap(), json!({}));
    }
}
