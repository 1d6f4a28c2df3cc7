use crate::change::ChangeAction;
use crate::model::{Pointer, ThingId};
use serde_json::Value;

/// One mutation event on a remote twin.
///
/// Constructed once when an inbound event is deserialized and immutable
/// afterwards. `value` and `timestamp` are independently absent; every other
/// field is always present.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Change {
    thing_id: ThingId,
    action: ChangeAction,
    path: Pointer,
    value: Option<Value>,
    revision: u64,
    timestamp: Option<u64>,
}

impl Change {
    pub fn new(
        thing_id: ThingId,
        action: ChangeAction,
        path: Pointer,
        value: Option<Value>,
        revision: u64,
        timestamp: Option<u64>,
    ) -> Self {
        Self {
            thing_id,
            action,
            path,
            value,
            revision,
            timestamp,
        }
    }

    pub fn thing_id(&self) -> &ThingId {
        &self.thing_id
    }

    pub fn action(&self) -> ChangeAction {
        self.action
    }

    pub fn path(&self) -> &Pointer {
        &self.path
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Wall clock time of the change in epoch milliseconds, when the source
    /// supplied one.
    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(change: &Change) -> u64 {
        let mut hasher = DefaultHasher::new();
        change.hash(&mut hasher);
        hasher.finish()
    }

    fn change() -> Change {
        Change::new(
            ThingId::new("org.example:sensor-1"),
            ChangeAction::Updated,
            Pointer::parse("/attributes/location").unwrap(),
            Some(json!({"lat": 52.5})),
            42,
            Some(1_700_000_000_000),
        )
    }

    #[test]
    fn returns_every_field_supplied_at_construction() {
        let change = change();

        assert_eq!(change.thing_id().as_str(), "org.example:sensor-1");
        assert_eq!(change.action(), ChangeAction::Updated);
        assert_eq!(change.path().to_string(), "/attributes/location");
        assert_eq!(change.value(), Some(&json!({"lat": 52.5})));
        assert_eq!(change.revision(), 42);
        assert_eq!(change.timestamp(), Some(1_700_000_000_000));
    }

    #[test]
    fn keeps_optional_fields_independently_absent() {
        let change = Change::new(
            ThingId::new("org.example:sensor-1"),
            ChangeAction::Deleted,
            Pointer::root(),
            None,
            7,
            None,
        );

        assert_eq!(change.value(), None);
        assert_eq!(change.timestamp(), None);
    }

    #[test]
    fn equals_when_every_field_matches() {
        assert_eq!(change(), change());
        assert_eq!(hash_of(&change()), hash_of(&change()));
    }

    #[test]
    fn differs_when_any_single_field_changes() {
        let base = change();

        let variants = [
            Change::new(
                ThingId::new("org.example:sensor-2"),
                base.action(),
                base.path().clone(),
                base.value().cloned(),
                base.revision(),
                base.timestamp(),
            ),
            Change::new(
                base.thing_id().clone(),
                ChangeAction::Created,
                base.path().clone(),
                base.value().cloned(),
                base.revision(),
                base.timestamp(),
            ),
            Change::new(
                base.thing_id().clone(),
                base.action(),
                Pointer::root(),
                base.value().cloned(),
                base.revision(),
                base.timestamp(),
            ),
            Change::new(
                base.thing_id().clone(),
                base.action(),
                base.path().clone(),
                None,
                base.revision(),
                base.timestamp(),
            ),
            Change::new(
                base.thing_id().clone(),
                base.action(),
                base.path().clone(),
                base.value().cloned(),
                43,
                base.timestamp(),
            ),
            Change::new(
                base.thing_id().clone(),
                base.action(),
                base.path().clone(),
                base.value().cloned(),
                base.revision(),
                None,
            ),
        ];

        for variant in variants {
            assert_ne!(base, variant);
        }
    }
}
