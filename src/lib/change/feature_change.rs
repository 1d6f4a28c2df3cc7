use crate::change::{Change, ChangeAction};
use crate::model::{Feature, Features, Pointer, ThingId};
use serde_json::Value;

/// A [`Change`] scoped to one named feature of a twin.
///
/// Embeds the generic change record; its value is derived from the feature
/// payload at the payload's own schema version. The structured payload
/// itself is exposed through [`FeatureChange::feature`].
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct FeatureChange {
    change: Change,
    feature: Option<Feature>,
}

impl FeatureChange {
    pub fn new(
        thing_id: ThingId,
        action: ChangeAction,
        feature: Option<Feature>,
        path: Pointer,
        revision: u64,
        timestamp: Option<u64>,
    ) -> Self {
        let value = feature
            .as_ref()
            .map(|feature| feature.to_json(feature.schema_version()));

        Self {
            change: Change::new(thing_id, action, path, value, revision, timestamp),
            feature,
        }
    }

    pub fn thing_id(&self) -> &ThingId {
        self.change.thing_id()
    }

    pub fn action(&self) -> ChangeAction {
        self.change.action()
    }

    pub fn path(&self) -> &Pointer {
        self.change.path()
    }

    pub fn value(&self) -> Option<&Value> {
        self.change.value()
    }

    pub fn revision(&self) -> u64 {
        self.change.revision()
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.change.timestamp()
    }

    pub fn change(&self) -> &Change {
        &self.change
    }

    pub fn feature(&self) -> Option<&Feature> {
        self.feature.as_ref()
    }
}

/// A [`Change`] covering the whole `/features` sub-tree at once.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct FeaturesChange {
    change: Change,
    features: Option<Features>,
}

impl FeaturesChange {
    pub fn new(
        thing_id: ThingId,
        action: ChangeAction,
        features: Option<Features>,
        path: Pointer,
        revision: u64,
        timestamp: Option<u64>,
    ) -> Self {
        let value = features
            .as_ref()
            .map(|features| features.to_json(features.schema_version()));

        Self {
            change: Change::new(thing_id, action, path, value, revision, timestamp),
            features,
        }
    }

    pub fn thing_id(&self) -> &ThingId {
        self.change.thing_id()
    }

    pub fn action(&self) -> ChangeAction {
        self.change.action()
    }

    pub fn path(&self) -> &Pointer {
        self.change.path()
    }

    pub fn value(&self) -> Option<&Value> {
        self.change.value()
    }

    pub fn revision(&self) -> u64 {
        self.change.revision()
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.change.timestamp()
    }

    pub fn change(&self) -> &Change {
        &self.change
    }

    pub fn features(&self) -> Option<&Features> {
        self.features.as_ref()
    }
}
