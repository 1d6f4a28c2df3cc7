mod change;
mod feature_change;
mod sink;

pub use change::Change;
pub use feature_change::{FeatureChange, FeaturesChange};
pub use sink::ChangeSink;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Cause of a change on a twin. Closed set; match exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Created,
    Updated,
    Merged,
    Deleted,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Merged => "merged",
            Self::Deleted => "deleted",
        }
    }
}

impl Display for ChangeAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Change record as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Hash)]
pub enum TwinChange {
    Thing(Change),
    Feature(FeatureChange),
    Features(FeaturesChange),
}

impl TwinChange {
    /// The embedded generic change record, independent of the variant.
    pub fn change(&self) -> &Change {
        match self {
            Self::Thing(change) => change,
            Self::Feature(change) => change.change(),
            Self::Features(change) => change.change(),
        }
    }
}

impl From<Change> for TwinChange {
    fn from(value: Change) -> Self {
        Self::Thing(value)
    }
}

impl From<FeatureChange> for TwinChange {
    fn from(value: FeatureChange) -> Self {
        Self::Feature(value)
    }
}

impl From<FeaturesChange> for TwinChange {
    fn from(value: FeaturesChange) -> Self {
        Self::Features(value)
    }
}
