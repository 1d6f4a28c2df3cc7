use crate::change::TwinChange;
use crate::model::Pointer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Thing,
    Feature,
}

/// Selects which published changes reach a subscriber.
///
/// An unset dimension matches everything; `ChangeKind::Feature` covers both
/// single-feature and whole-sub-tree changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionFilter {
    kind: Option<ChangeKind>,
    path: Option<Pointer>,
    namespaces: Vec<Box<str>>,
}

impl SubscriptionFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn thing_changes() -> Self {
        Self {
            kind: Some(ChangeKind::Thing),
            ..Self::default()
        }
    }

    pub fn feature_changes() -> Self {
        Self {
            kind: Some(ChangeKind::Feature),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: Pointer) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<Box<str>>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    pub fn with_namespaces(
        mut self,
        namespaces: impl IntoIterator<Item = impl Into<Box<str>>>,
    ) -> Self {
        self.namespaces
            .extend(namespaces.into_iter().map(Into::into));
        self
    }

    pub fn matches(&self, change: &TwinChange) -> bool {
        let kind_matches = match self.kind {
            None => true,
            Some(ChangeKind::Thing) => matches!(change, TwinChange::Thing(_)),
            Some(ChangeKind::Feature) => matches!(
                change,
                TwinChange::Feature(_) | TwinChange::Features(_)
            ),
        };

        if !kind_matches {
            return false;
        }

        if let Some(path) = &self.path {
            if !change.change().path().starts_with(path) {
                return false;
            }
        }

        if self.namespaces.is_empty() {
            return true;
        }

        let namespace = change.change().thing_id().namespace();
        self.namespaces
            .iter()
            .any(|candidate| candidate.as_ref() == namespace)
    }
}
