use crate::change::{Change, ChangeAction, ChangeSink, FeatureChange, FeaturesChange, TwinChange};
use crate::error::Error;
use crate::event::observer::EnvelopeObserver;
use crate::event::EventEnvelope;
use crate::model::{Feature, Features};
use serde_json::Value;

/// Maps an inbound envelope to a change record, `None` when the envelope is
/// of no interest to this mapper.
pub trait ChangeMapper<T> {
    fn map_event(&self, envelope: &EventEnvelope) -> Result<Option<T>, Error>;
}

/// Default mapping of envelopes onto the change model.
///
/// The first path segment decides the scope: anything outside `/features`
/// is a generic thing change, `/features` itself covers the whole feature
/// sub-tree, `/features/<name>` is a feature change. A feature payload is
/// only parsed when the path ends at the feature root; deeper paths
/// describe a sub-value, so the structured payload stays absent.
pub struct TwinEventMapper;

impl TwinEventMapper {
    fn payload_value(envelope: &EventEnvelope) -> Option<&Value> {
        match envelope.action() {
            ChangeAction::Deleted => None,
            _ => envelope.value(),
        }
    }

    fn thing_change(&self, envelope: &EventEnvelope) -> Change {
        Change::new(
            envelope.thing_id().clone(),
            envelope.action(),
            envelope.path().clone(),
            Self::payload_value(envelope).cloned(),
            envelope.revision(),
            envelope.timestamp(),
        )
    }

    fn feature_change(&self, name: &str, envelope: &EventEnvelope) -> Result<FeatureChange, Error> {
        let feature = match (envelope.path().len(), Self::payload_value(envelope)) {
            (2, Some(value)) => Some(Feature::from_json(name, value)?),
            _ => None,
        };

        Ok(FeatureChange::new(
            envelope.thing_id().clone(),
            envelope.action(),
            feature,
            envelope.path().clone(),
            envelope.revision(),
            envelope.timestamp(),
        ))
    }

    fn features_change(&self, envelope: &EventEnvelope) -> Result<FeaturesChange, Error> {
        let features = match Self::payload_value(envelope) {
            Some(value) => Some(Features::from_json(value)?),
            None => None,
        };

        Ok(FeaturesChange::new(
            envelope.thing_id().clone(),
            envelope.action(),
            features,
            envelope.path().clone(),
            envelope.revision(),
            envelope.timestamp(),
        ))
    }
}

impl ChangeMapper<TwinChange> for TwinEventMapper {
    fn map_event(&self, envelope: &EventEnvelope) -> Result<Option<TwinChange>, Error> {
        let change = match (envelope.path().get(0), envelope.path().get(1)) {
            (Some("features"), Some(name)) => {
                TwinChange::Feature(self.feature_change(name, envelope)?)
            }
            (Some("features"), None) => TwinChange::Features(self.features_change(envelope)?),
            _ => TwinChange::Thing(self.thing_change(envelope)),
        };

        Ok(Some(change))
    }
}

/// Feeds every mapped change into a sink; envelopes the mapper skips are
/// dropped silently.
pub struct MapperObserver<M, S> {
    mapper: M,
    sink: S,
}

impl<M, S> From<(M, S)> for MapperObserver<M, S>
where
    M: ChangeMapper<TwinChange>,
    S: ChangeSink<Item = TwinChange>,
{
    fn from((mapper, sink): (M, S)) -> Self {
        MapperObserver { mapper, sink }
    }
}

impl<M, S> EnvelopeObserver for MapperObserver<M, S>
where
    M: ChangeMapper<TwinChange>,
    S: ChangeSink<Item = TwinChange>,
{
    async fn process_envelope(&self, envelope: &EventEnvelope) -> Result<(), Error> {
        match self.mapper.map_event(envelope)? {
            Some(change) => self.sink.send(change).await?,
            None => (),
        }

        Ok(())
    }
}
