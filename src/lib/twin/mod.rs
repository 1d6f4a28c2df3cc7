use crate::bus::{ChangeBus, SubscriptionFilter, SubscriptionHandle};
use crate::change::{ChangeSink, TwinChange};
use crate::error::Error;
use crate::event::{ChangeMapper, EnvelopeObserver, EventSource, MapperObserver, TwinEventMapper};
use crate::model::Pointer;
use tokio::sync::mpsc::UnboundedReceiver;

/// Options applied to a consumption run before changes reach subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionOptions {
    namespaces: Vec<Box<str>>,
    path: Option<Pointer>,
}

impl ConsumptionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespaces(
        mut self,
        namespaces: impl IntoIterator<Item = impl Into<Box<str>>>,
    ) -> Self {
        self.namespaces
            .extend(namespaces.into_iter().map(Into::into));
        self
    }

    pub fn with_path_filter(mut self, path: Pointer) -> Self {
        self.path = Some(path);
        self
    }

    pub fn accepts(&self, change: &TwinChange) -> bool {
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

/// Drains an event source into an observer until the source is exhausted.
pub async fn consume(
    source: &mut impl EventSource,
    observer: &impl EnvelopeObserver,
) -> Result<(), Error> {
    while let Some(envelope) = source.next_event().await? {
        observer.process_envelope(&envelope).await?;
    }

    Ok(())
}

struct ConsumptionSink {
    bus: ChangeBus,
    options: ConsumptionOptions,
}

impl ChangeSink for ConsumptionSink {
    type Item = TwinChange;

    async fn send(&self, change: Self::Item) -> Result<(), Error> {
        if !self.options.accepts(&change) {
            tracing::trace!(
                thing_id = %change.change().thing_id(),
                "change outside consumption scope, skipping"
            );
            return Ok(());
        }

        self.bus.send(change).await
    }
}

/// Entry point for monitoring twins: wires an event source through a change
/// mapper into registered subscribers.
///
/// Subscribers are registered up front; starting consumption takes the
/// client and drains the source to completion. Every subscriber's receiver
/// ends once consumption returns and the client is dropped.
pub struct TwinClient<S, M = TwinEventMapper> {
    source: S,
    mapper: M,
    bus: ChangeBus,
}

impl<S> TwinClient<S>
where
    S: EventSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            mapper: TwinEventMapper,
            bus: ChangeBus::default(),
        }
    }
}

impl<S, M> TwinClient<S, M>
where
    S: EventSource,
    M: ChangeMapper<TwinChange>,
{
    pub fn with_mapper<T>(self, mapper: T) -> TwinClient<S, T>
    where
        T: ChangeMapper<TwinChange>,
    {
        TwinClient {
            source: self.source,
            mapper,
            bus: self.bus,
        }
    }

    pub fn register(
        &mut self,
        filter: SubscriptionFilter,
    ) -> (SubscriptionHandle, UnboundedReceiver<TwinChange>) {
        self.bus.register(filter)
    }

    pub fn register_for_changes(
        &mut self,
    ) -> (SubscriptionHandle, UnboundedReceiver<TwinChange>) {
        self.register(SubscriptionFilter::any())
    }

    pub fn register_for_thing_changes(
        &mut self,
    ) -> (SubscriptionHandle, UnboundedReceiver<TwinChange>) {
        self.register(SubscriptionFilter::thing_changes())
    }

    pub fn register_for_feature_changes(
        &mut self,
        feature: Option<&str>,
    ) -> (SubscriptionHandle, UnboundedReceiver<TwinChange>) {
        let filter = match feature {
            Some(name) => SubscriptionFilter::feature_changes()
                .with_path(Pointer::root().join("features").join(name)),
            None => SubscriptionFilter::feature_changes(),
        };

        self.register(filter)
    }

    pub fn deregister(&mut self, handle: SubscriptionHandle) -> bool {
        self.bus.deregister(handle)
    }

    pub async fn start_consumption(self) -> Result<(), Error> {
        self.start_consumption_with(ConsumptionOptions::default())
            .await
    }

    pub async fn start_consumption_with(self, options: ConsumptionOptions) -> Result<(), Error> {
        let Self {
            mut source,
            mapper,
            bus,
        } = self;

        tracing::info!(subscribers = bus.subscriber_count(), "consumption started");

        let observer = MapperObserver::from((mapper, ConsumptionSink { bus, options }));

        consume(&mut source, &observer).await
    }
}
