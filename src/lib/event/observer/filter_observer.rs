use crate::error::Error;
use crate::event::observer::EnvelopeObserver;
use crate::event::EventEnvelope;

pub trait FilterObserverPredicate {
    fn is_applicable(&self, envelope: &EventEnvelope) -> bool;
}

impl<T> FilterObserverPredicate for T
where
    T: AsRef<str>,
{
    fn is_applicable(&self, envelope: &EventEnvelope) -> bool {
        envelope.thing_id().namespace().eq(self.as_ref())
    }
}

pub struct FilterObserver<P, O> {
    predicate: P,
    observer: O,
}

impl<P, O> FilterObserver<P, O>
where
    P: FilterObserverPredicate,
    O: EnvelopeObserver,
{
    pub fn new(predicate: P, observer: O) -> Self {
        Self {
            predicate,
            observer,
        }
    }
}

impl<P, O> EnvelopeObserver for FilterObserver<P, O>
where
    P: FilterObserverPredicate,
    O: EnvelopeObserver,
{
    async fn process_envelope(&self, envelope: &EventEnvelope) -> Result<(), Error> {
        if !self.predicate.is_applicable(envelope) {
            return Ok(());
        }

        self.observer.process_envelope(envelope).await
    }
}
