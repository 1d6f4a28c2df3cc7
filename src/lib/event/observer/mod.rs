mod chain_observer;
mod filter_observer;

pub use chain_observer::ChainObserver;
pub use filter_observer::{FilterObserver, FilterObserverPredicate};

use crate::error::Error;
use crate::event::EventEnvelope;

/// Processing seam for inbound event envelopes.
pub trait EnvelopeObserver: Sized {
    async fn process_envelope(&self, envelope: &EventEnvelope) -> Result<(), Error>;

    fn with<R>(self, observer: R) -> ChainObserver<Self, R>
    where
        R: EnvelopeObserver,
    {
        ChainObserver::new(self, observer)
    }

    fn filter<P>(self, predicate: P) -> FilterObserver<P, Self>
    where
        P: FilterObserverPredicate,
    {
        FilterObserver::new(predicate, self)
    }
}
