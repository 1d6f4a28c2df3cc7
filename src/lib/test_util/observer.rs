use crate::error::Error;
use crate::event::{EnvelopeObserver, EventEnvelope};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::sync::Mutex;

#[derive(Default, Clone)]
pub struct ObserverSpy {
    processed_envelope_count: Arc<AtomicUsize>,
    envelopes: Arc<Mutex<Vec<EventEnvelope>>>,
}

impl ObserverSpy {
    pub fn times_executed(&self) -> usize {
        self.processed_envelope_count.load(Ordering::Relaxed)
    }

    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.envelopes.lock().unwrap().clone()
    }
}

impl EnvelopeObserver for ObserverSpy {
    async fn process_envelope(&self, envelope: &EventEnvelope) -> Result<(), Error> {
        self.processed_envelope_count.fetch_add(1, Ordering::Relaxed);
        self.envelopes.lock().unwrap().push(envelope.clone());
        Ok(())
    }
}
