use crate::error::Error;
use crate::event::{EventEnvelope, EventSource};
use std::collections::VecDeque;

pub struct VecEventSource {
    envelopes: VecDeque<EventEnvelope>,
}

impl VecEventSource {
    pub fn new(envelopes: impl IntoIterator<Item = EventEnvelope>) -> Self {
        Self {
            envelopes: envelopes.into_iter().collect(),
        }
    }
}

impl EventSource for VecEventSource {
    async fn next_event(&mut self) -> Result<Option<EventEnvelope>, Error> {
        Ok(self.envelopes.pop_front())
    }
}
