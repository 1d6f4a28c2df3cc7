use crate::error::Error;
use crate::event::EventEnvelope;

/// Inbound event stream the consumption loop drains.
///
/// `Ok(None)` means the source is exhausted and consumption should end.
pub trait EventSource {
    async fn next_event(&mut self) -> Result<Option<EventEnvelope>, Error>;
}
