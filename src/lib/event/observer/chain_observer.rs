use crate::error::Error;
use crate::event::observer::EnvelopeObserver;
use crate::event::EventEnvelope;

pub struct ChainObserver<L, R> {
    left: L,
    right: R,
}

impl<L, R> ChainObserver<L, R>
where
    L: EnvelopeObserver,
    R: EnvelopeObserver,
{
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> EnvelopeObserver for ChainObserver<L, R>
where
    L: EnvelopeObserver,
    R: EnvelopeObserver,
{
    async fn process_envelope(&self, envelope: &EventEnvelope) -> Result<(), Error> {
        self.left.process_envelope(envelope).await?;
        self.right.process_envelope(envelope).await?;
        Ok(())
    }
}
