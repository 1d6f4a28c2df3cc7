mod filter;

pub use filter::{ChangeKind, SubscriptionFilter};

use crate::change::{ChangeSink, TwinChange};
use crate::error::Error;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Handle identifying one registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(Uuid);

impl SubscriptionHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for SubscriptionHandle {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, formatter)
    }
}

struct Registration {
    filter: SubscriptionFilter,
    sender: UnboundedSender<TwinChange>,
}

/// Fan-out point between the consumption loop and subscriber callbacks.
///
/// Each registration owns an unbounded channel; publication clones the
/// change for every matching subscriber. A subscriber that dropped its
/// receiver is skipped, never an error.
#[derive(Default)]
pub struct ChangeBus {
    registrations: HashMap<SubscriptionHandle, Registration>,
}

impl ChangeBus {
    pub fn register(
        &mut self,
        filter: SubscriptionFilter,
    ) -> (SubscriptionHandle, UnboundedReceiver<TwinChange>) {
        let (sender, receiver) = unbounded_channel();
        let handle = SubscriptionHandle::new();

        self.registrations
            .insert(handle, Registration { filter, sender });

        (handle, receiver)
    }

    pub fn deregister(&mut self, handle: SubscriptionHandle) -> bool {
        self.registrations.remove(&handle).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn publish(&self, change: &TwinChange) {
        for (handle, registration) in &self.registrations {
            if !registration.filter.matches(change) {
                continue;
            }

            if registration.sender.send(change.clone()).is_err() {
                tracing::debug!(subscription = %handle, "subscriber dropped, skipping delivery");
            }
        }
    }
}

impl ChangeSink for ChangeBus {
    type Item = TwinChange;

    async fn send(&self, change: Self::Item) -> Result<(), Error> {
        self.publish(&change);
        Ok(())
    }
}
