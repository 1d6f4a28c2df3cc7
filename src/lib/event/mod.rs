pub mod observer;
mod mapper;
mod source;

pub use mapper::{ChangeMapper, MapperObserver, TwinEventMapper};
pub use observer::EnvelopeObserver;
pub use source::EventSource;

use crate::change::ChangeAction;
use crate::model::{Pointer, ThingId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw change-event record as it arrives from the inbound event source.
///
/// The wire format itself (framing, topics, acknowledgements) is the
/// transport's concern; by the time an envelope exists every field has been
/// deserialized and validated by serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventEnvelope {
    thing_id: ThingId,
    action: ChangeAction,
    path: Pointer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<u64>,
}

impl EventEnvelope {
    pub fn new(
        thing_id: ThingId,
        action: ChangeAction,
        path: Pointer,
        value: Option<Value>,
        revision: u64,
        timestamp: Option<u64>,
    ) -> Self {
        Self {
            thing_id,
            action,
            path,
            value,
            revision,
            timestamp,
        }
    }

    pub fn thing_id(&self) -> &ThingId {
        &self.thing_id
    }

    pub fn action(&self) -> ChangeAction {
        self.action
    }

    pub fn path(&self) -> &Pointer {
        &self.path
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }
}
