mod feature;
mod pointer;
mod thing_id;

pub use feature::{Feature, FeatureDefinition, Features, SchemaVersion};
pub use pointer::Pointer;
pub use thing_id::ThingId;
