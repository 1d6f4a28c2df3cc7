#[macro_use]
mod macros;
mod observer;
mod sink;
mod source;

pub use observer::ObserverSpy;
pub use sink::TestChangeSink;
pub use source::VecEventSource;
