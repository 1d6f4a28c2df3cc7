mod factory;
mod proxy;
mod trust_store;
mod websocket;

pub use factory::{create_transport, TransportConfig};
pub use proxy::{ProxyConfig, ProxyCredentials, ProxyRoute};
pub use trust_store::TrustStoreConfig;
pub use websocket::WebSocketSource;
