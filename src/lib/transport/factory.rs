use crate::error::Error;
use crate::transport::{ProxyConfig, ProxyRoute, TrustStoreConfig};
use native_tls::{Identity, Protocol, TlsConnector};
use tokio_tungstenite::Connector;

/// Ready-to-use secure-socket client configuration.
///
/// Built fresh per call; holds the reduced proxy routing decision and, when
/// a trust store was configured, a TLS connector pinned to TLS 1.2.
pub struct TransportConfig {
    proxy: Option<ProxyRoute>,
    tls: Option<Connector>,
}

impl std::fmt::Debug for TransportConfig {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TransportConfig")
            .field("proxy", &self.proxy)
            .field("tls", &self.tls.is_some())
            .finish()
    }
}

impl TransportConfig {
    pub fn proxy(&self) -> Option<&ProxyRoute> {
        self.proxy.as_ref()
    }

    pub fn has_tls(&self) -> bool {
        self.tls.is_some()
    }

    pub fn into_connector(self) -> Option<Connector> {
        self.tls
    }
}

/// Builds the transport configuration for the passed proxy and trust-store
/// settings.
///
/// Loading the trust store is one synchronous read at connection-setup
/// time. Any I/O or cryptographic failure is fatal and surfaces
/// immediately; a partially initialized configuration is never returned.
pub fn create_transport(
    proxy: Option<&ProxyConfig>,
    trust_store: Option<&TrustStoreConfig>,
) -> Result<TransportConfig, Error> {
    let tls = match trust_store {
        Some(config) => Some(create_tls_connector(config)?),
        None => None,
    };

    Ok(TransportConfig {
        proxy: proxy.and_then(ProxyRoute::from_config),
        tls,
    })
}

fn create_tls_connector(config: &TrustStoreConfig) -> Result<Connector, Error> {
    let bundle = std::fs::read(config.location())
        .map_err(|error| Error::TrustStore(config.location().display().to_string(), error))?;

    let identity = Identity::from_pkcs12(&bundle, config.password())?;

    let connector = TlsConnector::builder()
        .identity(identity)
        .min_protocol_version(Some(Protocol::Tlsv12))
        .max_protocol_version(Some(Protocol::Tlsv12))
        .build()?;

    tracing::debug!(
        location = %config.location().display(),
        "trust store loaded"
    );

    Ok(Connector::NativeTls(connector))
}
