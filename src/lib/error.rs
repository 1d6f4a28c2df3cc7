use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WebSocketError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tls(#[from] native_tls::Error),
    #[error(transparent)]
    WebSocket(#[from] Box<WebSocketError>),
    #[error("Cannot load trust store from {0}")]
    TrustStore(String, #[source] std::io::Error),
    #[error("Cannot parse {0:?} as a pointer")]
    PointerParse(String),
    #[error("Cannot parse {0:?} as a feature payload")]
    FeatureParse(String),
    #[error("Subscriber is no longer reachable")]
    Delivery,
    #[error("Runtime synchronization failure")]
    Synchronization,
    #[error("Output cannot be written")]
    OutputError,
}

impl From<WebSocketError> for Error {
    fn from(value: WebSocketError) -> Self {
        Error::WebSocket(Box::new(value))
    }
}
