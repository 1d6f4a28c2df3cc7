use crate::error::Error;
use crate::event::{EventEnvelope, EventSource};
use crate::transport::TransportConfig;
use tokio::net::TcpStream;
use tokio_stream::StreamExt;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, MaybeTlsStream, WebSocketStream};

/// Event source reading change events off a WebSocket connection.
///
/// Each text or binary frame carries one serialized event envelope. Control
/// frames are skipped; a close frame or end of stream ends consumption.
pub struct WebSocketSource {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketSource {
    pub async fn connect(endpoint: &str, transport: TransportConfig) -> Result<Self, Error> {
        let (inner, _response) =
            connect_async_tls_with_config(endpoint, None, false, transport.into_connector())
                .await?;

        tracing::info!(endpoint, "connected to twin service");

        Ok(Self { inner })
    }
}

impl EventSource for WebSocketSource {
    async fn next_event(&mut self) -> Result<Option<EventEnvelope>, Error> {
        loop {
            let message = match self.inner.next().await {
                Some(message) => message?,
                None => return Ok(None),
            };

            return match message {
                Message::Text(text) => Ok(Some(serde_json::from_str(&text)?)),
                Message::Binary(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
                Message::Close(_) => Ok(None),
                other => {
                    tracing::trace!(frame = ?other, "skipping non-event frame");
                    continue;
                }
            };
        }
    }
}
