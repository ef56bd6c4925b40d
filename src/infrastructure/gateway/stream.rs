//! # Gateway Push Streams
//!
//! Subscription to the gateway's streaming channels.
//!
//! The gateway emits JSON envelopes `{"event": name, "data": payload}` on
//! two channels: block events and gas-price events. [`StreamSource`] is
//! the port the engine consumes; [`WsStreamSource`] implements it over
//! WebSocket connections, and [`ChannelStreamSource`] is an in-process
//! implementation for hosts and tests.
//!
//! Teardown is dropping the returned stream; an abrupt transport failure
//! surfaces as one `Err` item and then the stream ends. Reconnection is
//! deliberately not handled here and may be layered by the host.

use crate::domain::entities::BlockSummary;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use super::error::{GatewayError, GatewayResult};

/// The gateway's streaming channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamChannel {
    /// Block events (`/ws/blocks`).
    Blocks,
    /// Gas-price events (`/ws/gas`).
    GasPrices,
}

impl StreamChannel {
    /// Returns the channel's URL path.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Blocks => "/ws/blocks",
            Self::GasPrices => "/ws/gas",
        }
    }
}

impl fmt::Display for StreamChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Wire envelope of every stream message.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StreamEnvelope {
    /// Event name.
    event: String,
    /// Event payload.
    #[serde(default)]
    data: serde_json::Value,
}

/// Payload of a gas-price event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasPriceEvent {
    /// Gas price in wei.
    pub gas_price_wei: u128,
    /// Gas price in gwei.
    pub gas_price_gwei: f64,
}

/// A decoded stream event.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A new block was produced.
    NewBlock(BlockSummary),
    /// The gas price changed.
    GasUpdate(GasPriceEvent),
    /// An event this client does not interpret; retained by name.
    Other {
        /// The envelope's event name.
        name: String,
    },
}

/// Stream of decoded events from one channel subscription.
///
/// Dropping the stream releases the underlying connection.
pub type EventStream = BoxStream<'static, GatewayResult<StreamEvent>>;

/// Trait for subscribing to the gateway's push channels.
#[async_trait]
pub trait StreamSource: Send + Sync + fmt::Debug {
    /// Opens a subscription to `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription cannot be established.
    async fn subscribe(&self, channel: StreamChannel) -> GatewayResult<EventStream>;
}

/// Decodes one envelope text frame into a [`StreamEvent`].
fn decode_envelope(text: &str) -> GatewayResult<StreamEvent> {
    let envelope: StreamEnvelope = serde_json::from_str(text)
        .map_err(|e| GatewayError::decode(format!("malformed stream envelope: {}", e)))?;

    match envelope.event.as_str() {
        "new_block" => serde_json::from_value(envelope.data)
            .map(StreamEvent::NewBlock)
            .map_err(|e| GatewayError::decode(format!("malformed block event: {}", e))),
        "gas_update" => serde_json::from_value(envelope.data)
            .map(StreamEvent::GasUpdate)
            .map_err(|e| GatewayError::decode(format!("malformed gas event: {}", e))),
        _ => Ok(StreamEvent::Other {
            name: envelope.event,
        }),
    }
}

/// WebSocket implementation of [`StreamSource`].
#[derive(Debug, Clone)]
pub struct WsStreamSource {
    /// Base URL with `ws` or `wss` scheme, without a trailing slash.
    ws_base_url: String,
}

impl WsStreamSource {
    /// Creates a source from a `ws://` or `wss://` base URL.
    #[must_use]
    pub fn new(ws_base_url: impl Into<String>) -> Self {
        let mut ws_base_url = ws_base_url.into();
        while ws_base_url.ends_with('/') {
            ws_base_url.pop();
        }
        Self { ws_base_url }
    }

    /// Creates a source from the gateway's HTTP base URL by swapping the
    /// scheme (`http` -> `ws`, `https` -> `wss`).
    #[must_use]
    pub fn from_http_url(http_base_url: &str) -> Self {
        let ws = if let Some(rest) = http_base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = http_base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            http_base_url.to_string()
        };
        Self::new(ws)
    }

    /// Returns the configured WebSocket base URL.
    #[must_use]
    pub fn ws_base_url(&self) -> &str {
        &self.ws_base_url
    }
}

#[async_trait]
impl StreamSource for WsStreamSource {
    async fn subscribe(&self, channel: StreamChannel) -> GatewayResult<EventStream> {
        let url = format!("{}{}", self.ws_base_url, channel.path());
        let (ws_stream, _) = connect_async(&url).await.map_err(|e| {
            GatewayError::connection(format!("WebSocket connect to {} failed: {}", url, e))
        })?;

        let events = ws_stream.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(decode_envelope(text.as_str())),
                Ok(Message::Close(_)) => None,
                Ok(_) => None,
                Err(e) => Some(Err(GatewayError::connection(format!(
                    "WebSocket transport error: {}",
                    e
                )))),
            }
        });

        Ok(events.boxed())
    }
}

/// In-process implementation of [`StreamSource`] over tokio channels.
///
/// Hosts (and tests) register a channel with [`Self::push_handle`] and
/// feed events through the returned sender; the engine subscribes as it
/// would against the WebSocket source.
#[derive(Debug, Default)]
pub struct ChannelStreamSource {
    receivers: Mutex<HashMap<StreamChannel, mpsc::UnboundedReceiver<GatewayResult<StreamEvent>>>>,
}

impl ChannelStreamSource {
    /// Creates an empty source with no registered channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `channel` and returns the sender side.
    ///
    /// Dropping the sender ends the subscribed stream, mirroring a
    /// gateway-side close.
    ///
    /// # Errors
    ///
    /// Returns an error if the source's registry lock is poisoned.
    pub fn push_handle(
        &self,
        channel: StreamChannel,
    ) -> GatewayResult<mpsc::UnboundedSender<GatewayResult<StreamEvent>>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut receivers = self
            .receivers
            .lock()
            .map_err(|_| GatewayError::internal("stream registry lock poisoned"))?;
        receivers.insert(channel, rx);
        Ok(tx)
    }
}

#[async_trait]
impl StreamSource for ChannelStreamSource {
    async fn subscribe(&self, channel: StreamChannel) -> GatewayResult<EventStream> {
        let receiver = {
            let mut receivers = self
                .receivers
                .lock()
                .map_err(|_| GatewayError::internal("stream registry lock poisoned"))?;
            receivers.remove(&channel)
        };

        match receiver {
            Some(rx) => Ok(UnboundedReceiverStream::new(rx).boxed()),
            None => Err(GatewayError::connection(format!(
                "no push handle registered for {}",
                channel
            ))),
        }
    }
}
