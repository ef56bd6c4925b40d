//! # Chain Data Gateway
//!
//! Client for the remote chain-data gateway.
//!
//! ## Available Components
//!
//! - [`GatewayApi`]: trait over the gateway's REST endpoints
//! - [`HttpGateway`]: `reqwest` implementation with a fixed timeout
//! - [`StreamSource`]: trait over the gateway's push channels
//! - [`WsStreamSource`]: WebSocket implementation
//! - [`GatewayError`]: error taxonomy with retryability classification

pub mod client;
pub mod error;
pub mod http;
pub mod stream;

pub use client::{GatewayApi, NetworkStats};
pub use error::{GatewayError, GatewayResult};
pub use http::HttpGateway;
pub use stream::{
    ChannelStreamSource, EventStream, GasPriceEvent, StreamChannel, StreamEvent, StreamSource,
    WsStreamSource,
};
