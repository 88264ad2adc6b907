//! # Subscription Protocols
//!
//! Mapping between the protocol literals used in resource configuration and the
//! platform enums.
//!
//! | configuration          | platform enum                                |
//! |------------------------|----------------------------------------------|
//! | `ws`                   | `GRAPHQL_SUBSCRIPTION_PROTOCOL_WS`           |
//! | `sse`                  | `GRAPHQL_SUBSCRIPTION_PROTOCOL_SSE`          |
//! | `sse_post`             | `GRAPHQL_SUBSCRIPTION_PROTOCOL_SSE_POST`     |
//! | `auto`                 | `GRAPHQL_WEBSOCKET_SUBPROTOCOL_AUTO`         |
//! | `graphql-ws`           | `GRAPHQL_WEBSOCKET_SUBPROTOCOL_WS`           |
//! | `graphql-transport-ws` | `GRAPHQL_WEBSOCKET_SUBPROTOCOL_TRANSPORT_WS` |
//!
//! An unset value maps to the default (`ws` and `auto`). Any other value, the empty
//! string included, is rejected.

use crate::error::ValidationError;
use crate::platform::{SubscriptionProtocol, WebsocketSubprotocol};
use std::fmt;
use std::str::FromStr;

impl SubscriptionProtocol {
    pub const ALL: [Self; 3] = [Self::Ws, Self::Sse, Self::SsePost];

    /// Configuration literal
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ws => "ws",
            Self::Sse => "sse",
            Self::SsePost => "sse_post",
        }
    }

    fn enum_name(self) -> &'static str {
        match self {
            Self::Ws => "GRAPHQL_SUBSCRIPTION_PROTOCOL_WS",
            Self::Sse => "GRAPHQL_SUBSCRIPTION_PROTOCOL_SSE",
            Self::SsePost => "GRAPHQL_SUBSCRIPTION_PROTOCOL_SSE_POST",
        }
    }

    /// Map an optional configuration value, defaulting to `ws`
    ///
    /// # Errors
    /// Returns `UnsupportedProtocol` for any value outside the literal set
    pub fn map(value: Option<&str>) -> Result<Self, ValidationError> {
        value.map_or(Ok(Self::default()), str::parse::<Self>)
    }

    /// Interpret a value reported by the platform
    ///
    /// Accepts configuration literals as well as enum names; empty means the default.
    pub fn from_remote(value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Ok(Self::default());
        }
        Self::ALL
            .into_iter()
            .find(|p| p.enum_name() == value)
            .map_or_else(|| value.parse(), Ok)
    }
}

impl FromStr for SubscriptionProtocol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedProtocol(s.to_string()))
    }
}

impl fmt::Display for SubscriptionProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WebsocketSubprotocol {
    pub const ALL: [Self; 3] = [Self::Auto, Self::GraphqlWs, Self::GraphqlTransportWs];

    /// Configuration literal
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::GraphqlWs => "graphql-ws",
            Self::GraphqlTransportWs => "graphql-transport-ws",
        }
    }

    fn enum_name(self) -> &'static str {
        match self {
            Self::Auto => "GRAPHQL_WEBSOCKET_SUBPROTOCOL_AUTO",
            Self::GraphqlWs => "GRAPHQL_WEBSOCKET_SUBPROTOCOL_WS",
            Self::GraphqlTransportWs => "GRAPHQL_WEBSOCKET_SUBPROTOCOL_TRANSPORT_WS",
        }
    }

    /// Map an optional configuration value, defaulting to `auto`
    ///
    /// # Errors
    /// Returns `UnsupportedProtocol` for any value outside the literal set
    pub fn map(value: Option<&str>) -> Result<Self, ValidationError> {
        value.map_or(Ok(Self::default()), str::parse::<Self>)
    }

    /// Interpret a value reported by the platform
    pub fn from_remote(value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Ok(Self::default());
        }
        Self::ALL
            .into_iter()
            .find(|p| p.enum_name() == value)
            .map_or_else(|| value.parse(), Ok)
    }
}

impl FromStr for WebsocketSubprotocol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::UnsupportedProtocol(s.to_string()))
    }
}

impl fmt::Display for WebsocketSubprotocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
