//! Publish/subscribe topology on top of an AMQP-style broker.
//!
//! Two exchanges carry all traffic: a topic exchange named `Private` for
//! messages addressed to one user and a fanout exchange named `Public` for
//! broadcasts. Each game server consumes from a pair of auto-delete queues
//! bound to those exchanges.
//!
//! - [`MessageBroker`]: the primitive declare/bind/publish operations
//! - [`AmqpBroker`]: lapin-backed implementation over one long-lived channel
//! - [`InMemoryBroker`]: routing-accurate in-process implementation
//! - [`BrokerTopology`]: exchange/queue provisioning and publishing by message kind

mod amqp;
mod error;
mod memory;
mod topology;

pub use amqp::AmqpBroker;
pub use error::BrokerError;
pub use memory::{Binding, InMemoryBroker, PublishedMessage};
pub use topology::{
    exchange_for, private_queue_name, private_routing_key, public_queue_name,
    server_binding_pattern, BrokerTopology, ServerQueues, PUBLIC_ROUTING_KEY,
};

use async_trait::async_trait;
use std::fmt;

/// Exchange routing behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeKind {
    /// Routes on routing-key patterns (`*` one word, `#` any number of words).
    Topic,
    /// Routes to every bound queue, ignoring the routing key.
    Fanout,
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic => f.write_str("topic"),
            Self::Fanout => f.write_str("fanout"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeDeclaration {
    pub name: String,
    pub kind: ExchangeKind,
    pub durable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueDeclaration {
    pub name: String,
    pub durable: bool,
    pub exclusive: bool,
    pub auto_delete: bool,
}

impl QueueDeclaration {
    /// Non-durable, shared queue that the broker drops once its last consumer leaves.
    pub fn transient(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            durable: false,
            exclusive: false,
            auto_delete: true,
        }
    }
}

/// Broker primitives used by the topology manager.
///
/// Declarations must be idempotent: declaring an existing exchange or queue
/// with the same settings succeeds without side effects.
#[async_trait]
pub trait MessageBroker: Send + Sync {
    async fn declare_exchange(&self, exchange: &ExchangeDeclaration) -> Result<(), BrokerError>;

    async fn declare_queue(&self, queue: &QueueDeclaration) -> Result<(), BrokerError>;

    async fn bind_queue(
        &self,
        queue: &str,
        exchange: &str,
        routing_key: &str,
    ) -> Result<(), BrokerError>;

    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError>;

    /// Close the underlying connection. Further calls fail with [`BrokerError::NotConnected`].
    async fn close(&self) -> Result<(), BrokerError>;
}
