use super::{BrokerError, ExchangeDeclaration, ExchangeKind, MessageBroker, QueueDeclaration};
use crate::protocol::{MessageKind, ServerId};
use std::sync::Arc;

/// Routing key used for fanout publishes and bindings.
pub const PUBLIC_ROUTING_KEY: &str = "";

/// Exchange that carries messages of the given kind.
pub fn exchange_for(kind: MessageKind) -> ExchangeDeclaration {
    let exchange_kind = match kind {
        MessageKind::Private => ExchangeKind::Topic,
        MessageKind::Public => ExchangeKind::Fanout,
    };
    ExchangeDeclaration {
        name: kind.as_str().to_string(),
        kind: exchange_kind,
        durable: true,
    }
}

/// `server.<serverId>.user.<userName>`
pub fn private_routing_key(server_id: &ServerId, user_name: &str) -> String {
    format!("server.{server_id}.user.{user_name}")
}

/// Binding pattern matching every private routing key of one server.
pub fn server_binding_pattern(server_id: &ServerId) -> String {
    format!("server.{server_id}.user.#")
}

pub fn private_queue_name(server_id: &ServerId) -> String {
    format!("server.{server_id}")
}

pub fn public_queue_name(server_id: &ServerId) -> String {
    format!("server.{server_id}.public")
}

/// Queue names provisioned for one game server.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerQueues {
    pub private_queue: String,
    pub public_queue: String,
}

/// Owns the exchange/queue layout and publishes by message kind.
#[derive(Clone)]
pub struct BrokerTopology {
    broker: Arc<dyn MessageBroker>,
}

impl BrokerTopology {
    pub fn new(broker: Arc<dyn MessageBroker>) -> Self {
        Self { broker }
    }

    /// Declare both exchanges. Safe to call repeatedly.
    pub async fn initialize(&self) -> Result<(), BrokerError> {
        for kind in MessageKind::ALL {
            let exchange = exchange_for(kind);
            self.broker.declare_exchange(&exchange).await?;
            tracing::info!(
                exchange = %exchange.name,
                exchange_kind = %exchange.kind,
                "Declared exchange"
            );
        }
        Ok(())
    }

    /// Declare and bind the private and public queues a game server consumes from.
    pub async fn provision_server_queues(
        &self,
        server_id: &ServerId,
    ) -> Result<ServerQueues, BrokerError> {
        let private_exchange = exchange_for(MessageKind::Private);
        let public_exchange = exchange_for(MessageKind::Public);

        let private_queue = private_queue_name(server_id);
        self.broker
            .declare_queue(&QueueDeclaration::transient(&private_queue))
            .await?;
        self.broker
            .bind_queue(
                &private_queue,
                &private_exchange.name,
                &server_binding_pattern(server_id),
            )
            .await?;

        let public_queue = public_queue_name(server_id);
        self.broker
            .declare_queue(&QueueDeclaration::transient(&public_queue))
            .await?;
        self.broker
            .bind_queue(&public_queue, &public_exchange.name, PUBLIC_ROUTING_KEY)
            .await?;

        tracing::info!(
            %server_id,
            %private_queue,
            %public_queue,
            "Provisioned server queues"
        );

        Ok(ServerQueues {
            private_queue,
            public_queue,
        })
    }

    /// Publish a payload on the exchange for `kind`.
    pub async fn publish(
        &self,
        kind: MessageKind,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError> {
        self.broker
            .publish(kind.as_str(), routing_key, payload)
            .await
    }

    pub async fn shutdown(&self) -> Result<(), BrokerError> {
        self.broker.close().await
    }
}
