use super::{BrokerError, ExchangeDeclaration, ExchangeKind, MessageBroker, QueueDeclaration};
use crate::config::BrokerConfig;
use async_trait::async_trait;
use lapin::options::{
    BasicPublishOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use std::sync::atomic::{AtomicBool, Ordering};

const REPLY_SUCCESS: u16 = 200;

/// AMQP 0-9-1 broker adapter.
///
/// Holds one connection and one channel for the lifetime of the process;
/// lapin serializes frames on the channel so concurrent publishers are safe.
pub struct AmqpBroker {
    connection: Connection,
    channel: Channel,
    closed: AtomicBool,
}

impl AmqpBroker {
    pub async fn connect(config: &BrokerConfig) -> Result<Self, BrokerError> {
        tracing::info!(
            host = %config.host,
            port = config.port,
            vhost = %config.vhost,
            user = %config.user,
            "Connecting to message broker"
        );

        let uri = config.uri()?;
        let connection = Connection::connect(&uri, ConnectionProperties::default())
            .await
            .inspect_err(|e| {
                tracing::error!(host = %config.host, error = %e, "Broker connection failed");
            })?;
        let channel = connection.create_channel().await?;

        tracing::info!(channel_id = channel.id(), "Broker channel opened");

        Ok(Self {
            connection,
            channel,
            closed: AtomicBool::new(false),
        })
    }

    fn ensure_open(&self) -> Result<(), BrokerError> {
        if self.closed.load(Ordering::Acquire) || !self.connection.status().connected() {
            return Err(BrokerError::NotConnected);
        }
        Ok(())
    }
}

impl From<ExchangeKind> for lapin::ExchangeKind {
    fn from(kind: ExchangeKind) -> Self {
        match kind {
            ExchangeKind::Topic => Self::Topic,
            ExchangeKind::Fanout => Self::Fanout,
        }
    }
}

#[async_trait]
impl MessageBroker for AmqpBroker {
    async fn declare_exchange(&self, exchange: &ExchangeDeclaration) -> Result<(), BrokerError> {
        self.ensure_open()?;
        self.channel
            .exchange_declare(
                &exchange.name,
                exchange.kind.into(),
                ExchangeDeclareOptions {
                    durable: exchange.durable,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;
        Ok(())
    }

    async fn declare_queue(&self, queue: &QueueDeclaration) -> Result<(), BrokerError> {
        self.ensure_open()?;
        self.channel
            .queue_declare(
                &queue.name,
                QueueDeclareOptions {
                    durable: queue.durable,
                    exclusive: queue.exclusive,
                    auto_delete: queue.auto_delete,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;
        Ok(())
    }

    async fn bind_queue(
        &self,
        queue: &str,
        exchange: &str,
        routing_key: &str,
    ) -> Result<(), BrokerError> {
        self.ensure_open()?;
        self.channel
            .queue_bind(
                queue,
                exchange,
                routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;
        Ok(())
    }

    async fn publish(
        &self,
        exchange: &str,
        routing_key: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError> {
        self.ensure_open()?;
        self.channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_content_type("application/json".into()),
            )
            .await?
            .await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), BrokerError> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        if let Err(e) = self.channel.close(REPLY_SUCCESS, "shutdown").await {
            tracing::warn!(error = %e, "Failed to close broker channel cleanly");
        }
        self.connection.close(REPLY_SUCCESS, "shutdown").await?;
        tracing::info!("Broker connection closed");
        Ok(())
    }
}
