use super::RegistryService;
use crate::broker::{private_routing_key, PUBLIC_ROUTING_KEY};
use crate::protocol::{MessageIntent, MessageKind, RegistryError, Result, ServerId};
use serde::Serialize;

/// Where a message intent is published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Topic exchange, routed to the server the recipient is attached to.
    Private {
        server_id: ServerId,
        routing_key: String,
    },
    /// Fanout exchange, delivered to every server.
    Public,
}

impl Delivery {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Private { .. } => MessageKind::Private,
            Self::Public => MessageKind::Public,
        }
    }

    pub fn routing_key(&self) -> &str {
        match self {
            Self::Private { routing_key, .. } => routing_key,
            Self::Public => PUBLIC_ROUTING_KEY,
        }
    }
}

/// Acknowledgement returned once the broker accepted a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryReceipt {
    pub exchange: String,
    pub routing_key: String,
    pub sender: String,
}

impl RegistryService {
    /// Publish a message intent on the broker.
    ///
    /// Private messages are routed to the server the recipient is attached to;
    /// public messages are broadcast. Publish failures are returned as
    /// [`RegistryError::Broker`] without retrying.
    pub async fn send_message(&self, mut intent: MessageIntent) -> Result<DeliveryReceipt> {
        intent.apply_default_sender();

        let delivery = match self.resolve_delivery(&intent) {
            Ok(delivery) => delivery,
            Err(e) => {
                self.metrics.increment_unroutable_messages();
                tracing::warn!(
                    kind = %intent.kind,
                    recipient = intent.recipient.as_deref().unwrap_or(""),
                    error = %e,
                    "Message could not be routed"
                );
                return Err(e);
            }
        };

        let payload = intent.to_payload().map_err(crate::broker::BrokerError::from)?;
        let kind = delivery.kind();

        if let Err(e) = self
            .topology
            .publish(kind, delivery.routing_key(), &payload)
            .await
        {
            self.metrics.increment_publish_failures();
            tracing::error!(
                exchange = %kind,
                routing_key = delivery.routing_key(),
                error = %e,
                "Failed to publish message"
            );
            return Err(e.into());
        }

        match &delivery {
            Delivery::Private { server_id, .. } => {
                self.metrics.increment_private_messages_published();
                tracing::debug!(
                    %server_id,
                    routing_key = delivery.routing_key(),
                    "Published private message"
                );
            }
            Delivery::Public => {
                self.metrics.increment_public_messages_published();
                tracing::debug!("Published public message");
            }
        }

        Ok(DeliveryReceipt {
            exchange: kind.as_str().to_string(),
            routing_key: delivery.routing_key().to_string(),
            sender: intent.sender.unwrap_or_default(),
        })
    }

    fn resolve_delivery(&self, intent: &MessageIntent) -> Result<Delivery> {
        match intent.kind {
            MessageKind::Private => {
                let recipient = intent
                    .recipient
                    .as_deref()
                    .ok_or(RegistryError::MissingRecipient)?;
                let player = self.store.get_player_by_user_name(recipient)?;
                Ok(Delivery::Private {
                    server_id: player.server_id,
                    routing_key: private_routing_key(&player.server_id, &player.user_name),
                })
            }
            MessageKind::Public => Ok(Delivery::Public),
        }
    }
}
