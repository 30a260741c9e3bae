use crate::broker::{AmqpBroker, BrokerTopology, InMemoryBroker, MessageBroker};
use crate::config::{Config, RegistryConfig};
use crate::metrics::RegistryMetrics;
use crate::protocol::Result;
use crate::registry::{InMemoryRegistry, RegistryStore};
use std::sync::Arc;

mod assignment;
#[cfg(test)]
mod assignment_tests;
mod message_router;
mod queues;
mod registration;

pub use message_router::{Delivery, DeliveryReceipt};

/// Game server registry with capacity-aware player assignment and message
/// routing over the broker topology.
pub struct RegistryService {
    /// Canonical server and player collections
    store: Arc<dyn RegistryStore>,
    /// Exchange/queue layout on the message broker
    topology: BrokerTopology,
    config: RegistryConfig,
    metrics: Arc<RegistryMetrics>,
}

impl RegistryService {
    pub fn new(
        store: Arc<dyn RegistryStore>,
        topology: BrokerTopology,
        config: RegistryConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            topology,
            config,
            metrics: Arc::new(RegistryMetrics::new()),
        })
    }

    /// In-memory registry on top of the given broker. The broker topology is
    /// not initialized; call [`RegistryService::initialize_broker`].
    pub fn with_broker(broker: Arc<dyn MessageBroker>, config: RegistryConfig) -> Arc<Self> {
        Self::new(
            Arc::new(InMemoryRegistry::new()),
            BrokerTopology::new(broker),
            config,
        )
    }

    /// Build the service from configuration: connect to the AMQP broker when
    /// enabled (otherwise route in-process) and declare the exchanges.
    pub async fn from_config(config: &Config) -> anyhow::Result<Arc<Self>> {
        let broker: Arc<dyn MessageBroker> = if config.broker.enabled {
            Arc::new(AmqpBroker::connect(&config.broker).await?)
        } else {
            tracing::warn!("Broker disabled; messages are routed in-process and discarded");
            Arc::new(InMemoryBroker::with_retention(0))
        };

        let service = Self::with_broker(broker, config.registry.clone());
        service.initialize_broker().await?;
        Ok(service)
    }

    /// Declare the Private and Public exchanges. Idempotent.
    pub async fn initialize_broker(&self) -> Result<()> {
        self.topology.initialize().await?;
        Ok(())
    }

    /// Close the broker connection.
    pub async fn shutdown(&self) {
        if let Err(e) = self.topology.shutdown().await {
            tracing::warn!(error = %e, "Failed to close broker connection cleanly");
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<RegistryMetrics> {
        self.metrics.clone()
    }

    pub fn store(&self) -> &dyn RegistryStore {
        self.store.as_ref()
    }
}
