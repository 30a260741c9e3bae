use super::RegistryService;
use crate::broker::ServerQueues;
use crate::protocol::{Result, ServerId};

impl RegistryService {
    /// Declare and bind the private and public queues a game server consumes from.
    ///
    /// The queues auto-delete once unused and are not tied to the server's
    /// registration; the server id is not checked against the registry.
    pub async fn provision_server_queues(&self, server_id: &ServerId) -> Result<ServerQueues> {
        match self.topology.provision_server_queues(server_id).await {
            Ok(queues) => {
                self.metrics.increment_queues_provisioned();
                Ok(queues)
            }
            Err(e) => {
                tracing::error!(%server_id, error = %e, "Failed to provision server queues");
                Err(e.into())
            }
        }
    }
}
