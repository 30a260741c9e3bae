use super::RegistryService;
use crate::protocol::{RegistryError, Result, ServerId, ServerRecord, ServerRegistrationRequest};
use crate::registry::{RegistryCleanupOutcome, RemovedServer};

impl RegistryService {
    /// Register a game server under a freshly generated id.
    ///
    /// A missing or zero `max_player_count` falls back to the configured
    /// default capacity.
    pub fn register_server(&self, request: ServerRegistrationRequest) -> Result<ServerRecord> {
        let max_player_count = match request.max_player_count {
            Some(0) => {
                tracing::warn!(
                    address = %request.address,
                    port = request.port,
                    default = self.config.default_max_players,
                    "Ignoring zero maxPlayerCount, using configured default"
                );
                self.config.default_max_players
            }
            Some(max) => max,
            None => self.config.default_max_players,
        };

        let server = ServerRecord::new(
            request.address,
            request.listen_address,
            request.port,
            max_player_count,
        );

        if let Err(e) = self.store.add_server(server.clone()) {
            if matches!(e, RegistryError::Conflict(_)) {
                self.metrics.increment_server_registration_conflicts();
            }
            tracing::error!(server_id = %server.id, error = %e, "Server registration failed");
            return Err(e);
        }

        self.metrics.increment_servers_registered();
        tracing::info!(
            server_id = %server.id,
            address = %server.address,
            listen_address = %server.listen_address,
            port = server.port,
            max_player_count = server.max_player_count,
            "Registered game server"
        );
        Ok(server)
    }

    pub fn list_servers(&self) -> Vec<ServerRecord> {
        self.store.list_servers()
    }

    pub fn get_server(&self, server_id: &ServerId) -> Result<ServerRecord> {
        self.store.get_server(server_id)
    }

    /// Deregister a server and every player attached to it. Unknown ids are a no-op.
    pub fn remove_server(&self, server_id: &ServerId) -> Option<RemovedServer> {
        let Some(removed) = self.store.remove_server(server_id) else {
            tracing::debug!(%server_id, "Remove requested for unknown server");
            return None;
        };

        self.metrics.add_servers_removed(1);
        self.metrics.add_players_detached(removed.players.len() as u64);
        tracing::info!(
            %server_id,
            players_removed = removed.players.len(),
            "Removed game server"
        );
        Some(removed)
    }

    /// Deregister every server, cascading to all attached players.
    pub fn remove_all_servers(&self) -> RegistryCleanupOutcome {
        let outcome = self.store.remove_all_servers();
        if outcome.is_empty() {
            return outcome;
        }

        self.metrics.add_servers_removed(outcome.servers_removed as u64);
        self.metrics.add_players_detached(outcome.players_removed as u64);
        tracing::info!(
            servers_removed = outcome.servers_removed,
            players_removed = outcome.players_removed,
            "Removed all game servers"
        );
        outcome
    }
}
