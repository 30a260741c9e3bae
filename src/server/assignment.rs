use super::RegistryService;
use crate::protocol::{
    PlayerConnectionRequest, PlayerRecord, RegistryError, Result, ServerId, UserId,
};
use crate::registry::Attachment;

impl RegistryService {
    /// Attach a player to the first server with a free slot.
    ///
    /// Fails with [`RegistryError::NoServersAvailable`] when every server is
    /// full or none are registered.
    pub fn attach_to_any_server(&self, request: PlayerConnectionRequest) -> Result<PlayerRecord> {
        let Attachment { server, player } = match self.store.attach_to_any(request.clone()) {
            Ok(attachment) => attachment,
            Err(e) => {
                self.metrics.increment_attach_not_found();
                tracing::warn!(
                    user_id = %request.user_id,
                    user_name = %request.user_name,
                    "No server available for player"
                );
                return Err(e);
            }
        };

        self.metrics.increment_players_attached();

        tracing::info!(
            user_id = %player.user_id,
            user_name = %player.user_name,
            server_id = %server.id,
            occupancy = %server.occupancy(),
            "Player attached to server"
        );
        Ok(player)
    }

    /// Attach a player to a named server.
    ///
    /// A full server yields [`RegistryError::Capacity`], unlike
    /// [`RegistryService::attach_to_any_server`] which reports not-found.
    pub fn attach_to_server(
        &self,
        server_id: &ServerId,
        request: PlayerConnectionRequest,
    ) -> Result<PlayerRecord> {
        let attached = self.store.attach_to(server_id, request.clone());
        let Attachment { server, player } = match attached {
            Ok(attachment) => attachment,
            Err(e) => {
                match &e {
                    RegistryError::Capacity { .. } => {
                        self.metrics.increment_attach_capacity_denials();
                    }
                    _ => self.metrics.increment_attach_not_found(),
                }
                tracing::warn!(
                    %server_id,
                    user_id = %request.user_id,
                    user_name = %request.user_name,
                    error = %e,
                    "Player attach rejected"
                );
                return Err(e);
            }
        };

        self.metrics.increment_players_attached();

        tracing::info!(
            user_id = %player.user_id,
            user_name = %player.user_name,
            %server_id,
            occupancy = %server.occupancy(),
            "Player attached to requested server"
        );
        Ok(player)
    }

    /// Detach a player and free its slot. Unknown players are a no-op.
    pub fn detach_player(&self, user_id: &UserId) -> Option<PlayerRecord> {
        let removed = self.store.remove_player(user_id);
        match &removed {
            Some(player) => {
                self.metrics.add_players_detached(1);
                tracing::info!(
                    %user_id,
                    user_name = %player.user_name,
                    server_id = %player.server_id,
                    "Player detached"
                );
            }
            None => tracing::debug!(%user_id, "Detach requested for unknown player"),
        }
        removed
    }

    pub fn get_player(&self, user_id: &UserId) -> Result<PlayerRecord> {
        self.store.get_player(user_id)
    }

    pub fn list_players(&self) -> Vec<PlayerRecord> {
        self.store.list_players()
    }
}
