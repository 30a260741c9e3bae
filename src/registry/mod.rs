//! Registry store: the single owner of server and player records.
//!
//! Every read-modify-write on a server's occupancy happens under one lock so
//! that capacity is never exceeded under concurrent callers. The store is
//! pure in-memory bookkeeping; none of its operations await.

use crate::protocol::{
    PlayerConnectionRequest, PlayerRecord, RegistryError, Result, ServerId, ServerRecord, UserId,
};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Servers and players removed by a server deregistration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedServer {
    pub server: ServerRecord,
    pub players: Vec<PlayerRecord>,
}

/// A player recorded against the server whose slot it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Server snapshot after the slot was taken
    pub server: ServerRecord,
    pub player: PlayerRecord,
}

/// Summary of a bulk server removal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegistryCleanupOutcome {
    pub servers_removed: usize,
    pub players_removed: usize,
}

impl RegistryCleanupOutcome {
    pub fn is_empty(&self) -> bool {
        self.servers_removed == 0 && self.players_removed == 0
    }
}

/// Storage contract for the registry.
///
/// Lookups return snapshots; mutation only happens through these methods.
pub trait RegistryStore: Send + Sync {
    /// Insert a server. Fails with [`RegistryError::Conflict`] on a duplicate id.
    fn add_server(&self, server: ServerRecord) -> Result<()>;

    /// Pick the first non-full server in registration order and take one of
    /// its slots. Returns the post-increment snapshot.
    fn reserve_available_server(&self) -> Result<ServerRecord>;

    /// Take one slot on a specific server.
    fn reserve_server(&self, server_id: &ServerId) -> Result<ServerRecord>;

    /// Reserve a slot as [`RegistryStore::reserve_available_server`] does and
    /// record the player in the same critical section, so a concurrent
    /// server removal can never leave the player behind.
    fn attach_to_any(&self, request: PlayerConnectionRequest) -> Result<Attachment>;

    /// Reserve a slot on `server_id` and record the player atomically.
    fn attach_to(
        &self,
        server_id: &ServerId,
        request: PlayerConnectionRequest,
    ) -> Result<Attachment>;

    fn get_server(&self, server_id: &ServerId) -> Result<ServerRecord>;

    /// Snapshot of all servers in registration order.
    fn list_servers(&self) -> Vec<ServerRecord>;

    /// Remove a server together with every player attached to it.
    /// Returns `None` when the server was not registered.
    fn remove_server(&self, server_id: &ServerId) -> Option<RemovedServer>;

    /// Remove every server and every player attached to them.
    fn remove_all_servers(&self) -> RegistryCleanupOutcome;

    /// Record an attached player. Capacity must already have been reserved.
    fn add_player(&self, player: PlayerRecord);

    fn get_player(&self, user_id: &UserId) -> Result<PlayerRecord>;

    /// First player with the given user name, in attach order.
    fn get_player_by_user_name(&self, user_name: &str) -> Result<PlayerRecord>;

    /// Snapshot of all players in attach order.
    fn list_players(&self) -> Vec<PlayerRecord>;

    /// Remove a player and free its slot on the owning server, if that server
    /// still exists. Returns `None` when the player was not attached.
    fn remove_player(&self, user_id: &UserId) -> Option<PlayerRecord>;
}

#[derive(Debug, Default)]
struct RegistryState {
    servers: Vec<ServerRecord>,
    players: Vec<PlayerRecord>,
}

impl RegistryState {
    fn server_mut(&mut self, server_id: &ServerId) -> Option<&mut ServerRecord> {
        self.servers.iter_mut().find(|server| server.id == *server_id)
    }

    fn reserve_first_available(&mut self) -> Result<ServerRecord> {
        let server = self
            .servers
            .iter_mut()
            .find(|server| !server.is_full())
            .ok_or(RegistryError::NoServersAvailable)?;
        server.player_count += 1;
        Ok(server.clone())
    }

    fn reserve(&mut self, server_id: &ServerId) -> Result<ServerRecord> {
        let server = self
            .server_mut(server_id)
            .ok_or(RegistryError::ServerNotFound(*server_id))?;
        if server.is_full() {
            return Err(RegistryError::Capacity {
                server_id: *server_id,
            });
        }
        server.player_count += 1;
        Ok(server.clone())
    }

    fn record(&mut self, server: ServerRecord, request: PlayerConnectionRequest) -> Attachment {
        let player = PlayerRecord::attach(request, &server);
        self.players.push(player.clone());
        Attachment { server, player }
    }
}

/// Mutex-guarded in-memory registry.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-applied mutation:
    // every method validates before it writes.
    fn state(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RegistryStore for InMemoryRegistry {
    fn add_server(&self, server: ServerRecord) -> Result<()> {
        let mut state = self.state();
        if state.servers.iter().any(|existing| existing.id == server.id) {
            return Err(RegistryError::Conflict(server.id));
        }
        state.servers.push(server);
        Ok(())
    }

    fn reserve_available_server(&self) -> Result<ServerRecord> {
        self.state().reserve_first_available()
    }

    fn reserve_server(&self, server_id: &ServerId) -> Result<ServerRecord> {
        self.state().reserve(server_id)
    }

    fn attach_to_any(&self, request: PlayerConnectionRequest) -> Result<Attachment> {
        let mut state = self.state();
        let server = state.reserve_first_available()?;
        Ok(state.record(server, request))
    }

    fn attach_to(
        &self,
        server_id: &ServerId,
        request: PlayerConnectionRequest,
    ) -> Result<Attachment> {
        let mut state = self.state();
        let server = state.reserve(server_id)?;
        Ok(state.record(server, request))
    }

    fn get_server(&self, server_id: &ServerId) -> Result<ServerRecord> {
        self.state()
            .servers
            .iter()
            .find(|server| server.id == *server_id)
            .cloned()
            .ok_or(RegistryError::ServerNotFound(*server_id))
    }

    fn list_servers(&self) -> Vec<ServerRecord> {
        self.state().servers.clone()
    }

    fn remove_server(&self, server_id: &ServerId) -> Option<RemovedServer> {
        let mut state = self.state();
        let index = state
            .servers
            .iter()
            .position(|server| server.id == *server_id)?;
        let server = state.servers.remove(index);

        let (players, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.players)
            .into_iter()
            .partition(|player| player.server_id == *server_id);
        state.players = remaining;

        Some(RemovedServer { server, players })
    }

    fn remove_all_servers(&self) -> RegistryCleanupOutcome {
        let mut state = self.state();
        let servers_removed = state.servers.len();
        state.servers.clear();

        // With no servers left, no player can reference one.
        let players_removed = state.players.len();
        state.players.clear();

        RegistryCleanupOutcome {
            servers_removed,
            players_removed,
        }
    }

    fn add_player(&self, player: PlayerRecord) {
        self.state().players.push(player);
    }

    fn get_player(&self, user_id: &UserId) -> Result<PlayerRecord> {
        self.state()
            .players
            .iter()
            .find(|player| player.user_id == *user_id)
            .cloned()
            .ok_or(RegistryError::PlayerNotFound(*user_id))
    }

    fn get_player_by_user_name(&self, user_name: &str) -> Result<PlayerRecord> {
        self.state()
            .players
            .iter()
            .find(|player| player.user_name == user_name)
            .cloned()
            .ok_or_else(|| RegistryError::RecipientNotFound(user_name.to_string()))
    }

    fn list_players(&self) -> Vec<PlayerRecord> {
        self.state().players.clone()
    }

    fn remove_player(&self, user_id: &UserId) -> Option<PlayerRecord> {
        let mut state = self.state();
        let index = state
            .players
            .iter()
            .position(|player| player.user_id == *user_id)?;
        let player = state.players.remove(index);

        if let Some(server) = state.server_mut(&player.server_id) {
            server.player_count = server.player_count.saturating_sub(1);
        }

        Some(player)
    }
}
