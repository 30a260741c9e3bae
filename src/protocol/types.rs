use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for registered game servers
pub type ServerId = Uuid;
/// Externally supplied identifier for players
pub type UserId = Uuid;

/// A game server known to the registry.
///
/// `address`, `listen_address` and `port` are fixed at registration; only the
/// occupancy counters change afterwards, and only through the registry store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    pub id: ServerId,
    pub address: String,
    pub listen_address: String,
    pub port: u16,
    pub player_count: u32,
    pub max_player_count: u32,
}

impl ServerRecord {
    /// Build an empty server record with a freshly generated id.
    pub fn new(address: String, listen_address: String, port: u16, max_player_count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            address,
            listen_address,
            port,
            player_count: 0,
            max_player_count,
        }
    }

    pub fn is_full(&self) -> bool {
        self.player_count >= self.max_player_count
    }

    pub fn remaining_slots(&self) -> u32 {
        self.max_player_count.saturating_sub(self.player_count)
    }

    /// Occupancy rendered as `players/max` for log lines.
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            player_count: self.player_count,
            max_player_count: self.max_player_count,
        }
    }
}

impl fmt::Display for ServerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{}, listen {}, {})",
            self.id,
            self.address,
            self.port,
            self.listen_address,
            self.occupancy()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub player_count: u32,
    pub max_player_count: u32,
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.player_count, self.max_player_count)
    }
}

/// A player attached to a server.
///
/// `server_address` and `server_port` are copied from the server when the
/// player is attached and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub user_id: UserId,
    pub user_name: String,
    pub server_id: ServerId,
    pub server_address: String,
    pub server_port: u16,
}

impl PlayerRecord {
    /// Snapshot the connection details of `server` for a joining player.
    pub fn attach(request: PlayerConnectionRequest, server: &ServerRecord) -> Self {
        Self {
            user_id: request.user_id,
            user_name: request.user_name,
            server_id: server.id,
            server_address: server.address.clone(),
            server_port: server.port,
        }
    }
}

/// Body of a server registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRegistrationRequest {
    pub address: String,
    pub listen_address: String,
    pub port: u16,
    /// Overrides the configured default capacity when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_player_count: Option<u32>,
}

/// Body of a player join request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConnectionRequest {
    pub user_name: String,
    pub user_id: UserId,
}

impl PlayerConnectionRequest {
    pub fn new(user_name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            user_name: user_name.into(),
            user_id,
        }
    }
}
