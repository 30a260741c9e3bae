use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes returned to callers alongside a human readable message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Lookup errors
    ServerNotFound,
    PlayerNotFound,
    NoServersAvailable,
    RecipientNotFound,

    // Capacity errors
    ServerFull,

    // Conflicts
    ServerIdConflict,

    // Broker errors
    BrokerUnavailable,
}

impl ErrorCode {
    /// Returns a human-readable description of this error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::ServerNotFound => "The requested server is not registered.",
            Self::PlayerNotFound => "The requested player has no active session.",
            Self::NoServersAvailable => {
                "No registered server has a free slot. Try again once a server frees up or registers."
            }
            Self::RecipientNotFound => {
                "The message recipient is not attached to any server and cannot be reached."
            }
            Self::ServerFull => {
                "The server has reached its maximum player capacity. Try joining a different server."
            }
            Self::ServerIdConflict => "A server with the same id is already registered.",
            Self::BrokerUnavailable => {
                "The message broker rejected or failed the request. Please try again later."
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
