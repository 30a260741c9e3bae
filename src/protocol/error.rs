use super::error_codes::ErrorCode;
use super::types::{ServerId, UserId};
use crate::broker::BrokerError;
use thiserror::Error;

/// Category an error falls into, independent of any transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced server, player or recipient does not exist.
    NotFound,
    /// An explicitly targeted server is full.
    Capacity,
    /// An insert collided with an existing id.
    Conflict,
    /// The message broker failed the request.
    Transport,
}

/// Errors reported by the registry and routing operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to find server with id {0}")]
    ServerNotFound(ServerId),
    #[error("failed to find player with id {0}")]
    PlayerNotFound(UserId),
    #[error("no servers available")]
    NoServersAvailable,
    #[error("recipient {0} has no active session")]
    RecipientNotFound(String),
    #[error("private message has no recipient")]
    MissingRecipient,
    #[error("server {server_id} is at full capacity")]
    Capacity { server_id: ServerId },
    #[error("server with id {0} is already registered")]
    Conflict(ServerId),
    #[error("broker error: {0}")]
    Broker(#[from] BrokerError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ServerNotFound(_)
            | Self::PlayerNotFound(_)
            | Self::NoServersAvailable
            | Self::RecipientNotFound(_)
            | Self::MissingRecipient => ErrorKind::NotFound,
            Self::Capacity { .. } => ErrorKind::Capacity,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Broker(_) => ErrorKind::Transport,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ServerNotFound(_) => ErrorCode::ServerNotFound,
            Self::PlayerNotFound(_) => ErrorCode::PlayerNotFound,
            Self::NoServersAvailable => ErrorCode::NoServersAvailable,
            Self::RecipientNotFound(_) | Self::MissingRecipient => ErrorCode::RecipientNotFound,
            Self::Capacity { .. } => ErrorCode::ServerFull,
            Self::Conflict(_) => ErrorCode::ServerIdConflict,
            Self::Broker(_) => ErrorCode::BrokerUnavailable,
        }
    }
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
