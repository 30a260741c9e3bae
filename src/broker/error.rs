use super::ExchangeKind;
use thiserror::Error;

/// Failures raised while talking to the message broker.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("AMQP error: {0}")]
    Amqp(#[from] lapin::Error),
    #[error("invalid broker URI: {0}")]
    InvalidUri(#[from] url::ParseError),
    #[error("failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("broker connection is closed")]
    NotConnected,
    #[error("exchange {0} is not declared")]
    UnknownExchange(String),
    #[error("queue {0} is not declared")]
    UnknownQueue(String),
    #[error("exchange {name} is already declared as {existing}")]
    ExchangeKindMismatch {
        name: String,
        existing: ExchangeKind,
    },
    #[error("publish rejected: {0}")]
    Rejected(String),
}
