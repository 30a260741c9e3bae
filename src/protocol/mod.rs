// Protocol module: registry records, message intents and error taxonomy

pub mod error;
pub mod error_codes;
pub mod messages;
pub mod types;

pub use error::{ErrorKind, RegistryError, Result};
pub use error_codes::ErrorCode;
pub use messages::{MessageIntent, MessageKind, DEFAULT_SENDER};
pub use types::{
    Occupancy, PlayerConnectionRequest, PlayerRecord, ServerId, ServerRecord,
    ServerRegistrationRequest, UserId,
};
