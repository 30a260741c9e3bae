use serde::{Deserialize, Serialize};
use std::fmt;

/// Sender recorded on messages that arrive without one.
pub const DEFAULT_SENDER: &str = "ADMIN";

/// Delivery kind of a chat/system message.
///
/// The variant name doubles as the name of the exchange the message is
/// published to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Delivered to a single user through the topic exchange.
    Private,
    /// Broadcast to every server through the fanout exchange.
    Public,
}

impl MessageKind {
    pub const ALL: [Self; 2] = [Self::Private, Self::Public];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "Private",
            Self::Public => "Public",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message submitted for delivery, also the payload published to the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageIntent {
    pub kind: MessageKind,
    pub content: String,
    #[serde(default)]
    pub sender: Option<String>,
    /// User name of the addressee; only read for private messages.
    #[serde(default)]
    pub recipient: Option<String>,
}

impl MessageIntent {
    pub fn private(content: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Private,
            content: content.into(),
            sender: None,
            recipient: Some(recipient.into()),
        }
    }

    pub fn public(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Public,
            content: content.into(),
            sender: None,
            recipient: None,
        }
    }

    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Fill in [`DEFAULT_SENDER`] when no sender was supplied.
    pub fn apply_default_sender(&mut self) {
        if self.sender.is_none() {
            self.sender = Some(DEFAULT_SENDER.to_string());
        }
    }

    /// Serialize into the JSON document published on the broker.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_lowercase_field_names() {
        let mut intent = MessageIntent::private("hello", "alice");
        intent.apply_default_sender();

        let value: serde_json::Value =
            serde_json::from_slice(&intent.to_payload().unwrap()).unwrap();
        assert_eq!(value["kind"], "Private");
        assert_eq!(value["content"], "hello");
        assert_eq!(value["sender"], "ADMIN");
        assert_eq!(value["recipient"], "alice");
    }

    #[test]
    fn default_sender_does_not_overwrite_explicit_sender() {
        let mut intent = MessageIntent::public("gg").with_sender("bob");
        intent.apply_default_sender();
        assert_eq!(intent.sender.as_deref(), Some("bob"));
    }

    #[test]
    fn missing_optional_fields_deserialize_as_none() {
        let intent: MessageIntent =
            serde_json::from_str(r#"{"kind":"Public","content":"maintenance at 5"}"#).unwrap();
        assert_eq!(intent.kind, MessageKind::Public);
        assert!(intent.sender.is_none());
        assert!(intent.recipient.is_none());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = serde_json::from_str::<MessageIntent>(r#"{"kind":"Unknown","content":"x"}"#);
        assert!(result.is_err());
    }
}
