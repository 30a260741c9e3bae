use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Operation counters for the registry and message router.
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    // Server registry
    pub servers_registered: AtomicU64,
    pub servers_removed: AtomicU64,
    pub server_registration_conflicts: AtomicU64,

    // Player assignment
    pub players_attached: AtomicU64,
    pub players_detached: AtomicU64,
    pub attach_not_found: AtomicU64,
    pub attach_capacity_denials: AtomicU64,

    // Message routing
    pub private_messages_published: AtomicU64,
    pub public_messages_published: AtomicU64,
    pub unroutable_messages: AtomicU64,
    pub publish_failures: AtomicU64,
    pub queues_provisioned: AtomicU64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub servers: ServerMetrics,
    pub players: PlayerMetrics,
    pub messages: MessageMetrics,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerMetrics {
    pub registered: u64,
    pub removed: u64,
    pub registration_conflicts: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetrics {
    pub attached: u64,
    pub detached: u64,
    pub attach_not_found: u64,
    pub attach_capacity_denials: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetrics {
    pub private_published: u64,
    pub public_published: u64,
    pub unroutable: u64,
    pub publish_failures: u64,
    pub queues_provisioned: u64,
}

impl RegistryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_servers_registered(&self) {
        self.servers_registered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_servers_removed(&self, count: u64) {
        if count > 0 {
            self.servers_removed.fetch_add(count, Ordering::Relaxed);
        }
    }

    pub fn increment_server_registration_conflicts(&self) {
        self.server_registration_conflicts
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_players_attached(&self) {
        self.players_attached.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_players_detached(&self, count: u64) {
        if count > 0 {
            self.players_detached.fetch_add(count, Ordering::Relaxed);
        }
    }

    pub fn increment_attach_not_found(&self) {
        self.attach_not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_attach_capacity_denials(&self) {
        self.attach_capacity_denials.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_private_messages_published(&self) {
        self.private_messages_published
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_public_messages_published(&self) {
        self.public_messages_published
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_unroutable_messages(&self) {
        self.unroutable_messages.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_publish_failures(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queues_provisioned(&self) {
        self.queues_provisioned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: chrono::Utc::now(),
            servers: ServerMetrics {
                registered: self.servers_registered.load(Ordering::Relaxed),
                removed: self.servers_removed.load(Ordering::Relaxed),
                registration_conflicts: self.server_registration_conflicts.load(Ordering::Relaxed),
            },
            players: PlayerMetrics {
                attached: self.players_attached.load(Ordering::Relaxed),
                detached: self.players_detached.load(Ordering::Relaxed),
                attach_not_found: self.attach_not_found.load(Ordering::Relaxed),
                attach_capacity_denials: self.attach_capacity_denials.load(Ordering::Relaxed),
            },
            messages: MessageMetrics {
                private_published: self.private_messages_published.load(Ordering::Relaxed),
                public_published: self.public_messages_published.load(Ordering::Relaxed),
                unroutable: self.unroutable_messages.load(Ordering::Relaxed),
                publish_failures: self.publish_failures.load(Ordering::Relaxed),
                queues_provisioned: self.queues_provisioned.load(Ordering::Relaxed),
            },
        }
    }
}
