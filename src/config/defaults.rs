//! Default value functions for configuration fields.
//!
//! Used by serde's `#[serde(default = ...)]` attributes throughout the
//! configuration types.

use super::logging::LogFormat;

// =============================================================================
// Port & Root Config
// =============================================================================

pub const fn default_port() -> u16 {
    5080
}

// =============================================================================
// Registry Defaults
// =============================================================================

/// Capacity assigned to newly registered servers.
pub const fn default_max_players() -> u32 {
    2
}

// =============================================================================
// Broker Defaults
// =============================================================================

pub const fn default_broker_enabled() -> bool {
    true
}

pub fn default_broker_host() -> String {
    "localhost".to_string()
}

pub const fn default_broker_port() -> u16 {
    5672
}

pub fn default_broker_user() -> String {
    "guest".to_string()
}

pub fn default_broker_password() -> String {
    "guest".to_string()
}

pub fn default_broker_vhost() -> String {
    "/".to_string()
}

// =============================================================================
// Logging Defaults
// =============================================================================

pub fn default_log_dir() -> String {
    "logs".to_string()
}

pub fn default_log_filename() -> String {
    "registry.log".to_string()
}

pub fn default_rotation() -> String {
    "daily".to_string()
}

pub const fn default_enable_file_logging() -> bool {
    true
}

pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

// =============================================================================
// Security Defaults
// =============================================================================

pub fn default_cors_origins() -> String {
    "*".to_string()
}
