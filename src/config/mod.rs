//! Configuration module for the registry service.
//!
//! Configuration is a JSON document with per-field defaults, layered from
//! files, stdin and environment variables (see [`loader::load`]).
//!
//! # Module Structure
//!
//! - [`crate::config::types`]: Root `Config` struct
//! - [`registry`]: Registry behavior (server capacity)
//! - [`broker`]: Message broker connection
//! - [`security`]: HTTP surface settings
//! - [`logging`]: Logging configuration
//! - [`crate::config::loader`]: Configuration loading functions
//! - [`crate::config::validation`]: Configuration validation functions
//! - [`crate::config::defaults`]: Default value functions

pub mod broker;
pub mod defaults;
pub mod loader;
pub mod logging;
pub mod registry;
pub mod security;
pub mod types;
pub mod validation;

pub use broker::BrokerConfig;
pub use loader::load;
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use registry::RegistryConfig;
pub use security::SecurityConfig;
pub use types::Config;
pub use validation::{is_production_mode, validate_config};
