#![cfg_attr(not(test), deny(clippy::panic))]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

//! # Game Registry
//!
//! Tracks running game servers and the players attached to them, hands out
//! server slots without exceeding capacity, and routes chat/system messages
//! to game servers over RabbitMQ topic and fanout exchanges.

/// Message broker abstraction and exchange/queue topology
pub mod broker;

/// Service configuration and environment variables
pub mod config;

/// HTTP API
pub mod http;

/// Structured logging configuration
pub mod logging;

/// Operation counters
pub mod metrics;

/// Records, message intents and errors
pub mod protocol;

/// Server and player bookkeeping
pub mod registry;

/// Registry service orchestration
pub mod server;
