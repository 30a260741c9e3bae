//! HTTP surface over [`RegistryService`](crate::server::RegistryService).
//!
//! All registry and routing endpoints live under `/api/v1`; `/health` and
//! `/metrics` sit at the root.

mod error;
mod handlers;
mod routes;

pub use error::ErrorBody;
pub use handlers::RemovalSummary;
pub use routes::{create_router, run_server};
