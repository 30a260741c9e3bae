use crate::server::RegistryService;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;

use super::handlers;

/// Create the Axum router for the registry API.
pub fn create_router(cors_origins: &str) -> axum::Router<Arc<RegistryService>> {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    let cors = if cors_origins == "*" {
        CorsLayer::permissive()
    } else {
        let origins: Vec<_> = cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse::<axum::http::HeaderValue>().ok())
            .collect();

        if origins.is_empty() {
            tracing::warn!("No valid CORS origins configured, using permissive CORS");
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let api = axum::Router::new()
        .route(
            "/servers",
            post(handlers::register_server)
                .get(handlers::list_servers)
                .delete(handlers::remove_all_servers),
        )
        .route(
            "/servers/{server_id}",
            get(handlers::get_server).delete(handlers::remove_server),
        )
        .route(
            "/players",
            post(handlers::attach_to_any_server).get(handlers::list_players),
        )
        .route(
            "/players/{id}",
            post(handlers::attach_to_server)
                .get(handlers::get_player)
                .delete(handlers::detach_player),
        )
        .route(
            "/brokers/queue/{server_id}",
            post(handlers::provision_server_queues),
        )
        .route("/brokers/message", post(handlers::send_message));

    axum::Router::new()
        .nest("/api/v1", api)
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Serve the registry API until `shutdown` resolves, then close the broker.
pub async fn run_server(
    addr: SocketAddr,
    service: Arc<RegistryService>,
    cors_origins: &str,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = create_router(cors_origins).with_state(service.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting game registry");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    service.shutdown().await;
    tracing::info!("Game registry stopped");
    Ok(())
}
