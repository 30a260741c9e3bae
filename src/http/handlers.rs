use crate::broker::ServerQueues;
use crate::metrics::MetricsSnapshot;
use crate::protocol::{
    MessageIntent, PlayerConnectionRequest, PlayerRecord, RegistryError, ServerId, ServerRecord,
    ServerRegistrationRequest, UserId,
};
use crate::server::{DeliveryReceipt, RegistryService};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

type ApiResult<T> = Result<T, RegistryError>;

/// Counts returned by the server removal endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemovalSummary {
    pub servers_removed: usize,
    pub players_removed: usize,
}

pub(super) async fn health_check() -> &'static str {
    "OK"
}

pub(super) async fn metrics(State(service): State<Arc<RegistryService>>) -> Json<MetricsSnapshot> {
    Json(service.metrics().snapshot())
}

pub(super) async fn register_server(
    State(service): State<Arc<RegistryService>>,
    Json(request): Json<ServerRegistrationRequest>,
) -> ApiResult<(StatusCode, Json<ServerRecord>)> {
    let server = service.register_server(request)?;
    Ok((StatusCode::CREATED, Json(server)))
}

pub(super) async fn list_servers(
    State(service): State<Arc<RegistryService>>,
) -> Json<Vec<ServerRecord>> {
    Json(service.list_servers())
}

pub(super) async fn get_server(
    State(service): State<Arc<RegistryService>>,
    Path(server_id): Path<ServerId>,
) -> ApiResult<Json<ServerRecord>> {
    service.get_server(&server_id).map(Json)
}

pub(super) async fn remove_server(
    State(service): State<Arc<RegistryService>>,
    Path(server_id): Path<ServerId>,
) -> Json<RemovalSummary> {
    let summary = match service.remove_server(&server_id) {
        Some(removed) => RemovalSummary {
            servers_removed: 1,
            players_removed: removed.players.len(),
        },
        None => RemovalSummary {
            servers_removed: 0,
            players_removed: 0,
        },
    };
    Json(summary)
}

pub(super) async fn remove_all_servers(
    State(service): State<Arc<RegistryService>>,
) -> Json<RemovalSummary> {
    let outcome = service.remove_all_servers();
    Json(RemovalSummary {
        servers_removed: outcome.servers_removed,
        players_removed: outcome.players_removed,
    })
}

pub(super) async fn attach_to_any_server(
    State(service): State<Arc<RegistryService>>,
    Json(request): Json<PlayerConnectionRequest>,
) -> ApiResult<(StatusCode, Json<PlayerRecord>)> {
    let player = service.attach_to_any_server(request)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub(super) async fn attach_to_server(
    State(service): State<Arc<RegistryService>>,
    Path(server_id): Path<ServerId>,
    Json(request): Json<PlayerConnectionRequest>,
) -> ApiResult<(StatusCode, Json<PlayerRecord>)> {
    let player = service.attach_to_server(&server_id, request)?;
    Ok((StatusCode::CREATED, Json(player)))
}

pub(super) async fn list_players(
    State(service): State<Arc<RegistryService>>,
) -> Json<Vec<PlayerRecord>> {
    Json(service.list_players())
}

pub(super) async fn get_player(
    State(service): State<Arc<RegistryService>>,
    Path(user_id): Path<UserId>,
) -> ApiResult<Json<PlayerRecord>> {
    service.get_player(&user_id).map(Json)
}

pub(super) async fn detach_player(
    State(service): State<Arc<RegistryService>>,
    Path(user_id): Path<UserId>,
) -> StatusCode {
    service.detach_player(&user_id);
    StatusCode::OK
}

pub(super) async fn provision_server_queues(
    State(service): State<Arc<RegistryService>>,
    Path(server_id): Path<ServerId>,
) -> ApiResult<Json<ServerQueues>> {
    let queues = service.provision_server_queues(&server_id).await?;
    Ok(Json(queues))
}

pub(super) async fn send_message(
    State(service): State<Arc<RegistryService>>,
    Json(intent): Json<MessageIntent>,
) -> ApiResult<Json<DeliveryReceipt>> {
    let receipt = service.send_message(intent).await?;
    Ok(Json(receipt))
}
