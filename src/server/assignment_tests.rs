use super::*;
use crate::protocol::{
    ErrorKind, PlayerConnectionRequest, RegistryError, ServerRecord, ServerRegistrationRequest,
};
use tokio::sync::Barrier;
use uuid::Uuid;

fn create_test_service() -> Arc<RegistryService> {
    RegistryService::with_broker(Arc::new(InMemoryBroker::new()), RegistryConfig::default())
}

fn register(service: &RegistryService, port: u16, max_player_count: u32) -> ServerRecord {
    service
        .register_server(ServerRegistrationRequest {
            address: "127.0.0.1".to_string(),
            listen_address: "0.0.0.0".to_string(),
            port,
            max_player_count: Some(max_player_count),
        })
        .expect("registration succeeds")
}

#[test]
fn attach_to_any_server_snapshots_server_details() {
    let service = create_test_service();
    let server = register(&service, 8888, 2);
    let user_id = Uuid::new_v4();

    let player = service
        .attach_to_any_server(PlayerConnectionRequest::new("Tester", user_id))
        .unwrap();

    assert_eq!(player.user_id, user_id);
    assert_eq!(player.user_name, "Tester");
    assert_eq!(player.server_id, server.id);
    assert_eq!(player.server_address, "127.0.0.1");
    assert_eq!(player.server_port, 8888);
    assert_eq!(service.get_server(&server.id).unwrap().player_count, 1);
    assert_eq!(service.get_player(&user_id).unwrap(), player);
}

#[test]
fn attach_to_any_server_is_first_fit() {
    let service = create_test_service();
    let first = register(&service, 1, 1);
    let second = register(&service, 2, 4);

    let a = service
        .attach_to_any_server(PlayerConnectionRequest::new("a", Uuid::new_v4()))
        .unwrap();
    let b = service
        .attach_to_any_server(PlayerConnectionRequest::new("b", Uuid::new_v4()))
        .unwrap();

    assert_eq!(a.server_id, first.id);
    assert_eq!(b.server_id, second.id);
}

#[test]
fn full_server_is_not_found_for_any_but_capacity_when_named() {
    let service = create_test_service();
    let server = register(&service, 8888, 2);
    for name in ["one", "two"] {
        service
            .attach_to_any_server(PlayerConnectionRequest::new(name, Uuid::new_v4()))
            .unwrap();
    }

    let any = service
        .attach_to_any_server(PlayerConnectionRequest::new("three", Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(any, RegistryError::NoServersAvailable));
    assert_eq!(any.kind(), ErrorKind::NotFound);

    let named = service
        .attach_to_server(
            &server.id,
            PlayerConnectionRequest::new("three", Uuid::new_v4()),
        )
        .unwrap_err();
    assert!(matches!(named, RegistryError::Capacity { server_id } if server_id == server.id));
    assert_eq!(named.kind(), ErrorKind::Capacity);

    assert_eq!(service.get_server(&server.id).unwrap().player_count, 2);
    let snapshot = service.metrics().snapshot();
    assert_eq!(snapshot.players.attach_not_found, 1);
    assert_eq!(snapshot.players.attach_capacity_denials, 1);
}

#[test]
fn attach_with_no_servers_is_not_found() {
    let service = create_test_service();
    let err = service
        .attach_to_any_server(PlayerConnectionRequest::new("lonely", Uuid::new_v4()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn attach_to_unknown_server_is_not_found() {
    let service = create_test_service();
    let server_id = Uuid::new_v4();
    let err = service
        .attach_to_server(&server_id, PlayerConnectionRequest::new("x", Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(err, RegistryError::ServerNotFound(id) if id == server_id));
    assert!(service.list_players().is_empty());
}

#[test]
fn detach_player_is_idempotent() {
    let service = create_test_service();
    let server = register(&service, 8888, 2);
    let user_id = Uuid::new_v4();
    service
        .attach_to_server(&server.id, PlayerConnectionRequest::new("alice", user_id))
        .unwrap();

    assert!(service.detach_player(&user_id).is_some());
    assert!(service.detach_player(&user_id).is_none());
    assert_eq!(service.get_server(&server.id).unwrap().player_count, 0);
    assert_eq!(
        service.get_player(&user_id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn detach_frees_a_slot_for_the_next_player() {
    let service = create_test_service();
    let server = register(&service, 8888, 1);
    let first = Uuid::new_v4();
    service
        .attach_to_server(&server.id, PlayerConnectionRequest::new("first", first))
        .unwrap();
    service.detach_player(&first);

    let second = service
        .attach_to_server(
            &server.id,
            PlayerConnectionRequest::new("second", Uuid::new_v4()),
        )
        .unwrap();
    assert_eq!(second.server_id, server.id);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_named_attaches_never_exceed_capacity() {
    const ATTEMPTS: usize = 16;
    const CAPACITY: u32 = 5;

    let service = create_test_service();
    let server = register(&service, 8888, CAPACITY);
    let barrier = Arc::new(Barrier::new(ATTEMPTS));

    let mut handles = Vec::new();
    for i in 0..ATTEMPTS {
        let service = service.clone();
        let barrier = barrier.clone();
        let server_id = server.id;
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            service.attach_to_server(
                &server_id,
                PlayerConnectionRequest::new(format!("player-{i}"), Uuid::new_v4()),
            )
        }));
    }

    let mut successes = 0;
    let mut capacity_failures = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::Capacity, "unexpected error: {err}");
                capacity_failures += 1;
            }
        }
    }

    assert_eq!(successes, CAPACITY as usize);
    assert_eq!(capacity_failures, ATTEMPTS - CAPACITY as usize);
    assert_eq!(
        service.get_server(&server.id).unwrap().player_count,
        CAPACITY
    );
    assert_eq!(service.list_players().len(), CAPACITY as usize);
}
