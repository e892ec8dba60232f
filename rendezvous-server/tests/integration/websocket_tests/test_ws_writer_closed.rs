use crate::integration::{TestServer, init_tracing};
use crate::utils::TestClient;
use rendezvous_core::{ClientMessage, RoomId, UserId};
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_ws_writer_closed_mid_join() {
    init_tracing();

    let server = TestServer::start().await;
    let service = server.service.clone();

    let mut alice = TestClient::connect(server.addr).await.expect("alice connect");
    alice.join("r1", "alice").await.expect("alice join");

    // Queue a second join and close the writer side before it is answered.
    alice
        .send(&ClientMessage::JoinRoom {
            room_id: RoomId::from("r2"),
            user_id: UserId::from("alice"),
        })
        .await
        .expect("send second join");
    service.close_all();

    tokio::time::timeout(Duration::from_secs(5), async {
        while service.connection_count() > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("connection was not cleaned up");

    let (bound, rooms) = service
        .inspect(|relay| (relay.registry().len(), relay.directory().room_count()))
        .await;
    assert_eq!(bound, 0, "identity left bound to a closed connection");
    assert_eq!(rooms, 0, "room left with a member that has no connection");

    drop(alice);
    let _ = server.shutdown().await;
}
