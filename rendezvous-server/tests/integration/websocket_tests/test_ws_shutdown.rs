use crate::integration::{TestServer, init_tracing};
use crate::utils::TestClient;
use std::time::Duration;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;

#[tokio::test]
async fn test_ws_shutdown_closes_connections() {
    init_tracing();

    let server = TestServer::start().await;
    let service = server.service.clone();

    let mut alice = TestClient::connect(server.addr).await.expect("alice connect");
    alice.join("r1", "alice").await.expect("alice join");
    assert_eq!(service.connection_count(), 1);

    let task = server.shutdown();

    let frame = alice.recv_close().await.expect("close frame");
    assert_eq!(frame.map(|f| f.code), Some(CloseCode::Away));
    drop(alice);

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server did not stop")
        .expect("server task panicked");
    assert!(result.is_ok());
}
