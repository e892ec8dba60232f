use crate::integration::{TestRelay, init_tracing};

#[tokio::test]
async fn test_disconnect_before_join() {
    init_tracing();

    let mut relay = TestRelay::new();

    let alice = relay.connect().await;
    relay.join(alice, "r1", "alice").await;

    // A connection that never joined has nothing to clean up.
    let lurker = relay.connect().await;
    let effects = relay.disconnect(lurker).await;

    assert!(effects.is_empty());
    assert_eq!(relay.relay().registry().len(), 1);
    assert!(relay.relay().directory().contains_room(&crate::utils::room("r1")));
}
