use crate::integration::{init_tracing, spawn_relay};
use crate::utils::{TestClient, assert_joined, assert_notice};

#[tokio::test]
async fn test_abnormal_drop_triggers_leave() {
    init_tracing();

    let (addr, registry) = spawn_relay().await;

    let mut alice = TestClient::connect(addr)
        .await
        .expect("Failed to connect alice");
    let mut bob = TestClient::connect(addr)
        .await
        .expect("Failed to connect bob");

    alice.join("attic").await.expect("Failed to send join");
    let ack = alice.recv_json().await.expect("No join ack for alice");
    assert_joined(&ack, "attic", 1);

    bob.join("attic").await.expect("Failed to send join");
    let ack = bob.recv_json().await.expect("No join ack for bob");
    assert_joined(&ack, "attic", 2);

    let notice = alice.recv_json().await.expect("No join notice for alice");
    assert_notice(&notice, "join", "attic");

    // No close handshake at all: the torn transport must converge on the
    // same eviction path as a graceful close.
    bob.abort();

    let notice = alice.recv_json().await.expect("No leave notice for alice");
    assert_notice(&notice, "leave", "attic");

    assert_eq!(registry.client_count(), 1, "bob should be evicted");
    assert!(registry.has_room(&"attic".into()), "room should survive");

    alice.close().await.expect("Failed to close alice");
}
