use serde_json::json;

use crate::integration::{init_tracing, spawn_relay};
use crate::utils::{TestClient, assert_joined, assert_notice};

#[tokio::test]
async fn test_three_clients_mesh() {
    init_tracing();

    let (addr, registry) = spawn_relay().await;

    let mut alice = TestClient::connect(addr)
        .await
        .expect("Failed to connect alice");
    let mut bob = TestClient::connect(addr)
        .await
        .expect("Failed to connect bob");
    let mut carol = TestClient::connect(addr)
        .await
        .expect("Failed to connect carol");

    alice.join("mesh").await.expect("Failed to send join");
    let ack = alice.recv_json().await.expect("No join ack for alice");
    assert_joined(&ack, "mesh", 1);

    bob.join("mesh").await.expect("Failed to send join");
    let ack = bob.recv_json().await.expect("No join ack for bob");
    assert_joined(&ack, "mesh", 2);

    carol.join("mesh").await.expect("Failed to send join");
    let ack = carol.recv_json().await.expect("No join ack for carol");
    assert_joined(&ack, "mesh", 3);

    // Earlier members hear about every later arrival.
    for _ in 0..2 {
        let notice = alice.recv_json().await.expect("No join notice for alice");
        assert_notice(&notice, "join", "mesh");
    }
    let notice = bob.recv_json().await.expect("No join notice for bob");
    assert_notice(&notice, "join", "mesh");

    assert_eq!(registry.client_count(), 3, "all three should be members");

    // A signal from one member fans out to both others.
    let offer = json!({
        "type": "offer",
        "roomId": "mesh",
        "data": { "sdp": "v=0\r\n", "type": "offer" }
    });
    carol.send_json(&offer).await.expect("Failed to send offer");

    let relayed = alice.recv_json().await.expect("No offer for alice");
    assert_eq!(relayed, offer, "alice should get the offer verbatim");
    let relayed = bob.recv_json().await.expect("No offer for bob");
    assert_eq!(relayed, offer, "bob should get the offer verbatim");
    carol
        .expect_silence()
        .await
        .expect("Offer echoed to its sender");

    alice.close().await.expect("Failed to close alice");
    bob.close().await.expect("Failed to close bob");
    carol.close().await.expect("Failed to close carol");
}
