use serde_json::json;

use crate::integration::{init_tracing, spawn_relay};
use crate::utils::{TestClient, assert_error_reply, assert_joined};

#[tokio::test]
async fn test_malformed_frames() {
    init_tracing();

    let (addr, _registry) = spawn_relay().await;

    let mut client = TestClient::connect(addr)
        .await
        .expect("Failed to connect test client");

    // Broken JSON earns an error reply.
    client
        .send_raw("{not json at all")
        .await
        .expect("Failed to send raw frame");
    let reply = client.recv_json().await.expect("No error reply");
    assert_error_reply(&reply);

    // A recognised kind with broken fields earns one too.
    client
        .send_json(&json!({ "type": "join" }))
        .await
        .expect("Failed to send field-less join");
    let reply = client.recv_json().await.expect("No error reply");
    assert_error_reply(&reply);

    // Unrecognised kinds are dropped without a reply.
    client
        .send_json(&json!({ "type": "mystery", "roomId": "lobby" }))
        .await
        .expect("Failed to send unknown kind");
    client
        .expect_silence()
        .await
        .expect("Unknown kind should be ignored");

    // So are server-to-client kinds echoed back by a confused client.
    client
        .send_json(&json!({ "type": "joined", "roomId": "lobby", "clientsCount": 1 }))
        .await
        .expect("Failed to send server kind");
    client
        .expect_silence()
        .await
        .expect("Server kind should be ignored");

    // None of that took the connection down.
    client.join("lobby").await.expect("Failed to send join");
    let ack = client.recv_json().await.expect("No join ack");
    assert_joined(&ack, "lobby", 1);

    client.close().await.expect("Failed to close client");
}
