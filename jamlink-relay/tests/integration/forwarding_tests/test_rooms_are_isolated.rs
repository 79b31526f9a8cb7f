use crate::integration::init_tracing;
use crate::utils::{TestPeer, spawn_relay};
use jamlink_core::SignalMessage;

#[tokio::test]
async fn test_rooms_are_isolated() {
    init_tracing();
    let addr = spawn_relay().await;

    let mut red_a = TestPeer::connect(addr, "red").await;
    let mut red_b = TestPeer::connect(addr, "red").await;
    let mut blue = TestPeer::connect(addr, "blue").await;
    assert!(matches!(red_a.recv().await, SignalMessage::PeerJoined));
    assert!(matches!(red_b.recv().await, SignalMessage::PeerJoined));

    red_a
        .send_raw(r#"{"type":"signal","data":{"candidate":{"candidate":"","sdpMid":null,"sdpMLineIndex":null,"usernameFragment":null}}}"#)
        .await;

    assert!(matches!(red_b.recv().await, SignalMessage::Signal { .. }));
    blue.expect_silence().await;
}
