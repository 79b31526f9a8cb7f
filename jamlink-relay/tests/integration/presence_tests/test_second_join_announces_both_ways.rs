use crate::integration::init_tracing;
use crate::utils::{TestPeer, spawn_relay};
use jamlink_core::SignalMessage;

#[tokio::test]
async fn test_second_join_announces_both_ways() {
    init_tracing();
    let addr = spawn_relay().await;

    let mut first = TestPeer::connect(addr, "loft").await;
    let mut second = TestPeer::connect(addr, "loft").await;

    // The occupant learns about the newcomer; the newcomer learns the room
    // was already occupied.
    assert!(matches!(first.recv().await, SignalMessage::PeerJoined));
    assert!(matches!(second.recv().await, SignalMessage::PeerJoined));
}

#[tokio::test]
async fn test_first_join_is_silent() {
    init_tracing();
    let addr = spawn_relay().await;

    let mut alone = TestPeer::connect(addr, "solo").await;
    alone.expect_silence().await;
}
