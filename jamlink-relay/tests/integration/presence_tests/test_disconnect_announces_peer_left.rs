use crate::integration::init_tracing;
use crate::utils::{TestPeer, spawn_relay};
use jamlink_core::SignalMessage;

#[tokio::test]
async fn test_disconnect_announces_peer_left() {
    init_tracing();
    let addr = spawn_relay().await;

    let mut stayer = TestPeer::connect(addr, "cellar").await;
    let leaver = TestPeer::connect(addr, "cellar").await;
    assert!(matches!(stayer.recv().await, SignalMessage::PeerJoined));

    leaver.close().await;
    assert!(matches!(stayer.recv().await, SignalMessage::PeerLeft));
}
