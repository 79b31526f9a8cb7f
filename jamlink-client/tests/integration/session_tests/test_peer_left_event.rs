use crate::integration::init_tracing;
use crate::utils::{NullSink, spawn_relay, wait_for};
use jamlink_client::{SampleBinder, Session, SessionConfig, SessionEvent};
use std::sync::Arc;

fn config(addr: std::net::SocketAddr) -> SessionConfig {
    SessionConfig {
        relay_url: format!("ws://{addr}/ws"),
        room: "basement".into(),
        ice_servers: Vec::new(),
    }
}

#[tokio::test]
async fn test_peer_left_event() {
    init_tracing();
    let addr = spawn_relay().await;

    let (_stayer, mut stayer_events) =
        Session::connect(config(addr), Arc::new(SampleBinder), Arc::new(NullSink))
            .await
            .expect("first connect");
    let (leaver, mut leaver_events) =
        Session::connect(config(addr), Arc::new(SampleBinder), Arc::new(NullSink))
            .await
            .expect("second connect");

    wait_for(&mut stayer_events, "peer joined", |e| {
        matches!(e, SessionEvent::PeerJoined)
    })
    .await;
    wait_for(&mut leaver_events, "peer joined", |e| {
        matches!(e, SessionEvent::PeerJoined)
    })
    .await;

    leaver.leave().await;
    wait_for(&mut stayer_events, "peer left", |e| {
        matches!(e, SessionEvent::PeerLeft)
    })
    .await;
}
