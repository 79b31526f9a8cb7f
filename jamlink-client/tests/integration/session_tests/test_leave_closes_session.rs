use crate::integration::init_tracing;
use crate::utils::{NullSink, spawn_relay, wait_for_state};
use jamlink_client::{SampleBinder, Session, SessionConfig};
use jamlink_core::NegotiationState;
use std::sync::Arc;

#[tokio::test]
async fn test_leave_closes_session() {
    init_tracing();
    let addr = spawn_relay().await;

    let (handle, mut events) = Session::connect(
        SessionConfig {
            relay_url: format!("ws://{addr}/ws"),
            room: "attic".into(),
            ice_servers: Vec::new(),
        },
        Arc::new(SampleBinder),
        Arc::new(NullSink),
    )
    .await
    .expect("connect");

    wait_for_state(&mut events, NegotiationState::Joined).await;
    handle.leave().await;
    wait_for_state(&mut events, NegotiationState::Closed).await;
}
