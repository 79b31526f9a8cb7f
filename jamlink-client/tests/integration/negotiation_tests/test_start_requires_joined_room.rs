use crate::integration::init_tracing;
use crate::utils::{MockSignalSender, audio_only};
use jamlink_client::{NegotiationManager, SampleBinder, build_peer_connection};
use jamlink_core::{NegotiationState, SessionError};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_start_requires_joined_room() {
    init_tracing();

    let (signals, _frame_rx) = MockSignalSender::new();
    let (engine_tx, _engine_rx) = mpsc::channel(64);
    let pc = build_peer_connection(Vec::new(), engine_tx)
        .await
        .expect("peer connection");
    let mut manager = NegotiationManager::new(pc, Arc::new(signals.clone()), Arc::new(SampleBinder));

    let err = manager.start(audio_only()).await.expect_err("start in idle");
    assert!(matches!(err, SessionError::Negotiation(_)));
    assert_eq!(manager.state(), NegotiationState::Idle);
    assert!(manager.published_roles().is_empty());
    assert!(signals.offers().await.is_empty());
}
