use crate::integration::init_tracing;
use crate::utils::{audio_only, joined_manager};
use jamlink_core::{NegotiationState, SignalPayload};

#[tokio::test]
async fn test_glare_keeps_local_offer() {
    init_tracing();

    let mut left = joined_manager().await;
    let mut right = joined_manager().await;
    left.manager.start(audio_only()).await.expect("left start");
    right.manager.start(audio_only()).await.expect("right start");

    let remote_offer = right.signals.offers().await.remove(0);
    left.manager
        .handle_signal(SignalPayload::Sdp(remote_offer))
        .await;

    // With a local offer pending the colliding remote one is rejected:
    // no answer goes out and the local offer stays committed.
    assert_eq!(left.manager.state(), NegotiationState::Offering);
    assert!(left.signals.answers().await.is_empty());
    assert!(
        left.manager
            .peer_connection()
            .remote_description()
            .await
            .is_none()
    );
    assert_eq!(left.signals.offers().await.len(), 1);
}
