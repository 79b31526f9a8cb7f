use crate::integration::init_tracing;
use crate::utils::{audio_only, joined_manager};
use jamlink_core::{NegotiationState, SignalPayload};

#[tokio::test]
async fn test_answer_outside_offering_is_ignored() {
    init_tracing();

    // Run a real exchange elsewhere to obtain a well-formed answer.
    let mut offerer = joined_manager().await;
    let mut answerer = joined_manager().await;
    offerer.manager.start(audio_only()).await.expect("start");
    let offer = offerer.signals.offers().await.remove(0);
    answerer
        .manager
        .handle_signal(SignalPayload::Sdp(offer))
        .await;
    let answer = answerer.signals.answers().await.remove(0);

    // A manager that never offered drops it on the floor.
    let mut bystander = joined_manager().await;
    bystander
        .manager
        .handle_signal(SignalPayload::Sdp(answer))
        .await;

    assert_eq!(bystander.manager.state(), NegotiationState::Joined);
    assert!(
        bystander
            .manager
            .peer_connection()
            .remote_description()
            .await
            .is_none()
    );
}
