use crate::integration::init_tracing;
use crate::utils::{joined_manager, with_video};
use jamlink_core::{MediaTrackRole, NegotiationState};

#[tokio::test]
async fn test_start_publishes_in_fixed_order() {
    init_tracing();

    let mut t = joined_manager().await;
    t.manager.start(with_video()).await.expect("start");

    assert_eq!(
        t.manager.published_roles(),
        [
            MediaTrackRole::Voice,
            MediaTrackRole::Instrument,
            MediaTrackRole::Video
        ]
    );
    assert_eq!(t.manager.state(), NegotiationState::Offering);
    assert_eq!(t.manager.peer_connection().get_senders().await.len(), 3);

    let offers = t.signals.offers().await;
    assert_eq!(offers.len(), 1, "exactly one offer per start");
    assert!(offers[0].sdp.contains("m=video"));
}
