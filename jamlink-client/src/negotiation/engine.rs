use jamlink_core::SessionError;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;

/// Callbacks of the underlying connection, funneled onto one queue so the
/// session loop is the only task that ever touches negotiation state.
pub enum EngineEvent {
    LocalCandidate(RTCIceCandidateInit),
    RemoteTrack(Arc<webrtc::track::track_remote::TrackRemote>),
    ConnectionState(RTCPeerConnectionState),
}

/// Builds the single peer connection a session owns and wires its callbacks
/// into `event_tx`. The connection is reused across every offer/answer
/// exchange of the session, renegotiation included.
pub async fn build_peer_connection(
    ice_servers: Vec<String>,
    event_tx: mpsc::Sender<EngineEvent>,
) -> Result<Arc<RTCPeerConnection>, SessionError> {
    let mut media_engine = MediaEngine::default();
    media_engine.register_default_codecs()?;
    let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

    let api = APIBuilder::new()
        .with_media_engine(media_engine)
        .with_interceptor_registry(registry)
        .build();

    let config = RTCConfiguration {
        ice_servers: if ice_servers.is_empty() {
            Vec::new()
        } else {
            vec![RTCIceServer {
                urls: ice_servers,
                ..Default::default()
            }]
        },
        ..Default::default()
    };

    let pc = Arc::new(api.new_peer_connection(config).await?);

    let ice_tx = event_tx.clone();
    pc.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
        let tx = ice_tx.clone();
        Box::pin(async move {
            let Some(candidate) = candidate else { return };
            let Ok(init) = candidate.to_json() else {
                return;
            };
            let _ = tx.send(EngineEvent::LocalCandidate(init)).await;
        })
    }));

    let track_tx = event_tx.clone();
    pc.on_track(Box::new(move |track, _receiver, _transceiver| {
        let tx = track_tx.clone();
        Box::pin(async move {
            let _ = tx.send(EngineEvent::RemoteTrack(track)).await;
        })
    }));

    let state_tx = event_tx;
    pc.on_peer_connection_state_change(Box::new(move |state: RTCPeerConnectionState| {
        let tx = state_tx.clone();
        Box::pin(async move {
            debug!("transport state: {state}");
            let _ = tx.send(EngineEvent::ConnectionState(state)).await;
        })
    }));

    Ok(pc)
}
