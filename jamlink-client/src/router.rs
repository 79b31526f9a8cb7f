use jamlink_core::MediaTrackRole;
use std::sync::Arc;
use tracing::{debug, warn};
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::track::track_remote::TrackRemote;

/// Playback seam: one sink is bound per remote track, with independent
/// volume/mute per role left to the implementation. Side-effect only; track
/// lifetime stays with the peer connection.
pub trait RenderSink: Send + Sync {
    fn bind(&self, track: Arc<TrackRemote>, role: MediaTrackRole);
}

/// Maps each remote track to a semantic role. Stream-id metadata is
/// authoritative; arrival order (first audio = voice, second = instrument)
/// remains as a fallback for peers that publish without role ids.
pub struct TrackRouter {
    sink: Arc<dyn RenderSink>,
    audio_arrivals: usize,
    bound: Vec<MediaTrackRole>,
}

impl TrackRouter {
    pub fn new(sink: Arc<dyn RenderSink>) -> Self {
        Self {
            sink,
            audio_arrivals: 0,
            bound: Vec::new(),
        }
    }

    pub fn route(&mut self, track: Arc<TrackRemote>) -> Option<MediaTrackRole> {
        let role = self.classify(track.kind(), &track.stream_id())?;
        debug!("binding remote {role} track ({})", track.id());
        self.sink.bind(track, role);
        Some(role)
    }

    fn classify(&mut self, kind: RTPCodecType, stream_id: &str) -> Option<MediaTrackRole> {
        let role = match kind {
            RTPCodecType::Video => MediaTrackRole::Video,
            RTPCodecType::Audio => {
                let role = match MediaTrackRole::from_stream_id(stream_id) {
                    Some(role) if role.is_audio() => role,
                    _ if self.audio_arrivals == 0 => MediaTrackRole::Voice,
                    _ => MediaTrackRole::Instrument,
                };
                self.audio_arrivals += 1;
                role
            }
            RTPCodecType::Unspecified => {
                warn!("remote track with unspecified kind, not binding");
                return None;
            }
        };
        self.bound.push(role);
        Some(role)
    }

    /// Roles bound since the last `clear`, in binding order.
    pub fn bound_roles(&self) -> &[MediaTrackRole] {
        &self.bound
    }

    /// Peer departure: drop the bindings and reset the positional fallback.
    pub fn clear(&mut self) {
        self.audio_arrivals = 0;
        self.bound.clear();
    }
}
