use async_trait::async_trait;
use jamlink_core::{MediaTrackRole, SessionError};
use std::sync::Arc;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

pub type LocalTrack = Arc<dyn TrackLocal + Send + Sync>;

/// Capture seam. Voice, instrument and video each have their own device
/// selection and constraint profile; an acquisition failure surfaces as
/// `SessionError::Device` and is fatal to the start intent.
#[async_trait]
pub trait MediaBinder: Send + Sync {
    async fn acquire_voice(&self, device: Option<&str>) -> Result<LocalTrack, SessionError>;
    async fn acquire_instrument(&self, device: Option<&str>) -> Result<LocalTrack, SessionError>;
    async fn acquire_video(&self) -> Result<LocalTrack, SessionError>;
}

/// Sample-fed binder: tracks are created up front and filled by whatever
/// capture pipeline the embedder wires in. Stream ids carry the role so the
/// remote router does not have to trust arrival order.
pub struct SampleBinder;

impl SampleBinder {
    fn audio_track(role: MediaTrackRole, device: Option<&str>) -> LocalTrack {
        let codec = RTCRtpCodecCapability {
            mime_type: MIME_TYPE_OPUS.to_string(),
            clock_rate: 48000,
            channels: 2,
            ..Default::default()
        };
        let id = match device {
            Some(device) => format!("{}-{device}", role.stream_id()),
            None => role.stream_id().to_string(),
        };
        Arc::new(TrackLocalStaticSample::new(
            codec,
            id,
            role.stream_id().to_string(),
        ))
    }
}

#[async_trait]
impl MediaBinder for SampleBinder {
    async fn acquire_voice(&self, device: Option<&str>) -> Result<LocalTrack, SessionError> {
        Ok(Self::audio_track(MediaTrackRole::Voice, device))
    }

    async fn acquire_instrument(&self, device: Option<&str>) -> Result<LocalTrack, SessionError> {
        Ok(Self::audio_track(MediaTrackRole::Instrument, device))
    }

    async fn acquire_video(&self) -> Result<LocalTrack, SessionError> {
        let codec = RTCRtpCodecCapability {
            mime_type: MIME_TYPE_VP8.to_string(),
            clock_rate: 90000,
            ..Default::default()
        };
        Ok(Arc::new(TrackLocalStaticSample::new(
            codec,
            MediaTrackRole::Video.stream_id().to_string(),
            MediaTrackRole::Video.stream_id().to_string(),
        )))
    }
}
