use crate::media::{LocalTrack, MediaBinder};
use crate::negotiation::opus::bias_opus_low_latency;
use crate::signaling::SignalSender;
use jamlink_core::{MediaTrackRole, NegotiationState, SessionError, SignalMessage, SignalPayload};
use std::sync::Arc;
use tracing::{debug, info, warn};
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// Device selection for the start intent. `video` gates both local capture
/// and receipt of the remote video track: without it the offer carries no
/// video section at all.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub voice_device: Option<String>,
    pub instrument_device: Option<String>,
    pub video: bool,
}

/// Owns the peer connection and the negotiation lifecycle: when to offer,
/// when to answer, and how connectivity candidates are queued and applied.
///
/// Exactly one task may drive a manager (the session loop); it holds no
/// locks of its own.
pub struct NegotiationManager {
    state: NegotiationState,
    pc: Arc<RTCPeerConnection>,
    signal: Arc<dyn SignalSender>,
    binder: Arc<dyn MediaBinder>,
    /// Candidates received before the remote description; applied in receipt
    /// order the moment it lands, then discarded.
    pending_candidates: Vec<RTCIceCandidateInit>,
    has_started: bool,
    published: Vec<MediaTrackRole>,
}

impl NegotiationManager {
    pub fn new(
        pc: Arc<RTCPeerConnection>,
        signal: Arc<dyn SignalSender>,
        binder: Arc<dyn MediaBinder>,
    ) -> Self {
        Self {
            state: NegotiationState::Idle,
            pc,
            signal,
            binder,
            pending_candidates: Vec::new(),
            has_started: false,
            published: Vec::new(),
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    /// Roles published so far, in publication order.
    pub fn published_roles(&self) -> &[MediaTrackRole] {
        &self.published
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending_candidates.len()
    }

    pub fn peer_connection(&self) -> &Arc<RTCPeerConnection> {
        &self.pc
    }

    /// The relay sends no join acknowledgement, so the session marks the
    /// manager joined as soon as the channel is open and the join frame is
    /// on the wire.
    pub fn mark_joined(&mut self) {
        if self.state == NegotiationState::Idle {
            self.state = NegotiationState::Joined;
        }
    }

    /// Acquires and publishes the local tracks, then runs an offer round.
    /// Idempotent: a second call after a successful start is a no-op.
    ///
    /// Also legal while already connected: a late joiner answers the peer's
    /// offer first and publishes afterwards, which is just a renegotiation.
    pub async fn start(&mut self, opts: StartOptions) -> Result<(), SessionError> {
        if self.has_started {
            debug!("start ignored: already started");
            return Ok(());
        }
        if !matches!(
            self.state,
            NegotiationState::Joined | NegotiationState::Connected
        ) {
            return Err(SessionError::Negotiation(format!(
                "start requires a joined room (state: {})",
                self.state
            )));
        }

        // Acquire everything before publishing anything, so a failed device
        // leaves no track behind and the state stays Joined.
        let voice = self.binder.acquire_voice(opts.voice_device.as_deref()).await?;
        let instrument = self
            .binder
            .acquire_instrument(opts.instrument_device.as_deref())
            .await?;
        let video = if opts.video {
            Some(self.binder.acquire_video().await?)
        } else {
            None
        };

        // Fixed publication order: voice, instrument, then optional video.
        self.publish(MediaTrackRole::Voice, voice).await?;
        self.publish(MediaTrackRole::Instrument, instrument).await?;
        if let Some(track) = video {
            self.publish(MediaTrackRole::Video, track).await?;
        }

        self.has_started = true;
        if let Err(e) = self.send_offer().await {
            warn!("offer round failed: {e}");
        }
        Ok(())
    }

    async fn publish(&mut self, role: MediaTrackRole, track: LocalTrack) -> Result<(), SessionError> {
        self.pc.add_track(track).await?;
        self.published.push(role);
        debug!("published {role} track");
        Ok(())
    }

    /// Creates, locally commits and relays an offer on the existing
    /// connection. Used for the first round and for every renegotiation;
    /// published tracks persist across calls.
    async fn send_offer(&mut self) -> Result<(), SessionError> {
        self.state = NegotiationState::Offering;
        let offer = self.pc.create_offer(None).await?;
        let offer = RTCSessionDescription::offer(bias_opus_low_latency(&offer.sdp))?;
        self.pc.set_local_description(offer.clone()).await?;
        info!("local offer committed");
        self.signal
            .send(SignalMessage::Signal {
                data: SignalPayload::Sdp(offer),
            })
            .await;
        Ok(())
    }

    /// One inbound `signal` payload. Description and candidate failures are
    /// logged and non-fatal: the round silently fails, the user restarts.
    pub async fn handle_signal(&mut self, payload: SignalPayload) {
        match payload {
            SignalPayload::Sdp(desc) => match desc.sdp_type {
                RTCSdpType::Offer => self.handle_remote_offer(desc).await,
                RTCSdpType::Answer => self.handle_remote_answer(desc).await,
                other => warn!("ignoring {other} description"),
            },
            SignalPayload::Candidate(candidate) => self.handle_candidate(candidate).await,
        }
    }

    async fn handle_remote_offer(&mut self, desc: RTCSessionDescription) {
        if self.state == NegotiationState::Closed {
            return;
        }
        let previous = self.state;
        self.state = NegotiationState::Answering;
        if let Err(e) = self.answer(desc).await {
            // Offer glare lands here: with a local offer still pending the
            // remote one is rejected by the SDP state machine and ours
            // stands. The wire format carries no peer identity to tie-break
            // with, so simultaneous starts need a manual restart.
            warn!("answer round failed: {e}");
            self.state = previous;
        }
    }

    async fn answer(&mut self, desc: RTCSessionDescription) -> Result<(), SessionError> {
        self.pc.set_remote_description(desc).await?;
        self.drain_pending_candidates().await;
        let answer = self.pc.create_answer(None).await?;
        self.pc.set_local_description(answer.clone()).await?;
        self.signal
            .send(SignalMessage::Signal {
                data: SignalPayload::Sdp(answer),
            })
            .await;
        self.state = NegotiationState::Connected;
        info!("answered remote offer, session connected");
        Ok(())
    }

    async fn handle_remote_answer(&mut self, desc: RTCSessionDescription) {
        if self.state != NegotiationState::Offering {
            warn!("ignoring answer in state {}", self.state);
            return;
        }
        if let Err(e) = self.pc.set_remote_description(desc).await {
            warn!("failed to apply answer: {e}");
            return;
        }
        self.drain_pending_candidates().await;
        self.state = NegotiationState::Connected;
        info!("answer applied, session connected");
    }

    async fn handle_candidate(&mut self, candidate: RTCIceCandidateInit) {
        if self.state == NegotiationState::Closed {
            return;
        }
        if self.pc.remote_description().await.is_none() {
            debug!("queueing candidate until the remote description is set");
            self.pending_candidates.push(candidate);
            return;
        }
        if let Err(e) = self.pc.add_ice_candidate(candidate).await {
            // Duplicate or stale candidates are expected and tolerated.
            warn!("failed to apply candidate: {e}");
        }
    }

    async fn drain_pending_candidates(&mut self) {
        for candidate in std::mem::take(&mut self.pending_candidates) {
            if let Err(e) = self.pc.add_ice_candidate(candidate).await {
                warn!("failed to apply queued candidate: {e}");
            }
        }
    }

    /// A new arrival in the room. If the local side already publishes, the
    /// offer round is re-run on the same connection and tracks.
    pub async fn handle_peer_joined(&mut self) {
        if !self.has_started {
            debug!("peer joined before local start; waiting for their offer");
            return;
        }
        info!("peer joined, renegotiating");
        if let Err(e) = self.send_offer().await {
            warn!("renegotiation offer failed: {e}");
        }
    }

    /// The remote peer left. Remote state is discarded; local tracks stay
    /// published and ready for the next arrival.
    pub fn handle_peer_left(&mut self) {
        if self.state == NegotiationState::Closed {
            return;
        }
        self.pending_candidates.clear();
        self.state = NegotiationState::Joined;
        info!("peer left, back to joined");
    }

    /// Relays a locally gathered candidate to the peer.
    pub async fn send_candidate(&self, candidate: RTCIceCandidateInit) {
        if self.state == NegotiationState::Closed {
            return;
        }
        self.signal
            .send(SignalMessage::Signal {
                data: SignalPayload::Candidate(candidate),
            })
            .await;
    }

    /// Explicit leave. Terminal: no frame is handled past this point.
    pub async fn close(&mut self) {
        self.state = NegotiationState::Closed;
        if let Err(e) = self.pc.close().await {
            warn!("error closing peer connection: {e}");
        }
    }
}
