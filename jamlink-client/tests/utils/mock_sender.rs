use async_trait::async_trait;
use jamlink_client::SignalSender;
use jamlink_core::{SignalMessage, SignalPayload};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::peer_connection::sdp::sdp_type::RTCSdpType;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// Mock SignalSender that captures all outbound frames.
#[derive(Clone)]
pub struct MockSignalSender {
    /// Channel to stream captured frames.
    tx: mpsc::UnboundedSender<SignalMessage>,
    /// All captured frames (for verification).
    frames: Arc<Mutex<Vec<SignalMessage>>>,
}

impl MockSignalSender {
    /// Create a new MockSignalSender and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SignalMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = Self {
            tx,
            frames: Arc::new(Mutex::new(Vec::new())),
        };
        (sender, rx)
    }

    async fn descriptions(&self, sdp_type: RTCSdpType) -> Vec<RTCSessionDescription> {
        self.frames
            .lock()
            .await
            .iter()
            .filter_map(|frame| match frame {
                SignalMessage::Signal {
                    data: SignalPayload::Sdp(desc),
                } if desc.sdp_type == sdp_type => Some(desc.clone()),
                _ => None,
            })
            .collect()
    }

    /// All offers sent so far, in order.
    pub async fn offers(&self) -> Vec<RTCSessionDescription> {
        self.descriptions(RTCSdpType::Offer).await
    }

    /// All answers sent so far, in order.
    pub async fn answers(&self) -> Vec<RTCSessionDescription> {
        self.descriptions(RTCSdpType::Answer).await
    }

    /// All relayed candidates, in order.
    pub async fn candidates(&self) -> Vec<RTCIceCandidateInit> {
        self.frames
            .lock()
            .await
            .iter()
            .filter_map(|frame| match frame {
                SignalMessage::Signal {
                    data: SignalPayload::Candidate(candidate),
                } => Some(candidate.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SignalSender for MockSignalSender {
    async fn send(&self, msg: SignalMessage) {
        tracing::debug!("[MockSignalSender] captured frame");
        self.frames.lock().await.push(msg.clone());
        let _ = self.tx.send(msg);
    }
}
