use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;

/// Frames exchanged with the relay. JSON text on the wire:
///
/// ```text
/// { "type": "join", "room": "abc" }
/// { "type": "peer-joined" }
/// { "type": "peer-left" }
/// { "type": "signal", "data": { "sdp": ... } | { "candidate": ... } }
/// ```
///
/// The relay never looks inside `data`; it is routed verbatim to the other
/// occupants of the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    Join { room: RoomId },
    PeerJoined,
    PeerLeft,
    Signal { data: SignalPayload },
}

/// Payload of a `signal` frame. Exactly one variant per frame, enforced by
/// the type: a session description (offer or answer) or one connectivity
/// candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SignalPayload {
    #[serde(rename = "sdp")]
    Sdp(RTCSessionDescription),
    #[serde(rename = "candidate")]
    Candidate(RTCIceCandidateInit),
}
