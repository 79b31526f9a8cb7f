use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic label of a published media track, independent of its transport
/// kind. The role travels as the track's media-stream id so the remote side
/// can recover it without trusting arrival order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MediaTrackRole {
    Voice,
    Instrument,
    Video,
}

impl MediaTrackRole {
    /// Stream id carried in the session description for this role.
    pub const fn stream_id(&self) -> &'static str {
        match self {
            MediaTrackRole::Voice => "voice",
            MediaTrackRole::Instrument => "instrument",
            MediaTrackRole::Video => "video",
        }
    }

    pub fn from_stream_id(id: &str) -> Option<Self> {
        match id {
            "voice" => Some(MediaTrackRole::Voice),
            "instrument" => Some(MediaTrackRole::Instrument),
            "video" => Some(MediaTrackRole::Video),
            _ => None,
        }
    }

    pub const fn is_audio(&self) -> bool {
        matches!(self, MediaTrackRole::Voice | MediaTrackRole::Instrument)
    }
}

impl fmt::Display for MediaTrackRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stream_id())
    }
}
