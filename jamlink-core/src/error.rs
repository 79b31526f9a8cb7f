use thiserror::Error;

/// Failure taxonomy shared by every component. Lower-level errors (socket,
/// SDP, capture) are translated into one of these kinds at the component
/// boundary and never cross it raw.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Relay unreachable or the join handshake was rejected. The session
    /// never left `Idle`.
    #[error("signaling connection failed: {0}")]
    Connection(String),

    /// A capture device was unavailable or denied. Fatal to `start()`; the
    /// negotiation state rolls back to `Joined`.
    #[error("capture device unavailable: {0}")]
    Device(String),

    /// Malformed or unexpected session description / candidate. Logged and
    /// non-fatal: the round silently fails, there is no automatic retry.
    #[error("negotiation failed: {0}")]
    Negotiation(String),

    /// The signaling socket closed. Treated as peer disappearance; local
    /// session state is preserved so the user may rejoin.
    #[error("signaling transport closed")]
    Transport,
}

impl From<webrtc::Error> for SessionError {
    fn from(err: webrtc::Error) -> Self {
        SessionError::Negotiation(err.to_string())
    }
}
