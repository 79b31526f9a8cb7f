pub mod media;
pub mod negotiation;
pub mod router;
pub mod session;
pub mod signaling;

pub use media::{LocalTrack, MediaBinder, SampleBinder};
pub use negotiation::{EngineEvent, NegotiationManager, StartOptions, build_peer_connection};
pub use router::{RenderSink, TrackRouter};
pub use session::{Session, SessionCommand, SessionConfig, SessionEvent, SessionHandle};
pub use signaling::{ChannelEvent, SignalSender, SignalingChannel};
