mod role;
mod room;
mod signaling;
mod state;

pub use role::MediaTrackRole;
pub use room::RoomId;
pub use signaling::{SignalMessage, SignalPayload};
pub use state::NegotiationState;
