pub mod error;
pub mod model;

pub use error::SessionError;
pub use model::{MediaTrackRole, NegotiationState, RoomId, SignalMessage, SignalPayload};
