mod channel;
mod sender;

pub use channel::{ChannelEvent, SignalingChannel};
pub use sender::SignalSender;
