mod engine;
mod manager;
mod opus;

pub use engine::{EngineEvent, build_peer_connection};
pub use manager::{NegotiationManager, StartOptions};
