use axum::extract::ws::Message;
use dashmap::DashMap;
use jamlink_core::SignalMessage;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub type ConnId = Uuid;
type FrameTx = mpsc::UnboundedSender<Message>;

/// Room-scoped frame forwarder. It understands the envelope (`type`, `room`)
/// and nothing else: `signal` payloads pass through verbatim, so their
/// contents never influence routing.
#[derive(Clone, Default)]
pub struct RelayService {
    rooms: Arc<DashMap<String, HashMap<ConnId, FrameTx>>>,
}

impl RelayService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection in a room and announces the arrival both ways:
    /// existing occupants learn about the newcomer, and the newcomer learns
    /// the room is already occupied.
    pub fn join(&self, room: &str, conn: ConnId, tx: FrameTx) {
        let mut occupants = self.rooms.entry(room.to_string()).or_default();

        if !occupants.is_empty() {
            for peer_tx in occupants.values() {
                let _ = peer_tx.send(presence_frame(&SignalMessage::PeerJoined));
            }
            let _ = tx.send(presence_frame(&SignalMessage::PeerJoined));
        }

        occupants.insert(conn, tx);
        info!(
            "connection {conn} joined room '{room}' ({} occupants)",
            occupants.len()
        );
    }

    /// Forwards a raw frame to every other occupant of the room.
    pub fn forward(&self, room: &str, from: ConnId, text: &str) {
        let Some(occupants) = self.rooms.get(room) else {
            warn!("forward for unknown room '{room}'");
            return;
        };
        for (conn, tx) in occupants.iter() {
            if *conn != from {
                let _ = tx.send(Message::Text(text.to_string().into()));
            }
        }
    }

    /// Drops a connection and announces the departure to whoever is left.
    pub fn leave(&self, room: &str, conn: ConnId) {
        let Some(mut occupants) = self.rooms.get_mut(room) else {
            return;
        };
        if occupants.remove(&conn).is_none() {
            return;
        }
        debug!("connection {conn} left room '{room}'");

        if occupants.is_empty() {
            drop(occupants);
            self.rooms.remove_if(room, |_, occupants| occupants.is_empty());
            return;
        }
        for tx in occupants.values() {
            let _ = tx.send(presence_frame(&SignalMessage::PeerLeft));
        }
    }

    pub fn occupancy(&self, room: &str) -> usize {
        self.rooms.get(room).map_or(0, |occupants| occupants.len())
    }
}

fn presence_frame(msg: &SignalMessage) -> Message {
    // Presence frames are unit-shaped; serialization cannot fail.
    Message::Text(serde_json::to_string(msg).unwrap_or_default().into())
}
