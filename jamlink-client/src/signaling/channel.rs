use crate::signaling::SignalSender;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use jamlink_core::{RoomId, SessionError, SignalMessage};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Inbound side of the relay connection, delivered on a single ordered
/// queue so handlers never run concurrently.
#[derive(Debug)]
pub enum ChannelEvent {
    Message(SignalMessage),
    /// Transport closed or errored. No reconnect is attempted; rejoining is
    /// the caller's decision.
    Closed,
}

/// Persistent duplex connection to the relay. Pure message pump: frames are
/// serialized and relayed without any interpretation of `signal` payloads.
pub struct SignalingChannel {
    out_tx: mpsc::UnboundedSender<SignalMessage>,
}

impl SignalingChannel {
    /// Opens the relay connection and announces the room. The returned
    /// receiver yields every inbound frame in receipt order, followed by one
    /// final `Closed` when the transport goes away.
    pub async fn connect(
        url: &str,
        room: RoomId,
    ) -> Result<(Self, mpsc::Receiver<ChannelEvent>), SessionError> {
        let (ws, _) = connect_async(url)
            .await
            .map_err(|e| SessionError::Connection(e.to_string()))?;
        info!("connected to relay at {url}");

        let (mut sink, mut stream) = ws.split();

        let join = serde_json::to_string(&SignalMessage::Join { room })
            .map_err(|e| SessionError::Connection(e.to_string()))?;
        sink.send(Message::Text(join.into()))
            .await
            .map_err(|e| SessionError::Connection(e.to_string()))?;

        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<SignalMessage>();
        let (event_tx, event_rx) = mpsc::channel(256);

        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!("failed to serialize signal frame: {e}");
                        continue;
                    }
                };
                if sink.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        });

        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        match serde_json::from_str::<SignalMessage>(text.as_ref()) {
                            Ok(msg) => {
                                if event_tx.send(ChannelEvent::Message(msg)).await.is_err() {
                                    return;
                                }
                            }
                            Err(e) => warn!("dropping unparseable frame: {e}"),
                        }
                    }
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
            debug!("relay stream ended");
            let _ = event_tx.send(ChannelEvent::Closed).await;
        });

        Ok((Self { out_tx }, event_rx))
    }
}

#[async_trait]
impl SignalSender for SignalingChannel {
    async fn send(&self, msg: SignalMessage) {
        if self.out_tx.send(msg).is_err() {
            warn!("signaling channel closed, dropping frame");
        }
    }
}
