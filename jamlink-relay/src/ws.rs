use crate::service::RelayService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The room may arrive as a query parameter or in the first `join` frame;
/// browser clients have done both.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub room: Option<String>,
}

/// Minimal envelope view of an inbound frame. Payload contents stay opaque.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    room: Option<String>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    State(service): State<RelayService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, query.room, service))
}

async fn handle_socket(socket: WebSocket, query_room: Option<String>, service: RelayService) {
    let conn = Uuid::new_v4();
    info!("new relay connection: {conn}");

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut room = query_room;
    if let Some(room) = &room {
        service.join(room, conn, tx.clone());
    }

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                let envelope: Envelope = match serde_json::from_str(text.as_str()) {
                    Ok(envelope) => envelope,
                    Err(e) => {
                        warn!("dropping unparseable frame from {conn}: {e}");
                        continue;
                    }
                };
                match envelope.kind.as_str() {
                    "join" => match (&room, envelope.room) {
                        (Some(_), _) => debug!("{conn} already joined, ignoring join frame"),
                        (None, Some(requested)) => {
                            service.join(&requested, conn, tx.clone());
                            room = Some(requested);
                        }
                        (None, None) => warn!("join frame without a room from {conn}"),
                    },
                    "signal" => match &room {
                        Some(room) => service.forward(room, conn, text.as_str()),
                        None => warn!("signal frame before join from {conn}"),
                    },
                    other => debug!("ignoring '{other}' frame from {conn}"),
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    if let Some(room) = &room {
        service.leave(room, conn);
    }
    info!("relay connection closed: {conn}");
}
