mod service;
mod ws;

pub use service::{ConnId, RelayService};
pub use ws::{WsQuery, ws_handler};

use axum::Router;
use axum::routing::get;

/// The relay's whole HTTP surface: one websocket endpoint.
pub fn app(service: RelayService) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(service)
}
