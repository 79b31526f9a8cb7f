use crate::media::MediaBinder;
use crate::negotiation::{EngineEvent, NegotiationManager, StartOptions, build_peer_connection};
use crate::router::{RenderSink, TrackRouter};
use crate::signaling::{ChannelEvent, SignalingChannel};
use jamlink_core::{MediaTrackRole, NegotiationState, RoomId, SessionError, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The two user intents.
#[derive(Debug)]
pub enum SessionCommand {
    Start(StartOptions),
    Leave,
}

/// Everything the embedding UI needs to observe.
#[derive(Debug)]
pub enum SessionEvent {
    StateChanged(NegotiationState),
    PeerJoined,
    PeerLeft,
    RemoteTrack(MediaTrackRole),
    Error(SessionError),
    /// Signaling transport gone. The session loop has ended; rejoining means
    /// connecting a fresh session.
    Disconnected,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub relay_url: String,
    pub room: RoomId,
    pub ice_servers: Vec<String>,
}

/// Cloneable command side of a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub async fn start(&self, opts: StartOptions) {
        let _ = self.command_tx.send(SessionCommand::Start(opts)).await;
    }

    pub async fn leave(&self) {
        let _ = self.command_tx.send(SessionCommand::Leave).await;
    }
}

/// One session = one relay connection + one peer connection, owned by a
/// single event-loop task. Commands, inbound signaling frames and engine
/// callbacks are all funneled through that loop in arrival order, so no two
/// handlers ever run concurrently.
pub struct Session {
    manager: NegotiationManager,
    router: TrackRouter,
    command_rx: mpsc::Receiver<SessionCommand>,
    channel_rx: mpsc::Receiver<ChannelEvent>,
    engine_rx: mpsc::Receiver<EngineEvent>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    last_state: NegotiationState,
}

impl Session {
    /// Joins the room and spawns the session loop. Fails with
    /// `SessionError::Connection` when the relay is unreachable, leaving
    /// nothing behind.
    pub async fn connect(
        config: SessionConfig,
        binder: Arc<dyn MediaBinder>,
        sink: Arc<dyn RenderSink>,
    ) -> Result<(SessionHandle, mpsc::UnboundedReceiver<SessionEvent>), SessionError> {
        let (channel, channel_rx) =
            SignalingChannel::connect(&config.relay_url, config.room).await?;

        let (engine_tx, engine_rx) = mpsc::channel(256);
        let pc = build_peer_connection(config.ice_servers, engine_tx).await?;

        let mut manager = NegotiationManager::new(pc, Arc::new(channel), binder);
        manager.mark_joined();

        let (command_tx, command_rx) = mpsc::channel(16);
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let session = Session {
            manager,
            router: TrackRouter::new(sink),
            command_rx,
            channel_rx,
            engine_rx,
            event_tx,
            last_state: NegotiationState::Idle,
        };
        tokio::spawn(session.run());

        Ok((SessionHandle { command_tx }, event_rx))
    }

    async fn run(mut self) {
        info!("session loop started");
        self.emit_state();

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(SessionCommand::Start(opts)) => {
                        if let Err(e) = self.manager.start(opts).await {
                            warn!("start failed: {e}");
                            let _ = self.event_tx.send(SessionEvent::Error(e));
                        }
                        self.emit_state();
                    }
                    Some(SessionCommand::Leave) | None => {
                        self.manager.close().await;
                        self.emit_state();
                        break;
                    }
                },

                evt = self.channel_rx.recv() => match evt {
                    Some(ChannelEvent::Message(msg)) => self.handle_frame(msg).await,
                    Some(ChannelEvent::Closed) | None => {
                        info!("signaling transport closed, ending session loop");
                        let _ = self.event_tx.send(SessionEvent::Error(SessionError::Transport));
                        let _ = self.event_tx.send(SessionEvent::Disconnected);
                        break;
                    }
                },

                evt = self.engine_rx.recv() => match evt {
                    Some(EngineEvent::LocalCandidate(candidate)) => {
                        self.manager.send_candidate(candidate).await;
                    }
                    Some(EngineEvent::RemoteTrack(track)) => {
                        if let Some(role) = self.router.route(track) {
                            let _ = self.event_tx.send(SessionEvent::RemoteTrack(role));
                        }
                    }
                    Some(EngineEvent::ConnectionState(state)) => {
                        debug!("transport state: {state}");
                    }
                    None => break,
                },
            }
        }

        info!("session loop finished");
    }

    async fn handle_frame(&mut self, msg: SignalMessage) {
        match msg {
            SignalMessage::PeerJoined => {
                let _ = self.event_tx.send(SessionEvent::PeerJoined);
                self.manager.handle_peer_joined().await;
                self.emit_state();
            }
            SignalMessage::PeerLeft => {
                self.router.clear();
                self.manager.handle_peer_left();
                let _ = self.event_tx.send(SessionEvent::PeerLeft);
                self.emit_state();
            }
            SignalMessage::Signal { data } => {
                self.manager.handle_signal(data).await;
                self.emit_state();
            }
            SignalMessage::Join { room } => {
                debug!("unexpected join frame for room {room} from relay");
            }
        }
    }

    fn emit_state(&mut self) {
        let state = self.manager.state();
        if state != self.last_state {
            self.last_state = state;
            let _ = self.event_tx.send(SessionEvent::StateChanged(state));
        }
    }
}
