use crate::playback::track_sink::TrackSink;
use crate::signaling::SignalingSocket;
use crate::transport::{PeerTransport, TransportConfig};
use anyhow::Result;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use vidcast_core::session::{SessionCommand, SessionEvent, SessionPhase, SessionState};
use vidcast_core::{ClientConfig, SessionDescription, SessionError, TrackId, VideoName, codec};

struct UserRequest {
    event: SessionEvent,
    reply: oneshot::Sender<Result<(), SessionError>>,
}

/// One signalling socket plus one peer connection, owned by a single task.
///
/// Created with [`PlaybackSession::init`], torn down with
/// [`PlaybackSession::dispose`].
pub struct PlaybackSession {
    request_tx: mpsc::Sender<UserRequest>,
    phase_rx: watch::Receiver<SessionPhase>,
    task: JoinHandle<()>,
}

impl PlaybackSession {
    pub async fn init(config: &ClientConfig, sink: Arc<dyn TrackSink>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (request_tx, request_rx) = mpsc::channel(32);
        let (phase_tx, phase_rx) = watch::channel(SessionPhase::Idle);

        let transport = PeerTransport::new(TransportConfig::from(config), event_tx.clone()).await?;
        let socket = match SignalingSocket::connect(&config.signaling_url, event_tx).await {
            Ok(socket) => socket,
            Err(e) => {
                let _ = transport.close().await;
                return Err(e);
            }
        };

        let session_loop = SessionLoop {
            state: SessionState::new(),
            socket,
            transport,
            sink,
            request_rx,
            event_rx,
            phase_tx,
        };
        let task = tokio::spawn(session_loop.run());

        Ok(Self {
            request_tx,
            phase_rx,
            task,
        })
    }

    pub async fn start_video_stream(&self, name: VideoName) -> Result<(), SessionError> {
        info!("Selected video: {}", name);
        self.request(SessionEvent::Publish(name)).await
    }

    pub async fn remove_video_by_track_id(&self, id: TrackId) -> Result<(), SessionError> {
        self.request(SessionEvent::RemoveTrack(id)).await
    }

    pub fn phase(&self) -> SessionPhase {
        *self.phase_rx.borrow()
    }

    /// Resolves once the signalling socket has closed (or the session ended).
    pub async fn wait_closed(&mut self) {
        let _ = self
            .phase_rx
            .wait_for(|phase| *phase == SessionPhase::Closed)
            .await;
    }

    pub async fn dispose(self) {
        drop(self.request_tx);
        if let Err(e) = self.task.await {
            error!("Session task failed: {}", e);
        }
    }

    async fn request(&self, event: SessionEvent) -> Result<(), SessionError> {
        let (reply, rx) = oneshot::channel();
        self.request_tx
            .send(UserRequest { event, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.unwrap_or(Err(SessionError::Closed))
    }
}

struct SessionLoop {
    state: SessionState,
    socket: SignalingSocket,
    transport: PeerTransport,
    sink: Arc<dyn TrackSink>,
    request_rx: mpsc::Receiver<UserRequest>,
    event_rx: mpsc::Receiver<SessionEvent>,
    phase_tx: watch::Sender<SessionPhase>,
}

impl SessionLoop {
    async fn run(mut self) {
        info!("Session event loop started");

        loop {
            tokio::select! {
                req = self.request_rx.recv() => {
                    match req {
                        Some(UserRequest { event, reply }) => {
                            let res = self.process(event).await;
                            if let Err(e) = &res {
                                warn!("Request dropped: {}", e);
                            }
                            let _ = reply.send(res);
                        }
                        None => {
                            info!("Session disposed. Shutting down.");
                            break;
                        }
                    }
                }

                evt = self.event_rx.recv() => {
                    match evt {
                        Some(e) => {
                            if let Err(e) = self.process(e).await {
                                warn!("Signal dropped: {}", e);
                            }
                        }
                        None => {
                            warn!("Event channel closed unexpectedly");
                            break;
                        }
                    }
                }
            }
        }

        if let Err(e) = self.transport.close().await {
            warn!("Failed to close peer connection: {:?}", e);
        }
        self.socket.close().await;
        info!("Session event loop finished");
    }

    /// Runs the event and every follow-up event its commands produce.
    async fn process(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let commands = self.state.handle(event)?;
            for cmd in commands {
                if let Some(next) = self.execute(cmd).await {
                    queue.push_back(next);
                }
            }
        }

        self.phase_tx.send_replace(self.state.phase());
        Ok(())
    }

    async fn execute(&mut self, cmd: SessionCommand) -> Option<SessionEvent> {
        match cmd {
            SessionCommand::Send(msg) => {
                match codec::encode(&msg) {
                    Ok(text) => {
                        if let Err(e) = self.socket.send_text(text) {
                            error!("Failed to send {:?}: {:?}", msg.event(), e);
                        }
                    }
                    Err(e) => error!("{}", e),
                }
                None
            }

            SessionCommand::ApplyOffer(offer) => match self.transport.apply_offer(offer.sdp).await {
                Ok(answer_sdp) => {
                    info!("Sending ANSWER to server...");
                    Some(SessionEvent::OfferApplied {
                        answer: SessionDescription::answer(answer_sdp),
                    })
                }
                Err(e) => {
                    error!("Failed to answer offer: {:?}", e);
                    Some(SessionEvent::OfferFailed)
                }
            },

            SessionCommand::AddCandidate(candidate) => {
                if let Err(e) = self.transport.add_ice_candidate(candidate).await {
                    warn!("Error adding ICE: {:?}", e);
                }
                None
            }

            SessionCommand::Attach(track) => {
                self.sink.attach(&track);
                None
            }

            SessionCommand::Detach(id) => {
                self.sink.detach(&id);
                None
            }

            SessionCommand::Replay(id) => {
                self.sink.replay(&id);
                None
            }

            SessionCommand::NotifyClosed => {
                self.sink.closed();
                None
            }
        }
    }
}
