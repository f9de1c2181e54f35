use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};
use vidcast_core::session::SessionEvent;

/// The session's single signalling WebSocket.
///
/// A writer task drains an unbounded channel into the socket; a reader task
/// turns text frames into [`SessionEvent::Inbound`] and reports the close.
pub struct SignalingSocket {
    outbound: mpsc::UnboundedSender<Message>,
    send_task: JoinHandle<()>,
    recv_task: JoinHandle<()>,
}

impl SignalingSocket {
    pub async fn connect(url: &str, event_tx: mpsc::Sender<SessionEvent>) -> Result<Self> {
        let (ws_stream, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;
        info!("Signalling socket open: {}", url);

        let (mut sender, mut receiver) = ws_stream.split();
        let (outbound, mut rx) = mpsc::unbounded_channel::<Message>();

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let closing = matches!(msg, Message::Close(_));
                if let Err(e) = sender.send(msg).await {
                    warn!("Failed to write to signalling socket: {}", e);
                    break;
                }
                if closing {
                    break;
                }
            }
        });

        let recv_task = tokio::spawn(async move {
            while let Some(frame) = receiver.next().await {
                match frame {
                    Ok(Message::Text(text)) => {
                        debug!("WS IN: {}", text.as_str());
                        let event = SessionEvent::Inbound(text.as_str().to_owned());
                        if event_tx.send(event).await.is_err() {
                            return;
                        }
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        error!("ERROR: {}", e);
                        break;
                    }
                }
            }

            info!("Signalling socket closed");
            let _ = event_tx.send(SessionEvent::SocketClosed).await;
        });

        Ok(Self {
            outbound,
            send_task,
            recv_task,
        })
    }

    pub fn send_text(&self, text: String) -> Result<()> {
        self.outbound
            .send(Message::Text(text.into()))
            .context("Signalling writer has stopped")
    }

    pub async fn close(self) {
        let _ = self.outbound.send(Message::Close(None));
        let _ = self.send_task.await;
        self.recv_task.abort();
    }
}
