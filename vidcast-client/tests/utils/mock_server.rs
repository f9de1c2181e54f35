use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::Json;
use futures::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::{Mutex, mpsc};
use vidcast_core::{ClientConfig, SignalMessage, codec};

/// Frame received from the client on the signalling socket.
#[derive(Debug, Clone)]
pub struct InboundFrame {
    pub raw: String,
    pub message: SignalMessage,
}

struct MockState {
    videos: Mutex<Vec<String>>,
    uploads: Mutex<Vec<(String, usize)>>,
    list_hits: AtomicUsize,
    fail_uploads: AtomicBool,
    inbound_tx: mpsc::UnboundedSender<InboundFrame>,
    outbound_rx: Mutex<Option<mpsc::UnboundedReceiver<Message>>>,
}

/// In-process stand-in for the media server: catalog endpoints plus a
/// single-client signalling socket driven by the test.
pub struct MockServer {
    pub addr: SocketAddr,
    state: Arc<MockState>,
    outbound_tx: mpsc::UnboundedSender<Message>,
    pub inbound_rx: mpsc::UnboundedReceiver<InboundFrame>,
}

impl MockServer {
    pub async fn start(videos: &[&str]) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let state = Arc::new(MockState {
            videos: Mutex::new(videos.iter().map(|v| v.to_string()).collect()),
            uploads: Mutex::new(Vec::new()),
            list_hits: AtomicUsize::new(0),
            fail_uploads: AtomicBool::new(false),
            inbound_tx,
            outbound_rx: Mutex::new(Some(outbound_rx)),
        });

        let app = Router::new()
            .route("/video-list", get(video_list))
            .route("/delete", delete(delete_video))
            .route("/upload", post(upload))
            .route("/websocket", get(websocket))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("No local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            outbound_tx,
            inbound_rx,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Client config without STUN so tests stay on loopback.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::for_server(&self.url());
        config.ice_servers.clear();
        config
    }

    pub async fn videos(&self) -> Vec<String> {
        self.state.videos.lock().await.clone()
    }

    pub async fn uploads(&self) -> Vec<(String, usize)> {
        self.state.uploads.lock().await.clone()
    }

    pub fn list_hits(&self) -> usize {
        self.state.list_hits.load(Ordering::SeqCst)
    }

    pub fn fail_uploads(&self) {
        self.state.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn send_signal(&self, msg: &SignalMessage) {
        let text = codec::encode(msg).expect("Failed to encode signal");
        self.send_raw(text);
    }

    pub fn send_raw(&self, text: String) {
        let _ = self.outbound_tx.send(Message::Text(text.into()));
    }

    pub fn close_socket(&self) {
        let _ = self.outbound_tx.send(Message::Close(None));
    }
}

async fn video_list(State(state): State<Arc<MockState>>) -> Json<Vec<String>> {
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    Json(state.videos.lock().await.clone())
}

async fn delete_video(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    let Some(name) = params.get("video") else {
        return StatusCode::BAD_REQUEST;
    };

    let mut videos = state.videos.lock().await;
    let before = videos.len();
    videos.retain(|v| v != name);
    if videos.len() == before {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::OK
}

async fn upload(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> StatusCode {
    if state.fail_uploads.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("video") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            return StatusCode::BAD_REQUEST;
        };
        let Ok(data) = field.bytes().await else {
            return StatusCode::BAD_REQUEST;
        };

        state.uploads.lock().await.push((file_name.clone(), data.len()));
        state.videos.lock().await.push(file_name);
        return StatusCode::OK;
    }
    StatusCode::BAD_REQUEST
}

async fn websocket(ws: WebSocketUpgrade, State(state): State<Arc<MockState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<MockState>) {
    let Some(mut outbound_rx) = state.outbound_rx.lock().await.take() else {
        return;
    };
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sender.send(msg).await.is_err() || closing {
                break;
            }
        }
    });

    let inbound_tx = state.inbound_tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let raw = text.as_str().to_owned();
                    match codec::decode(&raw) {
                        Ok(message) => {
                            let _ = inbound_tx.send(InboundFrame { raw, message });
                        }
                        Err(e) => tracing::warn!("[MockServer] bad frame {}: {}", raw, e),
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };
}
