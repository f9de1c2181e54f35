use futures::StreamExt;
use futures::channel::mpsc;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use vidcast_core::session::{SessionEvent, SessionState};
use vidcast_core::{TrackId, VideoName};
use wasm_bindgen::prelude::*;

use crate::logger::Logger;

mod create_pc_impl;
mod execute_impl;
mod render_impl;
mod ws_setup_impl;

#[derive(Clone)]
pub struct EngineConfig {
    pub signaling_url: String,
    pub ice_servers: Vec<String>,
}

/// Element rendered for one remote video track.
struct RenderedVideo {
    container: web_sys::Element,
    video: web_sys::HtmlVideoElement,
}

struct EngineInner {
    state: SessionState,
    ws: Option<web_sys::WebSocket>,
    pc: Option<web_sys::RtcPeerConnection>,
    /// Queue feeding the single event loop; `None` once disposed.
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
    /// Frames produced before the socket opened.
    outbox: Vec<String>,
    /// Streams of tracks that arrived but are not rendered yet.
    streams: HashMap<TrackId, web_sys::MediaStream>,
    rendered: HashMap<TrackId, RenderedVideo>,
}

/// Browser driver of a [`SessionState`]: one WebSocket, one peer
/// connection, one ordered event queue.
#[derive(Clone)]
pub struct Engine {
    inner: Rc<RefCell<EngineInner>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, JsValue> {
        let (events_tx, events_rx) = mpsc::unbounded();

        let inner = Rc::new(RefCell::new(EngineInner {
            state: SessionState::new(),
            ws: None,
            pc: None,
            events: Some(events_tx),
            outbox: Vec::new(),
            streams: HashMap::new(),
            rendered: HashMap::new(),
        }));

        let pc = Self::create_pc(&inner, &config.ice_servers)?;
        inner.borrow_mut().pc = Some(pc);
        Self::ws_setup(&inner, &config.signaling_url)?;

        let loop_inner = inner.clone();
        wasm_bindgen_futures::spawn_local(Self::run(loop_inner, events_rx));

        Ok(Engine { inner })
    }

    pub fn start_video_stream(&self, name: VideoName) {
        Logger::info(&format!("Selected video: {}", name));
        Self::post(&self.inner, SessionEvent::Publish(name));
    }

    pub fn remove_video_by_track_id(&self, id: TrackId) {
        Self::post(&self.inner, SessionEvent::RemoveTrack(id));
    }

    /// Closes the socket and peer connection without the close alert.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.events = None;
        inner.outbox.clear();
        inner.streams.clear();

        if let Some(ws) = inner.ws.take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onclose(None);
            ws.set_onerror(None);
            if let Err(e) = ws.close() {
                Logger::error(&e);
            }
        }
        if let Some(pc) = inner.pc.take() {
            pc.set_ontrack(None);
            pc.set_onicecandidate(None);
            pc.close();
        }
        for (_, rendered) in inner.rendered.drain() {
            rendered.container.remove();
        }
        Logger::info("Session disposed");
    }

    fn post(inner: &Rc<RefCell<EngineInner>>, event: SessionEvent) {
        match &inner.borrow().events {
            Some(tx) => {
                if tx.unbounded_send(event).is_err() {
                    Logger::warn("Event loop is gone");
                }
            }
            None => Logger::warn("Session is disposed; event dropped"),
        }
    }

    /// Handles events strictly one at a time, in arrival order.
    async fn run(
        inner: Rc<RefCell<EngineInner>>,
        mut events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        while let Some(event) = events_rx.next().await {
            Self::process(&inner, event).await;
        }
        Logger::info("Event loop finished");
    }
}
