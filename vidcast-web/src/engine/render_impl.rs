use std::cell::RefCell;
use std::rc::Rc;

use vidcast_core::session::SessionEvent;
use vidcast_core::{RenderedTrack, TrackId};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use crate::engine::{Engine, EngineInner, RenderedVideo};
use crate::logger::Logger;

const REMOTE_VIDEOS_ID: &str = "remoteVideos";
const TRACK_ID_ATTR: &str = "data-track-id";
const CLOSED_NOTICE: &str = "WebSocket has closed";

impl Engine {
    /// Returns `RenderFailed` when no element could be created, so the id
    /// can be rendered again by a later track event.
    pub(super) fn attach(
        inner: &Rc<RefCell<EngineInner>>,
        track: &RenderedTrack,
    ) -> Option<SessionEvent> {
        let Some(stream) = inner.borrow_mut().streams.remove(&track.id) else {
            Logger::warn(&format!("No stream for track {}", track.id));
            return Some(SessionEvent::RenderFailed(track.id.clone()));
        };

        match Self::render_video(inner, track, &stream) {
            Ok(Some(rendered)) => {
                inner
                    .borrow_mut()
                    .rendered
                    .insert(track.id.clone(), rendered);
                None
            }
            Ok(None) => {
                Logger::warn(&format!("#{} not found", REMOTE_VIDEOS_ID));
                Some(SessionEvent::RenderFailed(track.id.clone()))
            }
            Err(e) => {
                Logger::error(&e);
                Some(SessionEvent::RenderFailed(track.id.clone()))
            }
        }
    }

    fn render_video(
        inner: &Rc<RefCell<EngineInner>>,
        track: &RenderedTrack,
        stream: &web_sys::MediaStream,
    ) -> Result<Option<RenderedVideo>, JsValue> {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return Ok(None);
        };
        let Some(target) = document.get_element_by_id(REMOTE_VIDEOS_ID) else {
            return Ok(None);
        };

        let video: web_sys::HtmlVideoElement = document.create_element("video")?.dyn_into()?;
        video.set_src_object(Some(stream));
        video.set_autoplay(true);
        video.set_controls(true);
        video.set_attribute(TRACK_ID_ATTR, track.id.as_str())?;

        let remove_button: web_sys::HtmlElement = document.create_element("button")?.dyn_into()?;
        remove_button.set_text_content(Some("Remove"));
        let onclick = {
            let inner = inner.clone();
            let id = track.id.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Self::post(&inner, SessionEvent::RemoveTrack(id.clone()));
            }))
        };
        remove_button.set_onclick(Some(onclick.as_ref().unchecked_ref()));
        onclick.forget();

        let container = document.create_element("div")?;
        container.append_child(&video)?;
        container.append_child(&remove_button)?;
        target.append_child(&container)?;

        Ok(Some(RenderedVideo { container, video }))
    }

    pub(super) fn detach(inner: &Rc<RefCell<EngineInner>>, id: &TrackId) {
        let mut inner = inner.borrow_mut();
        inner.streams.remove(id);
        if let Some(rendered) = inner.rendered.remove(id) {
            rendered.container.remove();
        }
    }

    pub(super) fn replay(inner: &Rc<RefCell<EngineInner>>, id: &TrackId) {
        let video = match inner.borrow().rendered.get(id) {
            Some(rendered) => rendered.video.clone(),
            None => return,
        };

        match video.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    Logger::error(&e);
                }
            }),
            Err(e) => Logger::error(&e),
        }
    }

    pub(super) fn notify_closed() {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.alert_with_message(CLOSED_NOTICE) {
                Logger::error(&e);
            }
        }
    }
}
