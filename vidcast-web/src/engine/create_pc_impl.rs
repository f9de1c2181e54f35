use std::cell::RefCell;
use std::rc::Rc;

use vidcast_core::session::SessionEvent;
use vidcast_core::{IceCandidate, RemoteTrack, TrackId, TrackKind};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::prelude::*;

use crate::engine::{Engine, EngineInner};
use crate::logger::Logger;

impl Engine {
    pub(super) fn create_pc(
        inner: &Rc<RefCell<EngineInner>>,
        ice_servers: &[String],
    ) -> Result<web_sys::RtcPeerConnection, JsValue> {
        let rtc_config = web_sys::RtcConfiguration::new();
        let ice_servers_arr = js_sys::Array::new();

        if !ice_servers.is_empty() {
            let urls = js_sys::Array::new();
            for url in ice_servers {
                urls.push(&JsValue::from_str(url));
            }
            let rtc_ice_server = web_sys::RtcIceServer::new();
            rtc_ice_server.set_urls(&urls);
            ice_servers_arr.push(&rtc_ice_server);
        }
        rtc_config.set_ice_servers(&ice_servers_arr);

        let pc = web_sys::RtcPeerConnection::new_with_configuration(&rtc_config)?;

        let inner_clone = inner.clone();
        let onice = Closure::wrap(Box::new(move |ev: web_sys::RtcPeerConnectionIceEvent| {
            let Some(candidate) = ev.candidate() else {
                return;
            };
            // Empty candidate string marks end of gathering.
            if candidate.candidate().is_empty() {
                return;
            }
            let candidate = IceCandidate {
                candidate: candidate.candidate(),
                sdp_mid: candidate.sdp_mid(),
                sdp_m_line_index: candidate.sdp_m_line_index(),
                username_fragment: None,
            };
            Self::post(&inner_clone, SessionEvent::LocalCandidate(candidate));
        })
            as Box<dyn FnMut(web_sys::RtcPeerConnectionIceEvent)>);
        pc.set_onicecandidate(Some(onice.as_ref().unchecked_ref()));
        onice.forget();

        let inner_clone = inner.clone();
        let ontrack = Closure::wrap(Box::new(move |ev: web_sys::RtcTrackEvent| {
            Self::on_track(&inner_clone, ev);
        }) as Box<dyn FnMut(web_sys::RtcTrackEvent)>);
        pc.set_ontrack(Some(ontrack.as_ref().unchecked_ref()));
        ontrack.forget();

        Ok(pc)
    }

    fn on_track(inner: &Rc<RefCell<EngineInner>>, ev: web_sys::RtcTrackEvent) {
        let track = ev.track();
        let id = TrackId::from(track.id());

        let kind = match track.kind().as_str() {
            "video" => TrackKind::Video,
            "audio" => TrackKind::Audio,
            other => {
                Logger::warn(&format!("Ignoring track of kind {}", other));
                return;
            }
        };

        let Some(stream) = ev
            .streams()
            .get(0)
            .dyn_into::<web_sys::MediaStream>()
            .ok()
        else {
            Logger::warn(&format!("Track {} arrived without a stream", id));
            return;
        };

        if kind == TrackKind::Video {
            let onmute = {
                let inner = inner.clone();
                let id = id.clone();
                Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                    Self::post(&inner, SessionEvent::TrackMuted(id.clone()));
                }))
            };
            track.set_onmute(Some(onmute.as_ref().unchecked_ref()));
            onmute.forget();

            let onremovetrack = {
                let inner = inner.clone();
                Closure::<dyn FnMut(web_sys::MediaStreamTrackEvent)>::wrap(Box::new(
                    move |ev: web_sys::MediaStreamTrackEvent| {
                        let id = TrackId::from(ev.track().id());
                        Self::post(&inner, SessionEvent::StreamTrackRemoved(id));
                    },
                ))
            };
            stream.set_onremovetrack(Some(onremovetrack.as_ref().unchecked_ref()));
            onremovetrack.forget();

            inner.borrow_mut().streams.insert(id.clone(), stream.clone());
        }

        Logger::info(&format!("Track arrived: {} ({:?})", id, kind));
        Self::post(
            inner,
            SessionEvent::TrackArrived(RemoteTrack {
                id,
                kind,
                stream_id: stream.id(),
            }),
        );
    }
}
