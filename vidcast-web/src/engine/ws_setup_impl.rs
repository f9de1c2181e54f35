use std::cell::RefCell;
use std::rc::Rc;
use vidcast_core::session::SessionEvent;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsValue, prelude::Closure};
use web_sys::WebSocket;

use crate::engine::{Engine, EngineInner};
use crate::logger::Logger;

impl Engine {
    pub(super) fn ws_setup(
        inner: &Rc<RefCell<EngineInner>>,
        url: &str,
    ) -> Result<(), JsValue> {
        let ws: WebSocket = web_sys::WebSocket::new(url)?;

        let onopen_callback = {
            let inner = inner.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Logger::info("WS Open");
                Self::flush_outbox(&inner);
            }))
        };
        ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
        onopen_callback.forget();

        let onmessage_callback = {
            let inner = inner.clone();
            Closure::<dyn FnMut(web_sys::MessageEvent)>::wrap(Box::new(
                move |e: web_sys::MessageEvent| {
                    if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
                        let text: String = text.into();
                        Logger::debug(&format!("WS IN: {}", text));
                        Self::post(&inner, SessionEvent::Inbound(text));
                    }
                },
            ))
        };
        ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
        onmessage_callback.forget();

        let onclose_callback = {
            let inner = inner.clone();
            Closure::<dyn FnMut(JsValue)>::wrap(Box::new(move |_| {
                Logger::warn("WS Closed");
                Self::post(&inner, SessionEvent::SocketClosed);
            }))
        };
        ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
        onclose_callback.forget();

        let onerror_callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(
            move |e: web_sys::Event| {
                Logger::warn(&format!("ERROR: {}", e.type_()));
            },
        ));
        ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
        onerror_callback.forget();

        inner.borrow_mut().ws = Some(ws);
        Ok(())
    }

    /// Sends a frame now if the socket is open, otherwise buffers it.
    pub(super) fn send_frame(inner: &Rc<RefCell<EngineInner>>, frame: String) {
        let mut inner = inner.borrow_mut();
        let Some(ws) = inner.ws.clone() else {
            Logger::warn("No signalling socket; frame dropped");
            return;
        };

        match ws.ready_state() {
            WebSocket::OPEN => {
                if let Err(e) = ws.send_with_str(&frame) {
                    Logger::error(&e);
                }
            }
            WebSocket::CONNECTING => inner.outbox.push(frame),
            _ => Logger::warn("Signalling socket is closed; frame dropped"),
        }
    }

    fn flush_outbox(inner: &Rc<RefCell<EngineInner>>) {
        let (ws, frames) = {
            let mut inner = inner.borrow_mut();
            let frames: Vec<String> = inner.outbox.drain(..).collect();
            (inner.ws.clone(), frames)
        };

        if let Some(ws) = ws {
            for frame in frames {
                if let Err(e) = ws.send_with_str(&frame) {
                    Logger::warn(&format!("Failed to send buffered frame: {:?}", e));
                }
            }
        }
    }
}
