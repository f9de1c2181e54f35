use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use vidcast_core::session::{SessionCommand, SessionEvent};
use vidcast_core::{IceCandidate, SessionDescription, codec};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::engine::{Engine, EngineInner};
use crate::logger::Logger;

impl Engine {
    /// Runs the event and every follow-up event its commands produce.
    pub(super) async fn process(inner: &Rc<RefCell<EngineInner>>, event: SessionEvent) {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let arrived = match &event {
                SessionEvent::TrackArrived(track) => Some(track.id.clone()),
                _ => None,
            };

            let res = inner.borrow_mut().state.handle(event);
            let commands = match res {
                Ok(commands) => commands,
                Err(e) => {
                    Logger::warn(&format!("Event dropped: {}", e));
                    continue;
                }
            };

            // Audio, duplicate or post-close tracks are refused; their
            // stream will never be attached.
            if let Some(id) = arrived {
                let accepted = commands
                    .iter()
                    .any(|cmd| matches!(cmd, SessionCommand::Attach(t) if t.id == id));
                if !accepted {
                    inner.borrow_mut().streams.remove(&id);
                }
            }

            for cmd in commands {
                if let Some(next) = Self::execute(inner, cmd).await {
                    queue.push_back(next);
                }
            }
        }
    }

    async fn execute(inner: &Rc<RefCell<EngineInner>>, cmd: SessionCommand) -> Option<SessionEvent> {
        match cmd {
            SessionCommand::Send(msg) => {
                match codec::encode(&msg) {
                    Ok(frame) => Self::send_frame(inner, frame),
                    Err(e) => Logger::warn(&e.to_string()),
                }
                None
            }

            SessionCommand::ApplyOffer(offer) => match Self::apply_offer(inner, offer.sdp).await {
                Ok(answer_sdp) => {
                    Logger::info("Sending ANSWER to server...");
                    Some(SessionEvent::OfferApplied {
                        answer: SessionDescription::answer(answer_sdp),
                    })
                }
                Err(e) => {
                    Logger::error(&e);
                    Some(SessionEvent::OfferFailed)
                }
            },

            SessionCommand::AddCandidate(candidate) => {
                if let Err(e) = Self::add_candidate(inner, candidate).await {
                    Logger::warn(&format!("Error adding ICE: {:?}", e));
                }
                None
            }

            SessionCommand::Attach(track) => Self::attach(inner, &track),

            SessionCommand::Detach(id) => {
                Self::detach(inner, &id);
                None
            }

            SessionCommand::Replay(id) => {
                Self::replay(inner, &id);
                None
            }

            SessionCommand::NotifyClosed => {
                Self::notify_closed();
                None
            }
        }
    }

    async fn apply_offer(
        inner: &Rc<RefCell<EngineInner>>,
        remote_sdp: String,
    ) -> Result<String, JsValue> {
        let pc = inner
            .borrow()
            .pc
            .clone()
            .ok_or_else(|| JsValue::from_str("No peer connection"))?;

        let desc_init = web_sys::RtcSessionDescriptionInit::new(web_sys::RtcSdpType::Offer);
        desc_init.set_sdp(&remote_sdp);
        JsFuture::from(pc.set_remote_description(&desc_init)).await?;

        let answer = JsFuture::from(pc.create_answer()).await?;
        let answer_sdp = js_sys::Reflect::get(&answer, &"sdp".into())?
            .as_string()
            .ok_or_else(|| JsValue::from_str("Answer has no SDP"))?;

        let answer_init = web_sys::RtcSessionDescriptionInit::new(web_sys::RtcSdpType::Answer);
        answer_init.set_sdp(&answer_sdp);
        JsFuture::from(pc.set_local_description(&answer_init)).await?;

        Ok(answer_sdp)
    }

    async fn add_candidate(
        inner: &Rc<RefCell<EngineInner>>,
        candidate: IceCandidate,
    ) -> Result<(), JsValue> {
        let Some(pc) = inner.borrow().pc.clone() else {
            return Ok(());
        };

        let init = web_sys::RtcIceCandidateInit::new(&candidate.candidate);
        if let Some(mid) = &candidate.sdp_mid {
            init.set_sdp_mid(Some(mid));
        }
        if let Some(idx) = candidate.sdp_m_line_index {
            init.set_sdp_m_line_index(Some(idx));
        }

        Logger::info(&format!("Adding ICE: {}", candidate.candidate));
        JsFuture::from(pc.add_ice_candidate_with_opt_rtc_ice_candidate_init(Some(&init))).await?;
        Ok(())
    }
}
