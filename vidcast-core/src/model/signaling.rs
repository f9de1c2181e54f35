use crate::model::track::TrackId;
use crate::model::video::VideoName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
    Pranswer,
    Rollback,
}

/// SDP description in the shape browsers and webrtc-rs serialise it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(
        rename = "sdpMLineIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

/// Event names carried in the `event` field of the wire envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SignalEvent {
    Offer,
    Answer,
    Candidate,
    Publish,
    Remove,
}

/// Raw frame exchanged over the signalling socket. `data` holds the
/// payload already encoded as a string; see [`crate::codec`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignalEnvelope {
    pub event: SignalEvent,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalMessage {
    Offer(SessionDescription),
    Answer(SessionDescription),
    Candidate(IceCandidate),
    Publish(VideoName),
    Remove(TrackId),
}

impl SignalMessage {
    pub fn event(&self) -> SignalEvent {
        match self {
            SignalMessage::Offer(_) => SignalEvent::Offer,
            SignalMessage::Answer(_) => SignalEvent::Answer,
            SignalMessage::Candidate(_) => SignalEvent::Candidate,
            SignalMessage::Publish(_) => SignalEvent::Publish,
            SignalMessage::Remove(_) => SignalEvent::Remove,
        }
    }
}
