//! Text codec for the signalling socket.
//!
//! Every frame is `{"event": ..., "data": ...}` where `data` is itself a
//! JSON document serialised into a string. `remove` is the exception: its
//! data is the bare track id.

use crate::error::CodecError;
use crate::model::{SignalEnvelope, SignalEvent, SignalMessage, TrackId, VideoName};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn encode(msg: &SignalMessage) -> Result<String, CodecError> {
    let event = msg.event();
    let data = match msg {
        SignalMessage::Offer(desc) | SignalMessage::Answer(desc) => encode_payload(event, desc)?,
        SignalMessage::Candidate(candidate) => encode_payload(event, candidate)?,
        SignalMessage::Publish(name) => encode_payload(event, name)?,
        SignalMessage::Remove(track_id) => track_id.0.clone(),
    };

    serde_json::to_string(&SignalEnvelope { event, data })
        .map_err(|source| CodecError::Encode { event, source })
}

pub fn decode(text: &str) -> Result<SignalMessage, CodecError> {
    let envelope: SignalEnvelope = serde_json::from_str(text).map_err(CodecError::Envelope)?;
    let SignalEnvelope { event, data } = envelope;

    let msg = match event {
        SignalEvent::Offer => SignalMessage::Offer(decode_payload(event, &data)?),
        SignalEvent::Answer => SignalMessage::Answer(decode_payload(event, &data)?),
        SignalEvent::Candidate => SignalMessage::Candidate(decode_payload(event, &data)?),
        SignalEvent::Publish => SignalMessage::Publish(decode_payload::<VideoName>(event, &data)?),
        SignalEvent::Remove => SignalMessage::Remove(TrackId(data)),
    };
    Ok(msg)
}

fn encode_payload<T: Serialize>(event: SignalEvent, payload: &T) -> Result<String, CodecError> {
    serde_json::to_string(payload).map_err(|source| CodecError::Encode { event, source })
}

fn decode_payload<T: DeserializeOwned>(event: SignalEvent, data: &str) -> Result<T, CodecError> {
    serde_json::from_str(data).map_err(|source| CodecError::Payload { event, source })
}
