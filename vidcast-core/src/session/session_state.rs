use crate::codec;
use crate::error::SessionError;
use crate::model::{
    IceCandidate, RemoteTrack, RenderedTrack, SessionDescription, SignalMessage, TrackId,
    TrackKind, VideoName,
};
use crate::session::session_command::SessionCommand;
use crate::session::session_event::SessionEvent;
use crate::session::track_registry::TrackRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Socket open, nothing negotiated yet.
    Idle,
    /// An offer is being applied by the driver.
    Negotiating,
    /// A remote description is in place; candidates apply directly.
    Stable,
    Closed,
}

/// Signalling and playback state of one page session.
///
/// Holds no sockets or peer handles; drivers run the returned commands.
#[derive(Debug)]
pub struct SessionState {
    phase: SessionPhase,
    remote_applied: bool,
    pending_candidates: Vec<IceCandidate>,
    tracks: TrackRegistry,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            remote_applied: false,
            pending_candidates: Vec::new(),
            tracks: TrackRegistry::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn tracks(&self) -> &TrackRegistry {
        &self.tracks
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending_candidates.len()
    }

    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionCommand>, SessionError> {
        match event {
            SessionEvent::Inbound(text) => self.on_inbound(&text),
            SessionEvent::OfferApplied { answer } => Ok(self.on_offer_applied(answer)),
            SessionEvent::OfferFailed => Ok(self.on_offer_failed()),
            SessionEvent::LocalCandidate(candidate) => Ok(self.on_local_candidate(candidate)),
            SessionEvent::TrackArrived(track) => Ok(self.on_track(track)),
            SessionEvent::TrackMuted(id) => Ok(self.on_mute(id)),
            SessionEvent::StreamTrackRemoved(id) => Ok(self.on_stream_track_removed(id)),
            SessionEvent::SocketClosed => Ok(self.on_socket_closed()),
            SessionEvent::Publish(name) => self.on_publish(name),
            SessionEvent::RemoveTrack(id) => Ok(self.on_remove_track(id)),
            SessionEvent::RenderFailed(id) => Ok(self.on_render_failed(id)),
        }
    }

    fn on_inbound(&mut self, text: &str) -> Result<Vec<SessionCommand>, SessionError> {
        let msg = codec::decode(text)?;

        if self.phase == SessionPhase::Closed {
            return Ok(Vec::new());
        }

        let commands = match msg {
            SignalMessage::Offer(offer) => self.on_offer(offer),
            SignalMessage::Candidate(candidate) => self.on_remote_candidate(candidate),
            // Only the server consumes these.
            SignalMessage::Answer(_) | SignalMessage::Publish(_) | SignalMessage::Remove(_) => {
                Vec::new()
            }
        };
        Ok(commands)
    }

    fn on_offer(&mut self, offer: SessionDescription) -> Vec<SessionCommand> {
        self.phase = SessionPhase::Negotiating;
        vec![SessionCommand::ApplyOffer(offer)]
    }

    fn on_remote_candidate(&mut self, candidate: IceCandidate) -> Vec<SessionCommand> {
        if self.phase == SessionPhase::Stable {
            return vec![SessionCommand::AddCandidate(candidate)];
        }
        self.pending_candidates.push(candidate);
        Vec::new()
    }

    fn on_offer_applied(&mut self, answer: SessionDescription) -> Vec<SessionCommand> {
        if self.phase != SessionPhase::Negotiating {
            return Vec::new();
        }
        self.phase = SessionPhase::Stable;
        self.remote_applied = true;

        let mut commands = vec![SessionCommand::Send(SignalMessage::Answer(answer))];
        commands.extend(
            self.pending_candidates
                .drain(..)
                .map(SessionCommand::AddCandidate),
        );
        commands
    }

    fn on_offer_failed(&mut self) -> Vec<SessionCommand> {
        if self.phase != SessionPhase::Negotiating {
            return Vec::new();
        }
        if !self.remote_applied {
            self.phase = SessionPhase::Idle;
            self.pending_candidates.clear();
            return Vec::new();
        }

        // The previous description is still in place and keeps its ICE
        // credentials, so candidates queued meanwhile still apply to it.
        self.phase = SessionPhase::Stable;
        self.pending_candidates
            .drain(..)
            .map(SessionCommand::AddCandidate)
            .collect()
    }

    fn on_local_candidate(&mut self, candidate: IceCandidate) -> Vec<SessionCommand> {
        if self.phase == SessionPhase::Closed {
            return Vec::new();
        }
        vec![SessionCommand::Send(SignalMessage::Candidate(candidate))]
    }

    fn on_track(&mut self, track: RemoteTrack) -> Vec<SessionCommand> {
        if track.kind == TrackKind::Audio {
            return Vec::new();
        }

        let rendered = RenderedTrack {
            id: track.id,
            stream_id: track.stream_id,
        };
        if !self.tracks.insert(rendered.clone()) {
            return Vec::new();
        }
        vec![SessionCommand::Attach(rendered)]
    }

    fn on_mute(&mut self, id: TrackId) -> Vec<SessionCommand> {
        if !self.tracks.contains(&id) {
            return Vec::new();
        }
        vec![SessionCommand::Replay(id)]
    }

    fn on_stream_track_removed(&mut self, id: TrackId) -> Vec<SessionCommand> {
        match self.tracks.remove(&id) {
            Some(_) => vec![SessionCommand::Detach(id)],
            None => Vec::new(),
        }
    }

    fn on_socket_closed(&mut self) -> Vec<SessionCommand> {
        if self.phase == SessionPhase::Closed {
            return Vec::new();
        }
        self.phase = SessionPhase::Closed;
        self.pending_candidates.clear();
        vec![SessionCommand::NotifyClosed]
    }

    fn on_publish(&mut self, name: VideoName) -> Result<Vec<SessionCommand>, SessionError> {
        if self.phase == SessionPhase::Closed {
            return Err(SessionError::Closed);
        }
        Ok(vec![SessionCommand::Send(SignalMessage::Publish(name))])
    }

    /// Detaches the element even after close; only the `remove` frame is
    /// skipped then.
    fn on_remove_track(&mut self, id: TrackId) -> Vec<SessionCommand> {
        let mut commands = Vec::with_capacity(2);
        if self.tracks.remove(&id).is_some() {
            commands.push(SessionCommand::Detach(id.clone()));
        }
        if self.phase != SessionPhase::Closed {
            commands.push(SessionCommand::Send(SignalMessage::Remove(id)));
        }
        commands
    }

    fn on_render_failed(&mut self, id: TrackId) -> Vec<SessionCommand> {
        self.tracks.remove(&id);
        Vec::new()
    }
}
