use crate::transport::transport_config::TransportConfig;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use vidcast_core::session::SessionEvent;
use vidcast_core::{IceCandidate, RemoteTrack, TrackId, TrackKind};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::RTCRtpTransceiver;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::track::track_remote::TrackRemote;

/// The session's single peer connection.
///
/// Callbacks never touch session state; they post [`SessionEvent`]s into
/// the channel drained by the session loop.
pub struct PeerTransport {
    peer_connection: Arc<RTCPeerConnection>,
}

impl PeerTransport {
    pub async fn new(config: TransportConfig, event_tx: mpsc::Sender<SessionEvent>) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if config.ice_servers.is_empty() {
            vec![]
        } else {
            vec![RTCIceServer {
                urls: config.ice_servers,
                ..Default::default()
            }]
        };

        let rtc_config = RTCConfiguration {
            ice_servers,
            ..Default::default()
        };

        let peer_connection = Arc::new(
            api.new_peer_connection(rtc_config)
                .await
                .context("Failed to create peer connection")?,
        );

        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                Box::pin(async move {
                    info!("Peer Connection State changed: {:?}", s);
                })
            },
        ));

        // A `None` candidate marks the end of gathering and is not forwarded.
        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();

            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                // Send fails only once the session loop is gone.
                let _ = tx
                    .send(SessionEvent::LocalCandidate(from_rtc_candidate(init)))
                    .await;
            })
        }));

        // Fires on the first RTP packet of each remote track, not on SDP.
        let track_tx = event_tx.clone();
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();

                Box::pin(async move {
                    let remote = RemoteTrack {
                        id: TrackId(track.id()),
                        kind: match track.kind() {
                            RTPCodecType::Audio => TrackKind::Audio,
                            _ => TrackKind::Video,
                        },
                        stream_id: track.stream_id(),
                    };
                    info!("Track arrived: {} ({:?})", remote.id, remote.kind);

                    let id = remote.id.clone();
                    if tx.send(SessionEvent::TrackArrived(remote)).await.is_err() {
                        return;
                    }

                    // Unread tracks stall the interceptors; keep reading.
                    tokio::spawn(drain_track(track, id, tx));
                })
            },
        ));

        Ok(Self { peer_connection })
    }

    /// Applies a remote offer and returns the SDP of the local answer.
    pub async fn apply_offer(&self, sdp: String) -> Result<String> {
        let offer = RTCSessionDescription::offer(sdp)?;
        self.peer_connection
            .set_remote_description(offer)
            .await
            .context("Failed to set remote description")?;

        let answer = self
            .peer_connection
            .create_answer(None)
            .await
            .context("Failed to create answer")?;
        self.peer_connection
            .set_local_description(answer.clone())
            .await
            .context("Failed to set local description")?;
        Ok(answer.sdp)
    }

    pub async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<()> {
        self.peer_connection
            .add_ice_candidate(to_rtc_candidate(candidate))
            .await
            .context("Failed to add ICE candidate")?;
        Ok(())
    }

    pub async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

/// Consumes RTP until the remote side drops the track.
async fn drain_track(track: Arc<TrackRemote>, id: TrackId, tx: mpsc::Sender<SessionEvent>) {
    let mut packets: u64 = 0;
    while track.read_rtp().await.is_ok() {
        packets += 1;
    }
    debug!("Track {} ended after {} packets", id, packets);

    if tx.send(SessionEvent::StreamTrackRemoved(id)).await.is_err() {
        warn!("Session gone before track removal could be reported");
    }
}

fn from_rtc_candidate(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_m_line_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}

fn to_rtc_candidate(candidate: IceCandidate) -> RTCIceCandidateInit {
    RTCIceCandidateInit {
        candidate: candidate.candidate,
        sdp_mid: candidate.sdp_mid,
        sdp_mline_index: candidate.sdp_m_line_index,
        username_fragment: candidate.username_fragment,
    }
}
