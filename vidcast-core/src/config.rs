use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";
pub const SIGNALING_PATH: &str = "/websocket";

pub const ENV_SERVER_URL: &str = "VIDCAST_SERVER_URL";
pub const ENV_SIGNALING_URL: &str = "VIDCAST_SIGNALING_URL";
pub const ENV_ICE_SERVERS: &str = "VIDCAST_ICE_SERVERS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the catalog endpoints.
    pub server_url: String,
    /// WebSocket URL of the signalling endpoint.
    pub signaling_url: String,
    /// STUN/TURN URLs handed to the peer connection.
    pub ice_servers: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_server(DEFAULT_SERVER_URL)
    }
}

impl ClientConfig {
    /// Config pointing both catalog and signalling at one server.
    pub fn for_server(server_url: &str) -> Self {
        let server_url = server_url.trim_end_matches('/').to_owned();
        Self {
            signaling_url: signaling_url_for(&server_url),
            server_url,
            ice_servers: vec![DEFAULT_STUN_ADDR.to_owned()],
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = match get(ENV_SERVER_URL) {
            Some(url) => Self::for_server(url.trim()),
            None => Self::default(),
        };

        if let Some(url) = get(ENV_SIGNALING_URL) {
            config.signaling_url = url.trim().to_owned();
        }

        if let Some(list) = get(ENV_ICE_SERVERS) {
            config.ice_servers = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect();
        }

        config
    }
}

/// `http://host:port` -> `ws://host:port/websocket`.
pub fn signaling_url_for(server_url: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        format!("ws://{base}")
    };
    format!("{ws_base}{SIGNALING_PATH}")
}
