use vidcast_core::ClientConfig;

/// ICE settings for the peer connection.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    pub ice_servers: Vec<String>,
}

impl From<&ClientConfig> for TransportConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            ice_servers: config.ice_servers.clone(),
        }
    }
}
