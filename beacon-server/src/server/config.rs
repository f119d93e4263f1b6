use std::time::Duration;

/// Relay server settings.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// How often the occupancy snapshot is logged. Zero disables the
    /// stats logger.
    pub stats_interval: Duration,
}

impl RelayConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            stats_interval: Duration::from_secs(30),
        }
    }
}
