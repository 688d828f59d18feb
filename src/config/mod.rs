// Configuration module entry point
// Loads layered configuration and exposes the shared application state

mod state;
mod types;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Default config file name (without extension), looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "devserve";

/// Environment variable prefix, e.g. `DEVSERVE_SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "DEVSERVE";

impl Config {
    /// Load configuration from the default config file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (extension optional)
    /// The file is optional; every missing key falls back to its default
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Address the listener binds to
    ///
    /// An empty host (or `*`) binds every IPv4 interface.
    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.trim();
        let ip: IpAddr = if host.is_empty() || host == "*" {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            host.parse()
                .map_err(|e| format!("Invalid address '{host}': {e}"))?
        };
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
