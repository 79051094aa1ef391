//! Server configuration loaded via OrthoConfig.
//!
//! Values come from command-line flags, `OFFICES_*` environment variables or
//! a configuration file, in that order of precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings for the HTTP server binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OFFICES")]
pub struct ServerSettings {
    /// Interface to bind. Defaults to all interfaces.
    pub host: Option<String>,
    /// Port to bind. Defaults to 8080.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without one the server keeps its data
    /// in memory.
    pub database_url: Option<String>,
    /// Pool size cap.
    pub db_max_connections: Option<u32>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    /// Host and port to listen on.
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool configuration when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.as_str()).with_max_size(
                self.db_max_connections
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            )
        })
    }
}
