//! Backend entry-point: loads settings, prepares storage and serves the REST
//! API with its OpenAPI docs.

mod server;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use office_listings::outbound::persistence::{DbPool, run_migrations};
use office_listings::settings::ServerSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|err| std::io::Error::other(format!("load settings: {err}")))?;

    let mut config = ServerConfig::new(settings.bind_addr());
    if let (Some(url), Some(pool_config)) = (&settings.database_url, settings.pool_config()) {
        if settings.run_migrations {
            run_migrations(url)
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        config = config.with_db_pool(pool);
    }

    let (host, port) = settings.bind_addr();
    info!(%host, port, "starting office listings server");
    create_server(config)?.await
}
