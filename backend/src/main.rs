//! SipTalk entry-point: loads configuration, prepares storage, and serves the
//! REST API.

mod server;

use std::io;

use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, create_server};
use siptalk::inbound::http::session_config::{BuildMode, session_settings_from_env};
use siptalk::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(|e| io::Error::other(e.to_string()))?;
    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(fingerprint = %session.key_fingerprint(), "session key loaded");

    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mut config = ServerConfig::new(session, bind_addr, settings.frontend_origin().to_owned());

    if let Some(url) = settings.database_url() {
        if settings.run_migrations {
            run_pending_migrations(url).await.map_err(io::Error::other)?;
        }
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.pool_max_size()))
            .await
            .map_err(|e| io::Error::other(e.into_message()))?;
        config = config.with_db_pool(pool);
    }

    let (server, health_state) = create_server(config)?;
    info!(%bind_addr, "siptalk listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if let Err(e) = actix_web::rt::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown requested; draining connections");
        health_state.mark_unhealthy();
        handle.stop(true).await;
    });

    server.await
}
