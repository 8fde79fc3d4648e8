//! Layered server settings and the configuration handed to the HTTP server.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use siptalk::inbound::http::session_config::SessionSettings;
use siptalk::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:5174";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings loaded from `SIPTALK_*` environment variables, CLI flags, and an
/// optional config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SIPTALK")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. In-memory adapters are used when unset.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// The single origin allowed to make credentialed cross-origin calls.
    pub frontend_origin: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

/// Failure to interpret loaded settings.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address {value:?}: {message}")]
pub struct BindAddrError {
    value: String,
    message: String,
}

impl ServerSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|err: std::net::AddrParseError| BindAddrError {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn frontend_origin(&self) -> &str {
        self.frontend_origin
            .as_deref()
            .unwrap_or(DEFAULT_FRONTEND_ORIGIN)
    }
}

/// Everything the server needs once settings and secrets are resolved.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) frontend_origin: String,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, frontend_origin: String) -> Self {
        Self {
            session,
            bind_addr,
            frontend_origin,
            db_pool: None,
        }
    }

    /// Attach a database connection pool so the Diesel adapters are used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
