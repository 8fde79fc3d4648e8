//! Database reachability probe backed by the connection pool.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{DatabaseStatus, HealthProbe};

use super::pool::DbPool;

#[derive(Clone)]
pub struct DieselHealthProbe {
    pool: DbPool,
}

impl DieselHealthProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for DieselHealthProbe {
    async fn database_status(&self) -> DatabaseStatus {
        match self.pool.ping().await {
            Ok(()) => DatabaseStatus::Connected,
            Err(error) => {
                warn!(%error, "database health check failed");
                DatabaseStatus::Disconnected
            }
        }
    }
}
