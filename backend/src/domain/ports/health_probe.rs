//! Port for reporting backing store reachability.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database reachability as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
    NotConfigured,
}

impl DatabaseStatus {
    /// Whether the status should fail the health report.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Disconnected)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Round-trip to the store and report the outcome. Never errors.
    async fn database_status(&self) -> DatabaseStatus;
}

/// Probe used when the server runs on in-memory adapters.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotConfiguredHealthProbe;

#[async_trait]
impl HealthProbe for NotConfiguredHealthProbe {
    async fn database_status(&self) -> DatabaseStatus {
        DatabaseStatus::NotConfigured
    }
}
