//! Application state shared by every handler.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Cache, Database, RateLimiter};
use crate::services::{ServiceContainer, Services};

/// Handles to the services and the infrastructure probed by `/health`.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub database: Database,
}

impl AppState {
    /// Wire the production services over `database` and the Redis `cache`.
    pub fn from_config(database: Database, cache: Cache, config: Config) -> Self {
        let cache = Arc::new(cache);
        let services = Services::from_connection(database.get_connection(), config, cache.clone());

        Self {
            services: Arc::new(services),
            rate_limiter: cache,
            database,
        }
    }

    /// Assemble state from already-built parts.
    pub fn new(
        services: Arc<dyn ServiceContainer>,
        rate_limiter: Arc<dyn RateLimiter>,
        database: Database,
    ) -> Self {
        Self {
            services,
            rate_limiter,
            database,
        }
    }
}
