//! Shared application state handed to every handler through axum's `State`.

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Cloning is cheap: the pool and services share `Arc`s internally.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Used directly by the health checks.
    pub db_pool: AsyncDbPool,
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Wires repositories and services on top of `pool`.
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        let services = Services::new(Repositories::new(pool.clone()));
        Self {
            services,
            db_pool: pool,
            jwt_config,
        }
    }
}
