use std::sync::Arc;

use dogland_db::DbPool;

use crate::config::ServerConfig;

/// Handles every handler needs: the Postgres pool and the loaded config.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
