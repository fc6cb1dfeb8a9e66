use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::services::CardService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mindcard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Card lifecycle operations over `pool`.
    pub cards: CardService,
    /// When the process started serving, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pool: mindcard_db::DbPool, config: ServerConfig) -> Self {
        Self {
            cards: CardService::new(pool.clone()),
            pool,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
