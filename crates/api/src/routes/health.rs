use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Mount health routes (root level, NOT under `/api`).
///
/// ```text
/// GET /health            -> health
/// GET /health/detailed   -> detailed_health
/// GET /health/version    -> version
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/detailed", get(health::detailed_health))
        .route("/health/version", get(health::version))
}
