pub mod cards;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cards                                 create, list
/// /cards/page                            sorted page over every card
/// /cards/status/{status}                 page by status
/// /cards/search                          keyword search (ACTIVE)
/// /cards/title                           title search
/// /cards/category/{category}             by category
/// /cards/creator/{createdBy}             by author
/// /cards/tag/{tag}                       by tag (ACTIVE)
/// /cards/priority/{priority}             priority at least
/// /cards/favorites                       favorites (ACTIVE)
/// /cards/public                          public (ACTIVE)
/// /cards/popular                         most viewed (ACTIVE)
/// /cards/statistics                      totals and breakdowns
/// /cards/batch                           batch soft delete (DELETE)
/// /cards/batch/status                    batch status change (PUT)
/// /cards/{id}                            get, update, soft delete
/// /cards/{id}/hard                       permanent delete
/// /cards/{id}/favorite                   toggle favorite
/// /cards/{id}/public                     toggle visibility
/// /cards/{id}/status                     change status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/cards", cards::router())
}
