//! Route definitions for cards, mounted at `/api/cards`.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// ```text
/// POST   /                       -> create_card
/// GET    /                       -> list_cards
/// GET    /page                   -> page_cards
/// GET    /status/{status}        -> cards_by_status
/// GET    /search                 -> search_cards
/// GET    /title                  -> cards_by_title
/// GET    /category/{category}    -> cards_by_category
/// GET    /creator/{createdBy}    -> cards_by_creator
/// GET    /tag/{tag}              -> cards_by_tag
/// GET    /priority/{priority}    -> cards_by_priority
/// GET    /favorites              -> favorite_cards
/// GET    /public                 -> public_cards
/// GET    /popular                -> popular_cards
/// GET    /statistics             -> statistics
/// DELETE /batch                  -> batch_delete
/// PUT    /batch/status           -> batch_set_status
/// GET    /{id}                   -> get_card
/// PUT    /{id}                   -> update_card
/// DELETE /{id}                   -> delete_card
/// DELETE /{id}/hard              -> hard_delete_card
/// PUT    /{id}/favorite          -> toggle_favorite
/// PUT    /{id}/public            -> toggle_public
/// PUT    /{id}/status            -> set_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cards::list_cards).post(cards::create_card))
        .route("/page", get(cards::page_cards))
        .route("/status/{status}", get(cards::cards_by_status))
        .route("/search", get(cards::search_cards))
        .route("/title", get(cards::cards_by_title))
        .route("/category/{category}", get(cards::cards_by_category))
        .route("/creator/{created_by}", get(cards::cards_by_creator))
        .route("/tag/{tag}", get(cards::cards_by_tag))
        .route("/priority/{priority}", get(cards::cards_by_priority))
        .route("/favorites", get(cards::favorite_cards))
        .route("/public", get(cards::public_cards))
        .route("/popular", get(cards::popular_cards))
        .route("/statistics", get(cards::statistics))
        .route("/batch", delete(cards::batch_delete))
        .route("/batch/status", put(cards::batch_set_status))
        .route(
            "/{id}",
            get(cards::get_card)
                .put(cards::update_card)
                .delete(cards::delete_card),
        )
        .route("/{id}/hard", delete(cards::hard_delete_card))
        .route("/{id}/favorite", put(cards::toggle_favorite))
        .route("/{id}/public", put(cards::toggle_public))
        .route("/{id}/status", put(cards::set_status))
}
