//! Handlers for the card API.
//!
//! Handlers stay thin: extract, call [`CardService`](crate::services::CardService),
//! wrap the result in the envelope.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use mindcard_core::card::{CardInput, CardStatus};
use mindcard_core::pagination::{PageSpec, Sort};
use mindcard_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::query::{KeywordParams, PageParams, StatusParam, TitleParams};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Single card
// ---------------------------------------------------------------------------

/// POST /api/cards
pub async fn create_card(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CardInput>,
) -> AppResult<Response> {
    let card = state.cards.create(input).await?;
    Ok(ApiResponse::ok(card, "Card created").created())
}

/// GET /api/cards/{id}
///
/// Counts a view. The body is the card as it was before the count.
pub async fn get_card(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let card = state.cards.get(id).await?;
    state.cards.increment_view_count(id).await?;
    Ok(ApiResponse::ok(card, "Card fetched"))
}

/// PUT /api/cards/{id}
pub async fn update_card(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<CardInput>,
) -> AppResult<impl IntoResponse> {
    let card = state.cards.update(id, input).await?;
    Ok(ApiResponse::ok(card, "Card updated"))
}

/// DELETE /api/cards/{id}
pub async fn delete_card(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.cards.soft_delete(id).await?;
    Ok(ApiResponse::done("Card deleted"))
}

/// DELETE /api/cards/{id}/hard
pub async fn hard_delete_card(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    state.cards.hard_delete(id).await?;
    Ok(ApiResponse::done("Card permanently deleted"))
}

/// PUT /api/cards/{id}/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let card = state.cards.toggle_favorite(id).await?;
    Ok(ApiResponse::ok(card, "Favorite toggled"))
}

/// PUT /api/cards/{id}/public
pub async fn toggle_public(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let card = state.cards.toggle_public(id).await?;
    Ok(ApiResponse::ok(card, "Visibility toggled"))
}

/// PUT /api/cards/{id}/status?status=
pub async fn set_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiQuery(param): ApiQuery<StatusParam>,
) -> AppResult<impl IntoResponse> {
    let status = param.parse()?;
    let card = state.cards.set_status(id, status).await?;
    Ok(ApiResponse::ok(card, "Status updated"))
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// DELETE /api/cards/batch
///
/// Body is a JSON array of ids. Unknown ids are skipped.
pub async fn batch_delete(
    State(state): State<AppState>,
    ApiJson(ids): ApiJson<Vec<DbId>>,
) -> AppResult<impl IntoResponse> {
    state.cards.batch_soft_delete(&ids).await?;
    Ok(ApiResponse::done("Cards deleted"))
}

/// PUT /api/cards/batch/status?status=
pub async fn batch_set_status(
    State(state): State<AppState>,
    ApiQuery(param): ApiQuery<StatusParam>,
    ApiJson(ids): ApiJson<Vec<DbId>>,
) -> AppResult<impl IntoResponse> {
    let status = param.parse()?;
    state.cards.batch_set_status(&ids, status).await?;
    Ok(ApiResponse::done("Statuses updated"))
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

/// GET /api/cards
pub async fn list_cards(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cards = state.cards.list_all().await?;
    Ok(ApiResponse::ok(cards, "Cards fetched"))
}

/// GET /api/cards/page?page=&size=&sortBy=&sortDir=
pub async fn page_cards(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<impl IntoResponse> {
    let spec = params.to_sorted_spec()?;
    let page = state.cards.page(&spec).await?;
    Ok(ApiResponse::ok(page, "Card page fetched"))
}

/// GET /api/cards/status/{status}?page=&size=
pub async fn cards_by_status(
    State(state): State<AppState>,
    ApiPath(status): ApiPath<String>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<impl IntoResponse> {
    let status: CardStatus = status.parse()?;
    let page = state.cards.by_status(status, &params.to_spec()).await?;
    Ok(ApiResponse::ok(page, "Cards fetched"))
}

/// GET /api/cards/search?keyword=&page=&size=
pub async fn search_cards(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<KeywordParams>,
) -> AppResult<impl IntoResponse> {
    let spec = PageSpec::new(params.page, params.size, Sort::default());
    let page = state.cards.search_page(&params.keyword, &spec).await?;
    Ok(ApiResponse::ok(page, "Search completed"))
}

/// GET /api/cards/title?title=
pub async fn cards_by_title(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<TitleParams>,
) -> AppResult<impl IntoResponse> {
    let cards = state.cards.by_title(&params.title).await?;
    Ok(ApiResponse::ok(cards, "Cards fetched"))
}

/// GET /api/cards/category/{category}
pub async fn cards_by_category(
    State(state): State<AppState>,
    ApiPath(category): ApiPath<String>,
) -> AppResult<impl IntoResponse> {
    let cards = state.cards.by_category(&category).await?;
    Ok(ApiResponse::ok(cards, "Category cards fetched"))
}

/// GET /api/cards/creator/{createdBy}
pub async fn cards_by_creator(
    State(state): State<AppState>,
    ApiPath(created_by): ApiPath<String>,
) -> AppResult<impl IntoResponse> {
    let cards = state.cards.by_creator(&created_by).await?;
    Ok(ApiResponse::ok(cards, "Creator cards fetched"))
}

/// GET /api/cards/tag/{tag}
pub async fn cards_by_tag(
    State(state): State<AppState>,
    ApiPath(tag): ApiPath<String>,
) -> AppResult<impl IntoResponse> {
    let cards = state.cards.by_tag(&tag).await?;
    Ok(ApiResponse::ok(cards, "Tagged cards fetched"))
}

/// GET /api/cards/priority/{priority}
///
/// Cards at or above the given priority.
pub async fn cards_by_priority(
    State(state): State<AppState>,
    ApiPath(priority): ApiPath<i32>,
) -> AppResult<impl IntoResponse> {
    let cards = state.cards.by_min_priority(priority).await?;
    Ok(ApiResponse::ok(cards, "Priority cards fetched"))
}

/// GET /api/cards/favorites
pub async fn favorite_cards(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cards = state.cards.favorites().await?;
    Ok(ApiResponse::ok(cards, "Favorite cards fetched"))
}

/// GET /api/cards/public
pub async fn public_cards(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cards = state.cards.public().await?;
    Ok(ApiResponse::ok(cards, "Public cards fetched"))
}

/// GET /api/cards/popular?page=&size=
pub async fn popular_cards(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = state.cards.popular(&params.to_spec()).await?;
    Ok(ApiResponse::ok(page, "Popular cards fetched"))
}

/// GET /api/cards/statistics
pub async fn statistics(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let report = state.cards.statistics().await?;
    Ok(ApiResponse::ok(report, "Statistics fetched"))
}
