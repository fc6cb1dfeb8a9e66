//! Card row model.

use mindcard_core::card::CardStatus;
use mindcard_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cards` table, serialized as the outgoing transfer
/// representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub priority: i32,
    #[sqlx(try_from = "String")]
    pub status: CardStatus,
    pub color: String,
    pub is_favorite: bool,
    pub is_public: bool,
    pub view_count: i32,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
