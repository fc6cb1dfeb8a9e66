//! Card lifecycle operations.
//!
//! Each method runs in its own transaction: writes commit on success, reads
//! run `READ ONLY`. An early return drops the transaction, which rolls it
//! back.

use std::sync::Arc;

use chrono::Utc;
use mindcard_core::card::{CardChanges, CardDefaults, CardInput, CardStatus, ENTITY_CARD};
use mindcard_core::error::CoreError;
use mindcard_core::pagination::{Page, PageSpec};
use mindcard_core::statistics::StatsReport;
use mindcard_core::types::DbId;
use mindcard_db::models::card::Card;
use mindcard_db::repositories::CardRepo;
use mindcard_db::DbPool;
use sqlx::{Postgres, Transaction};

use crate::error::{AppError, AppResult};

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ENTITY_CARD,
        id,
    })
}

#[derive(Clone)]
pub struct CardService {
    pool: DbPool,
    defaults: Arc<CardDefaults>,
}

impl CardService {
    pub fn new(pool: DbPool) -> Self {
        Self::with_defaults(pool, CardDefaults::default())
    }

    pub fn with_defaults(pool: DbPool, defaults: CardDefaults) -> Self {
        Self {
            pool,
            defaults: Arc::new(defaults),
        }
    }

    async fn write(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    async fn read(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    // -----------------------------------------------------------------------
    // Single-card lifecycle
    // -----------------------------------------------------------------------

    /// Validate, fill defaults and persist a new card.
    pub async fn create(&self, input: CardInput) -> AppResult<Card> {
        let new_card = self.defaults.apply(input)?;

        let mut tx = self.write().await?;
        let card = CardRepo::insert(&mut tx, &new_card, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(card_id = card.id, title = %card.title, "Card created");
        Ok(card)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Card> {
        let mut tx = self.read().await?;
        let card = CardRepo::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::debug!(card_id = id, "Card fetched");
        Ok(card)
    }

    /// Overwrite the editable fields. Status, flags and the view counter are
    /// left alone.
    pub async fn update(&self, id: DbId, input: CardInput) -> AppResult<Card> {
        let changes = CardChanges::from_input(input)?;

        let mut tx = self.write().await?;
        let card = CardRepo::update(&mut tx, id, &changes, Utc::now())
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!(card_id = id, "Card updated");
        Ok(card)
    }

    pub async fn soft_delete(&self, id: DbId) -> AppResult<()> {
        let mut tx = self.write().await?;
        if !CardRepo::soft_delete(&mut tx, id, Utc::now()).await? {
            return Err(not_found(id));
        }
        tx.commit().await?;

        tracing::info!(card_id = id, "Card soft-deleted");
        Ok(())
    }

    pub async fn hard_delete(&self, id: DbId) -> AppResult<()> {
        let mut tx = self.write().await?;
        if !CardRepo::exists(&mut tx, id).await? {
            return Err(not_found(id));
        }
        CardRepo::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(card_id = id, "Card permanently deleted");
        Ok(())
    }

    pub async fn toggle_favorite(&self, id: DbId) -> AppResult<Card> {
        let mut tx = self.write().await?;
        let card = CardRepo::toggle_favorite(&mut tx, id, Utc::now())
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!(card_id = id, is_favorite = card.is_favorite, "Card favorite toggled");
        Ok(card)
    }

    pub async fn toggle_public(&self, id: DbId) -> AppResult<Card> {
        let mut tx = self.write().await?;
        let card = CardRepo::toggle_public(&mut tx, id, Utc::now())
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!(card_id = id, is_public = card.is_public, "Card visibility toggled");
        Ok(card)
    }

    /// Moving to DELETED stamps `deleted_at`; leaving DELETED keeps it.
    pub async fn set_status(&self, id: DbId, status: CardStatus) -> AppResult<Card> {
        let mut tx = self.write().await?;
        let card = CardRepo::set_status(&mut tx, id, status, Utc::now())
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!(card_id = id, %status, "Card status changed");
        Ok(card)
    }

    pub async fn increment_view_count(&self, id: DbId) -> AppResult<Card> {
        let mut tx = self.write().await?;
        let card = CardRepo::increment_view_count(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::debug!(card_id = id, view_count = card.view_count, "Card view counted");
        Ok(card)
    }

    // -----------------------------------------------------------------------
    // Batch operations
    // -----------------------------------------------------------------------

    /// Soft delete every existing card in `ids`; unknown ids are ignored.
    pub async fn batch_soft_delete(&self, ids: &[DbId]) -> AppResult<u64> {
        let mut tx = self.write().await?;
        let count = CardRepo::batch_soft_delete(&mut tx, ids, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(requested = ids.len(), count, "Cards batch soft-deleted");
        Ok(count)
    }

    pub async fn batch_set_status(&self, ids: &[DbId], status: CardStatus) -> AppResult<u64> {
        let mut tx = self.write().await?;
        let count = CardRepo::batch_set_status(&mut tx, ids, status, Utc::now()).await?;
        tx.commit().await?;

        tracing::info!(requested = ids.len(), count, %status, "Cards batch status changed");
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Listings
    // -----------------------------------------------------------------------

    pub async fn list_all(&self) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_all(&mut tx).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn page(&self, spec: &PageSpec) -> AppResult<Page<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_page(&mut tx, spec).await?;
        let total = CardRepo::count_all(&mut tx).await?;
        tx.commit().await?;
        Ok(Page::new(cards, spec, total))
    }

    pub async fn by_status(&self, status: CardStatus, spec: &PageSpec) -> AppResult<Page<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_by_status(&mut tx, status, spec).await?;
        let total = CardRepo::count_by_status(&mut tx, status).await?;
        tx.commit().await?;
        Ok(Page::new(cards, spec, total))
    }

    /// Unpaged keyword search over ACTIVE cards.
    pub async fn search(&self, keyword: &str) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::search_keyword(&mut tx, keyword).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn search_page(&self, keyword: &str, spec: &PageSpec) -> AppResult<Page<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::search_keyword_page(&mut tx, keyword, spec).await?;
        let total = CardRepo::count_keyword(&mut tx, keyword).await?;
        tx.commit().await?;
        Ok(Page::new(cards, spec, total))
    }

    pub async fn by_title(&self, title: &str) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_by_title_containing(&mut tx, title).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn by_category(&self, category: &str) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_by_category(&mut tx, category).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn by_creator(&self, created_by: &str) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_by_created_by(&mut tx, created_by).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn by_tag(&self, tag: &str) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_by_tag_containing(&mut tx, tag).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn by_min_priority(&self, priority: i32) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_by_priority_at_least(&mut tx, priority).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn favorites(&self) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_favorites(&mut tx).await?;
        tx.commit().await?;
        Ok(cards)
    }

    pub async fn public(&self) -> AppResult<Vec<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_public(&mut tx).await?;
        tx.commit().await?;
        Ok(cards)
    }

    /// ACTIVE cards by view count.
    pub async fn popular(&self, spec: &PageSpec) -> AppResult<Page<Card>> {
        let mut tx = self.read().await?;
        let cards = CardRepo::find_popular(&mut tx, spec).await?;
        let total = CardRepo::count_by_status(&mut tx, CardStatus::Active).await?;
        tx.commit().await?;
        Ok(Page::new(cards, spec, total))
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    pub async fn statistics(&self) -> AppResult<StatsReport> {
        let mut tx = self.read().await?;

        let mut report = StatsReport::new(CardRepo::count_all(&mut tx).await?);
        for status in CardStatus::ALL {
            let count = CardRepo::count_by_status(&mut tx, status).await?;
            report = report.with_status_count(status, count);
        }
        let report = report
            .with_categories(CardRepo::count_by_category(&mut tx).await?)
            .with_priorities(CardRepo::count_by_priority(&mut tx).await?);

        tx.commit().await?;
        Ok(report)
    }
}
