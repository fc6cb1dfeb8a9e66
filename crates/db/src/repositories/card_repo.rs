//! Repository for the `cards` table.
//!
//! Status filtering is deliberately uneven: plain listing, paging, title,
//! category, creator and priority queries return every status, while
//! keyword, tag, favorite, public and popular queries return ACTIVE rows
//! only. Callers rely on that split.
//!
//! Writes never move `updated_at` behind `created_at`, even when the
//! supplied timestamp is older.

use mindcard_core::card::{CardChanges, CardStatus, NewCard};
use mindcard_core::pagination::PageSpec;
use mindcard_core::types::{DbId, Timestamp};
use sqlx::PgConnection;

use crate::models::card::Card;

/// Column list for cards queries.
const COLUMNS: &str = "id, title, content, category, tags, priority, status, color, \
    is_favorite, is_public, view_count, created_by, updated_by, \
    created_at, updated_at, deleted_at";

/// Build an ILIKE pattern matching `text` anywhere, with LIKE wildcards in
/// `text` escaped so they match literally.
fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Provides the card query contract and its write primitives.
pub struct CardRepo;

impl CardRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a resolved card, stamping both audit timestamps with `now`.
    pub async fn insert(
        conn: &mut PgConnection,
        card: &NewCard,
        now: Timestamp,
    ) -> Result<Card, sqlx::Error> {
        let query = format!(
            "INSERT INTO cards
                (title, content, category, tags, priority, status, color,
                 is_favorite, is_public, view_count, created_by, updated_by,
                 created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(&card.title)
            .bind(&card.content)
            .bind(&card.category)
            .bind(&card.tags)
            .bind(card.priority)
            .bind(card.status.as_str())
            .bind(&card.color)
            .bind(card.is_favorite)
            .bind(card.is_public)
            .bind(card.view_count)
            .bind(&card.created_by)
            .bind(&card.updated_by)
            .bind(now)
            .fetch_one(&mut *conn)
            .await
    }

    /// Overwrite the editable fields of a card.
    ///
    /// `priority` and `color` keep their stored value when absent.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        changes: &CardChanges,
        now: Timestamp,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET
                title = $2,
                content = $3,
                category = $4,
                tags = $5,
                priority = COALESCE($6, priority),
                color = COALESCE($7, color),
                updated_by = $8,
                updated_at = GREATEST($9, created_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.content)
            .bind(&changes.category)
            .bind(&changes.tags)
            .bind(changes.priority)
            .bind(&changes.color)
            .bind(&changes.updated_by)
            .bind(now)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Mark a card DELETED and stamp `deleted_at`. Returns `false` if no
    /// card has this id.
    pub async fn soft_delete(
        conn: &mut PgConnection,
        id: DbId,
        now: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cards SET status = 'DELETED', deleted_at = $2,
                updated_at = GREATEST($2, created_at)
             WHERE id = $1",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently remove a card. Returns `true` if a row was deleted.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip `is_favorite`.
    pub async fn toggle_favorite(
        conn: &mut PgConnection,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET is_favorite = NOT is_favorite, updated_at = GREATEST($2, created_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(now)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Flip `is_public`.
    pub async fn toggle_public(
        conn: &mut PgConnection,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET is_public = NOT is_public, updated_at = GREATEST($2, created_at)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(now)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Set the status. Moving to DELETED stamps `deleted_at`; any other
    /// status leaves it as it was.
    pub async fn set_status(
        conn: &mut PgConnection,
        id: DbId,
        status: CardStatus,
        now: Timestamp,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET
                status = $2,
                updated_at = GREATEST($3, created_at),
                deleted_at = CASE WHEN $4 THEN $3 ELSE deleted_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(now)
            .bind(status.stamps_deletion())
            .fetch_optional(&mut *conn)
            .await
    }

    /// Add one view. `updated_at` is left untouched.
    pub async fn increment_view_count(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Card>, sqlx::Error> {
        let query = format!(
            "UPDATE cards SET view_count = view_count + 1
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Soft delete every existing card in `ids` with one statement. Unknown
    /// ids are skipped. Returns the number of rows changed.
    pub async fn batch_soft_delete(
        conn: &mut PgConnection,
        ids: &[DbId],
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cards SET status = 'DELETED', deleted_at = $2,
                updated_at = GREATEST($2, created_at)
             WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(now)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set the status of every existing card in `ids` with one statement,
    /// applying the same `deleted_at` rule as [`CardRepo::set_status`].
    pub async fn batch_set_status(
        conn: &mut PgConnection,
        ids: &[DbId],
        status: CardStatus,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cards SET
                status = $2,
                updated_at = GREATEST($3, created_at),
                deleted_at = CASE WHEN $4 THEN $3 ELSE deleted_at END
             WHERE id = ANY($1)",
        )
        .bind(ids)
        .bind(status.as_str())
        .bind(now)
        .bind(status.stamps_deletion())
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Lookups (all statuses)
    // -----------------------------------------------------------------------

    /// Find a card by its ID, whatever its status.
    pub async fn find_by_id(conn: &mut PgConnection, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    pub async fn exists(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM cards WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(exists)
    }

    /// Every card, ordered by id.
    pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards ORDER BY id ASC");
        sqlx::query_as::<_, Card>(&query).fetch_all(&mut *conn).await
    }

    /// One page of every card, ordered by the spec's sort directive.
    pub async fn find_page(
        conn: &mut PgConnection,
        spec: &PageSpec,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             ORDER BY {}
             LIMIT $1 OFFSET $2",
            spec.sort.order_by()
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(spec.limit())
            .bind(spec.offset())
            .fetch_all(&mut *conn)
            .await
    }

    /// One page of cards in `status`, newest first.
    pub async fn find_by_status(
        conn: &mut PgConnection,
        status: CardStatus,
        spec: &PageSpec,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE status = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(status.as_str())
            .bind(spec.limit())
            .bind(spec.offset())
            .fetch_all(&mut *conn)
            .await
    }

    /// Cards whose title contains `text`, ignoring case.
    pub async fn find_by_title_containing(
        conn: &mut PgConnection,
        text: &str,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE title ILIKE $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(contains_pattern(text))
            .fetch_all(&mut *conn)
            .await
    }

    /// Cards whose category equals `category`, ignoring case.
    pub async fn find_by_category(
        conn: &mut PgConnection,
        category: &str,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE lower(category) = lower($1)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(category)
            .fetch_all(&mut *conn)
            .await
    }

    /// Cards attributed to `created_by` (exact match).
    pub async fn find_by_created_by(
        conn: &mut PgConnection,
        created_by: &str,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE created_by = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(created_by)
            .fetch_all(&mut *conn)
            .await
    }

    /// Cards with `priority >= min`, highest priority first.
    pub async fn find_by_priority_at_least(
        conn: &mut PgConnection,
        min: i32,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE priority >= $1
             ORDER BY priority DESC, id ASC"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(min)
            .fetch_all(&mut *conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Lookups (ACTIVE only)
    // -----------------------------------------------------------------------

    /// ACTIVE cards whose title or content contains `keyword`, ignoring case.
    pub async fn search_keyword(
        conn: &mut PgConnection,
        keyword: &str,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE (title ILIKE $1 OR content ILIKE $1) AND status = 'ACTIVE'
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(contains_pattern(keyword))
            .fetch_all(&mut *conn)
            .await
    }

    /// One page of [`CardRepo::search_keyword`], ordered by the spec.
    pub async fn search_keyword_page(
        conn: &mut PgConnection,
        keyword: &str,
        spec: &PageSpec,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE (title ILIKE $1 OR content ILIKE $1) AND status = 'ACTIVE'
             ORDER BY {}
             LIMIT $2 OFFSET $3",
            spec.sort.order_by()
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(contains_pattern(keyword))
            .bind(spec.limit())
            .bind(spec.offset())
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn count_keyword(conn: &mut PgConnection, keyword: &str) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM cards
             WHERE (title ILIKE $1 OR content ILIKE $1) AND status = 'ACTIVE'",
        )
        .bind(contains_pattern(keyword))
        .fetch_one(&mut *conn)
        .await?;
        Ok(count)
    }

    /// ACTIVE cards whose raw tag string contains `tag`, ignoring case.
    pub async fn find_by_tag_containing(
        conn: &mut PgConnection,
        tag: &str,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE tags ILIKE $1 AND status = 'ACTIVE'
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(contains_pattern(tag))
            .fetch_all(&mut *conn)
            .await
    }

    pub async fn find_favorites(conn: &mut PgConnection) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE is_favorite = TRUE AND status = 'ACTIVE'
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Card>(&query).fetch_all(&mut *conn).await
    }

    pub async fn find_public(conn: &mut PgConnection) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE is_public = TRUE AND status = 'ACTIVE'
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Card>(&query).fetch_all(&mut *conn).await
    }

    /// One page of ACTIVE cards, most viewed first.
    pub async fn find_popular(
        conn: &mut PgConnection,
        spec: &PageSpec,
    ) -> Result<Vec<Card>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cards
             WHERE status = 'ACTIVE'
             ORDER BY view_count DESC, id ASC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(spec.limit())
            .bind(spec.offset())
            .fetch_all(&mut *conn)
            .await
    }

    // -----------------------------------------------------------------------
    // Counts
    // -----------------------------------------------------------------------

    pub async fn count_all(conn: &mut PgConnection) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    pub async fn count_by_status(
        conn: &mut PgConnection,
        status: CardStatus,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cards WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    /// ACTIVE card counts grouped by exact category (NULL included).
    pub async fn count_by_category(
        conn: &mut PgConnection,
    ) -> Result<Vec<(Option<String>, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT category, COUNT(*) FROM cards
             WHERE status = 'ACTIVE'
             GROUP BY category
             ORDER BY category",
        )
        .fetch_all(&mut *conn)
        .await
    }

    /// ACTIVE card counts grouped by priority.
    pub async fn count_by_priority(
        conn: &mut PgConnection,
    ) -> Result<Vec<(i32, i64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT priority, COUNT(*) FROM cards
             WHERE status = 'ACTIVE'
             GROUP BY priority
             ORDER BY priority",
        )
        .fetch_all(&mut *conn)
        .await
    }
}
