//! # Receipt Repository
//!
//! SQLite-backed [`ReceiptStore`]. Every operation is exactly one SQL
//! statement against the `receipts` table.
//!
//! ## Statements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert  INSERT ... RETURNING *            → generated id + timestamps │
//! │  get     SELECT ... WHERE id = ?1          → 0 or 1 row                │
//! │  list    SELECT ... ORDER BY id            → 0..n rows                 │
//! │  update  UPDATE ... COALESCE(?, col) ...   → merged row or no row      │
//! │          RETURNING *                                                    │
//! │  delete  DELETE ... WHERE id = ?1          → rows affected             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partial Update Without a Race
//! The merge happens inside the UPDATE itself: an absent (or empty) patch
//! field is bound as NULL and `COALESCE(NULL, title)` keeps the stored
//! value. There is no read-then-write gap for a concurrent writer to land in.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use receipt_core::{NewReceipt, Receipt, ReceiptPatch};

use super::{ReceiptStore, RECEIPT_ENTITY};
use crate::error::{DbError, DbResult};

/// Repository for receipt database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ReceiptRepository::new(pool);
///
/// let created = repo.insert(&NewReceipt::new("Title", "Author", "Text")).await?;
/// let fetched = repo.get(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    pool: SqlitePool,
}

impl ReceiptRepository {
    /// Creates a new ReceiptRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceiptRepository { pool }
    }

    /// Counts stored receipts (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM receipts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ReceiptStore for ReceiptRepository {
    async fn insert(&self, receipt: &NewReceipt) -> DbResult<Receipt> {
        debug!(title = %receipt.title, "Inserting receipt");

        let now = Utc::now();

        let created = sqlx::query_as::<_, Receipt>(
            r#"
            INSERT INTO receipts (title, author, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, title, author, description, created_at, updated_at
            "#,
        )
        .bind(&receipt.title)
        .bind(&receipt.author)
        .bind(&receipt.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = created.id, "Receipt inserted");
        Ok(created)
    }

    async fn get(&self, id: i64) -> DbResult<Receipt> {
        debug!(id, "Fetching receipt");

        sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, title, author, description, created_at, updated_at
            FROM receipts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RECEIPT_ENTITY, id))
    }

    async fn list(&self) -> DbResult<Vec<Receipt>> {
        let receipts = sqlx::query_as::<_, Receipt>(
            r#"
            SELECT id, title, author, description, created_at, updated_at
            FROM receipts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = receipts.len(), "Listed receipts");
        Ok(receipts)
    }

    async fn update(&self, id: i64, patch: &ReceiptPatch) -> DbResult<Receipt> {
        debug!(id, "Updating receipt");

        let now = Utc::now();

        sqlx::query_as::<_, Receipt>(
            r#"
            UPDATE receipts SET
                title = COALESCE(?2, title),
                author = COALESCE(?3, author),
                description = COALESCE(?4, description),
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, title, author, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(patch.title())
        .bind(patch.author())
        .bind(patch.description())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(RECEIPT_ENTITY, id))
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting receipt");

        let result = sqlx::query("DELETE FROM receipts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(RECEIPT_ENTITY, id));
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ReceiptRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().receipts()
    }

    fn sample() -> NewReceipt {
        NewReceipt::new("A", "B", "C")
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let repo = repo().await;

        let created = repo.insert(&sample()).await.unwrap();

        assert!(created.id >= 1);
        assert_eq!(created.title, "A");
        assert_eq!(created.author, "B");
        assert_eq!(created.description, "C");
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_get_round_trip() {
        let repo = repo().await;
        let created = repo.insert(&sample()).await.unwrap();

        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = repo().await;

        let err = repo.get(500).await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_empty_and_ordered() {
        let repo = repo().await;
        assert!(repo.list().await.unwrap().is_empty());

        for title in ["first", "second", "third"] {
            repo.insert(&NewReceipt::new(title, "author", "text"))
                .await
                .unwrap();
        }

        let receipts = repo.list().await.unwrap();
        let ids: Vec<i64> = receipts.iter().map(|r| r.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(receipts[0].title, "first");
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_merges_in_one_statement() {
        let repo = repo().await;
        let created = repo.insert(&sample()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let patch = ReceiptPatch {
            title: Some("X".to_string()),
            author: Some(String::new()),
            description: None,
        };
        let updated = repo.update(created.id, &patch).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "X");
        assert_eq!(updated.author, "B");
        assert_eq!(updated.description, "C");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
        assert_eq!(repo.get(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = repo().await;

        let err = repo
            .update(42, &ReceiptPatch::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = repo().await;
        let created = repo.insert(&sample()).await.unwrap();

        repo.delete(created.id).await.unwrap();
        let err = repo.delete(created.id).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(repo.get(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let repo = repo().await;
        let first = repo.insert(&sample()).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.insert(&sample()).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = repo().await;
        assert!(ReceiptStore::health_check(&repo).await);
    }
}
