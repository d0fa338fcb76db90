//! # In-Memory Receipt Store
//!
//! A [`ReceiptStore`] over an ordered map. Same observable behavior as the
//! SQLite repository: sequential ids that are never reused, storage-set
//! timestamps, the shared merge rule from [`Receipt::apply_patch`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use receipt_core::{NewReceipt, Receipt, ReceiptPatch};

use super::{ReceiptStore, RECEIPT_ENTITY};
use crate::error::{DbError, DbResult};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Receipt>,
}

/// Receipt storage held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    table: RwLock<Table>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored receipts.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn insert(&self, receipt: &NewReceipt) -> DbResult<Receipt> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let now = Utc::now();
        let created = Receipt {
            id: table.last_id,
            title: receipt.title.clone(),
            author: receipt.author.clone(),
            description: receipt.description.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(created.id, created.clone());

        debug!(id = created.id, "Receipt inserted in memory");
        Ok(created)
    }

    async fn get(&self, id: i64) -> DbResult<Receipt> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found(RECEIPT_ENTITY, id))
    }

    async fn list(&self) -> DbResult<Vec<Receipt>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, id: i64, patch: &ReceiptPatch) -> DbResult<Receipt> {
        let mut table = self.table.write().await;
        let receipt = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DbError::not_found(RECEIPT_ENTITY, id))?;

        receipt.apply_patch(patch);
        receipt.updated_at = Utc::now();

        Ok(receipt.clone())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found(RECEIPT_ENTITY, id))
    }
}
