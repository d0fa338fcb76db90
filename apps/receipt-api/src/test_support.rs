//! Storage doubles for service and route tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use receipt_core::{NewReceipt, Receipt, ReceiptPatch};
use receipt_db::{DbError, DbResult, ReceiptStore};

/// Counts calls and answers NotFound for everything.
#[derive(Debug, Default)]
pub struct CountingStore {
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self, id: i64) -> DbError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        DbError::not_found("Receipt", id)
    }
}

#[async_trait]
impl ReceiptStore for CountingStore {
    async fn insert(&self, _receipt: &NewReceipt) -> DbResult<Receipt> {
        Err(self.hit(0))
    }

    async fn get(&self, id: i64) -> DbResult<Receipt> {
        Err(self.hit(id))
    }

    async fn list(&self) -> DbResult<Vec<Receipt>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn update(&self, id: i64, _patch: &ReceiptPatch) -> DbResult<Receipt> {
        Err(self.hit(id))
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        Err(self.hit(id))
    }
}

/// Fails every call the way a dead database would.
#[derive(Debug, Default)]
pub struct FailingStore;

fn broken() -> DbError {
    DbError::QueryFailed("database disk image is malformed".to_string())
}

#[async_trait]
impl ReceiptStore for FailingStore {
    async fn insert(&self, _receipt: &NewReceipt) -> DbResult<Receipt> {
        Err(broken())
    }

    async fn get(&self, _id: i64) -> DbResult<Receipt> {
        Err(broken())
    }

    async fn list(&self) -> DbResult<Vec<Receipt>> {
        Err(broken())
    }

    async fn update(&self, _id: i64, _patch: &ReceiptPatch) -> DbResult<Receipt> {
        Err(broken())
    }

    async fn delete(&self, _id: i64) -> DbResult<()> {
        Err(broken())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Sleeps before answering.
#[derive(Debug)]
pub struct SlowStore(pub Duration);

impl SlowStore {
    async fn stall(&self) {
        tokio::time::sleep(self.0).await;
    }
}

#[async_trait]
impl ReceiptStore for SlowStore {
    async fn insert(&self, receipt: &NewReceipt) -> DbResult<Receipt> {
        self.stall().await;
        let now = Utc::now();
        Ok(Receipt {
            id: 1,
            title: receipt.title.clone(),
            author: receipt.author.clone(),
            description: receipt.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, id: i64) -> DbResult<Receipt> {
        self.stall().await;
        Err(DbError::not_found("Receipt", id))
    }

    async fn list(&self) -> DbResult<Vec<Receipt>> {
        self.stall().await;
        Ok(Vec::new())
    }

    async fn update(&self, id: i64, _patch: &ReceiptPatch) -> DbResult<Receipt> {
        self.stall().await;
        Err(DbError::not_found("Receipt", id))
    }

    async fn delete(&self, _id: i64) -> DbResult<()> {
        self.stall().await;
        Ok(())
    }
}
