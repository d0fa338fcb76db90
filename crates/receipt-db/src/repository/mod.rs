//! # Repository Module
//!
//! The storage capability set for receipts and its implementations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Storage                                      │
//! │                                                                         │
//! │  ReceiptService                                                        │
//! │       │                                                                 │
//! │       │  store.get(5)                                                   │
//! │       ▼                                                                 │
//! │  trait ReceiptStore                                                    │
//! │  ├── insert(&self, new_receipt)                                        │
//! │  ├── get(&self, id)                                                    │
//! │  ├── list(&self)                                                       │
//! │  ├── update(&self, id, patch)                                          │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       ├──► ReceiptRepository     (SQLite, one statement per call)      │
//! │       └──► InMemoryReceiptStore  (BTreeMap, tests)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "No such row" is always reported as [`DbError::NotFound`], never folded
//! into another variant, so callers can tell it apart from real failures.
//!
//! [`DbError::NotFound`]: crate::error::DbError::NotFound

use async_trait::async_trait;
use receipt_core::{NewReceipt, Receipt, ReceiptPatch};

use crate::error::DbResult;

pub mod memory;
pub mod receipt;

/// Entity name used in `DbError::NotFound`.
pub(crate) const RECEIPT_ENTITY: &str = "Receipt";

/// Storage operations for receipts.
///
/// Implementations assign `id`, `created_at` and `updated_at` themselves.
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Inserts a receipt and returns it with id and timestamps populated.
    async fn insert(&self, receipt: &NewReceipt) -> DbResult<Receipt>;

    /// Fetches one receipt. Missing rows are `DbError::NotFound`.
    async fn get(&self, id: i64) -> DbResult<Receipt>;

    /// All receipts ordered by ascending id.
    async fn list(&self) -> DbResult<Vec<Receipt>>;

    /// Merges `patch` into the stored row and refreshes `updated_at`, as a
    /// single atomic step. Missing rows are `DbError::NotFound`.
    async fn update(&self, id: i64, patch: &ReceiptPatch) -> DbResult<Receipt>;

    /// Deletes one receipt. Zero rows affected is `DbError::NotFound`.
    async fn delete(&self, id: i64) -> DbResult<()>;

    /// Returns true if the backend can currently serve requests.
    async fn health_check(&self) -> bool {
        true
    }
}
