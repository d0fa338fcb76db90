//! # Receipt Service
//!
//! Application logic between the HTTP routes and storage.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ReceiptService Operations                            │
//! │                                                                         │
//! │  create(candidate) ── validate ──✗──► Validation(violations)           │
//! │                          │                                              │
//! │                          ✓──► store.insert ──► Receipt                 │
//! │                                                                         │
//! │  get / update / delete(id)                                             │
//! │       │                                                                 │
//! │       ├── id < 1 ──► NotFound (storage never called)                   │
//! │       │                                                                 │
//! │       └── store.* ──► DbError::NotFound ──► NotFound                   │
//! │                   └─► other DbError     ──► Storage                    │
//! │                                                                         │
//! │  list() ──► store.list ──► Vec<Receipt> (empty is fine)                │
//! │                                                                         │
//! │  Every store call is bounded by `operation_timeout`.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use receipt_core::validation::validate_new_receipt;
use receipt_core::{NewReceipt, Receipt, ReceiptPatch, Violations};
use receipt_db::{DbError, DbResult, ReceiptStore};

/// Default bound on a single storage call.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Errors
// =============================================================================

/// Outcome of a failed service operation.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// One or more field rules failed.
    #[error("Validation failed: {0}")]
    Validation(#[from] Violations),

    /// No receipt with this id (including any id < 1).
    #[error("Record not found: {0}")]
    NotFound(i64),

    /// Any other storage failure, timeouts included.
    #[error("Storage error: {0}")]
    Storage(#[source] DbError),
}

impl ReceiptError {
    /// Classifies a storage error raised while working on `id`.
    fn for_id(err: DbError, id: i64) -> Self {
        if err.is_not_found() {
            ReceiptError::NotFound(id)
        } else {
            ReceiptError::Storage(err)
        }
    }
}

impl From<DbError> for ReceiptError {
    fn from(err: DbError) -> Self {
        ReceiptError::Storage(err)
    }
}

pub type ReceiptResult<T> = Result<T, ReceiptError>;

// =============================================================================
// Service
// =============================================================================

/// Receipt use cases over an injected [`ReceiptStore`].
#[derive(Clone)]
pub struct ReceiptService {
    store: Arc<dyn ReceiptStore>,
    operation_timeout: Duration,
}

impl std::fmt::Debug for ReceiptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptService")
            .field("operation_timeout", &self.operation_timeout)
            .finish_non_exhaustive()
    }
}

impl ReceiptService {
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        ReceiptService {
            store,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Sets the bound applied to every storage call.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Validates and stores a new receipt.
    pub async fn create(&self, candidate: NewReceipt) -> ReceiptResult<Receipt> {
        if let Err(violations) = validate_new_receipt(&candidate) {
            debug!(fields = ?violations.fields(), "Rejected invalid receipt");
            return Err(violations.into());
        }

        let receipt = self.bounded(self.store.insert(&candidate)).await?;

        info!(id = receipt.id, "Receipt created");
        Ok(receipt)
    }

    /// Fetches one receipt.
    pub async fn get(&self, id: i64) -> ReceiptResult<Receipt> {
        ensure_valid_id(id)?;

        self.bounded(self.store.get(id))
            .await
            .map_err(|e| ReceiptError::for_id(e, id))
    }

    /// All receipts, ascending by id.
    pub async fn list(&self) -> ReceiptResult<Vec<Receipt>> {
        Ok(self.bounded(self.store.list()).await?)
    }

    /// Applies a partial update and returns the merged receipt.
    ///
    /// Non-empty patch fields overwrite, everything else is kept. The merged
    /// record is not re-validated.
    pub async fn update(&self, id: i64, patch: ReceiptPatch) -> ReceiptResult<Receipt> {
        ensure_valid_id(id)?;

        let receipt = self
            .bounded(self.store.update(id, &patch))
            .await
            .map_err(|e| ReceiptError::for_id(e, id))?;

        info!(id, "Receipt updated");
        Ok(receipt)
    }

    /// Deletes one receipt and returns its id.
    pub async fn delete(&self, id: i64) -> ReceiptResult<i64> {
        ensure_valid_id(id)?;

        self.bounded(self.store.delete(id))
            .await
            .map_err(|e| ReceiptError::for_id(e, id))?;

        info!(id, "Receipt deleted");
        Ok(id)
    }

    /// Reports whether storage is reachable.
    pub async fn health_check(&self) -> bool {
        tokio::time::timeout(self.operation_timeout, self.store.health_check())
            .await
            .unwrap_or(false)
    }

    async fn bounded<T>(&self, op: impl Future<Output = DbResult<T>>) -> DbResult<T> {
        tokio::time::timeout(self.operation_timeout, op)
            .await
            .map_err(|_| DbError::Timeout(self.operation_timeout))?
    }
}

/// Ids below 1 can never exist; reject them before touching storage.
fn ensure_valid_id(id: i64) -> ReceiptResult<()> {
    if id < 1 {
        debug!(id, "Rejected out-of-range id");
        return Err(ReceiptError::NotFound(id));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
