//! # receipt-db: Database Layer for the Receipt Service
//!
//! Storage for receipts. SQLite through sqlx is the production backend; an
//! in-memory map implements the same [`ReceiptStore`] trait for tests and
//! throwaway deployments.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Receipt Data Flow                                │
//! │                                                                         │
//! │  ReceiptService (receipt-api)                                          │
//! │       │  Arc<dyn ReceiptStore>                                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     receipt-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────┐   ┌─────────────┐  │   │
//! │  │   │   Database    │    │   Repositories   │   │ Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                  │   │ (embedded)  │  │   │
//! │  │   │               │    │ ReceiptRepository│   │             │  │   │
//! │  │   │ SqlitePool    │◄───│ InMemoryReceipt- │   │ 001_create_ │  │   │
//! │  │   │               │    │   Store          │   │  receipts   │  │   │
//! │  │   └───────────────┘    └──────────────────┘   └─────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (RECEIPTDB_URI)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use receipt_db::{Database, DbConfig, ReceiptStore};
//!
//! let db = Database::new(DbConfig::new("receipts.db")).await?;
//! let receipt = db.receipts().insert(&candidate).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::memory::InMemoryReceiptStore;
pub use repository::receipt::ReceiptRepository;
pub use repository::ReceiptStore;
