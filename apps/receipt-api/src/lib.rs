//! # receipt-api: HTTP Surface for Receipts
//!
//! CRUD over a single `receipts` table, served with axum.
//!
//! ## Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs                                                                │
//! │    ApiConfig::load()                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    Database::new(config.db_config())   (fails fast)                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    ReceiptRepository ──► ReceiptService ──► AppState ──► router()       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every dependency is passed in explicitly; there is no global handle.

pub mod config;
pub mod error;
pub mod routes;
pub mod service;

#[cfg(test)]
mod test_support;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ErrorCode};
pub use routes::router;
pub use service::{ReceiptError, ReceiptService};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub receipts: ReceiptService,
}

impl AppState {
    pub fn new(receipts: ReceiptService) -> Self {
        AppState { receipts }
    }
}
