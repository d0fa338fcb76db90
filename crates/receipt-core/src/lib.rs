//! # receipt-core: Entity Model and Validation
//!
//! Pure domain code for the receipt service: the [`Receipt`] record, the
//! request shapes that create and patch it, and the field rules a new
//! receipt must satisfy.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Service Layers                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                receipt-api (axum routes)                        │   │
//! │  │     POST /receipts/create, PATCH /receipts/update/{id}, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                receipt-api (ReceiptService)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ receipt-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │ validation│  │   error   │                  │   │
//! │  │   │  Receipt  │  │   rules   │  │ Violations│                  │   │
//! │  │   │  Patch    │  │           │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                receipt-db (SQLite repository)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::{validation::validate_new_receipt, NewReceipt};
//!
//! let candidate = NewReceipt::default();
//! let violations = validate_new_receipt(&candidate).unwrap_err();
//!
//! // Every rule is checked, not just the first one
//! assert_eq!(violations.len(), 3);
//! ```

pub mod error;
pub mod types;
pub mod validation;

pub use error::{ValidationError, Violations};
pub use types::*;

/// Maximum length of `title` and `author`, in Unicode code points.
pub const MAX_TEXT_FIELD_CHARS: usize = 500;
