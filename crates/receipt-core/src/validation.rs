//! # Validation Module
//!
//! Field rules for new receipts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP decode (axum Json extractor)                            │
//! │  └── Malformed JSON, wrong types → DecodeError                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── title: required, ≤ 500 chars                                      │
//! │  ├── author: required, ≤ 500 chars                                     │
//! │  └── description: required                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL constraints                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule runs on every call. A candidate with three bad fields gets
//! three violations back, not one.
//!
//! ## Usage
//! ```rust
//! use receipt_core::validation::validate_new_receipt;
//! use receipt_core::NewReceipt;
//!
//! let ok = NewReceipt::new("Kruto", "Chelovek", "Delai chto hochesh");
//! assert!(validate_new_receipt(&ok).is_ok());
//!
//! let bad = NewReceipt::new("", "", "kuku");
//! let violations = validate_new_receipt(&bad).unwrap_err();
//! assert_eq!(violations.fields(), vec!["title", "author"]);
//! ```

use crate::error::{ValidationError, Violations};
use crate::types::NewReceipt;
use crate::MAX_TEXT_FIELD_CHARS;

/// Result type for validation operations.
pub type ValidationResult = Result<(), Violations>;

/// Checks every field rule of a create candidate.
pub fn validate_new_receipt(candidate: &NewReceipt) -> ValidationResult {
    let mut violations = Violations::new();

    check_bounded_text(&mut violations, "title", &candidate.title);
    check_bounded_text(&mut violations, "author", &candidate.author);
    check_required(&mut violations, "description", &candidate.description);

    violations.into_result()
}

/// Required and at most [`MAX_TEXT_FIELD_CHARS`] code points.
fn check_bounded_text(violations: &mut Violations, field: &str, value: &str) {
    check_required(violations, field, value);
    violations.check(value.chars().count() <= MAX_TEXT_FIELD_CHARS, || {
        ValidationError::too_long(field, MAX_TEXT_FIELD_CHARS)
    });
}

fn check_required(violations: &mut Violations, field: &str, value: &str) {
    violations.check(!value.is_empty(), || ValidationError::required(field));
}

// =============================================================================
// Unit Tests
// =============================================================================
