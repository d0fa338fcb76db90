//! # Domain Types
//!
//! The receipt record and the payloads that create and patch it.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   NewReceipt    │   │    Receipt      │   │  ReceiptPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  title          │──►│  id (storage)   │◄──│  title?         │       │
//! │  │  author         │   │  title          │   │  author?        │       │
//! │  │  description    │   │  author         │   │  description?   │       │
//! │  └─────────────────┘   │  description    │   └─────────────────┘       │
//! │    create payload      │  created_at     │     update payload          │
//! │                        │  updated_at     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Receipt
// =============================================================================

/// A persisted receipt.
///
/// `id`, `created_at` and `updated_at` are always assigned by storage.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Storage-assigned identifier, always >= 1.
    pub id: i64,

    pub title: String,

    pub author: String,

    pub description: String,

    /// Set once at insertion.
    pub created_at: DateTime<Utc>,

    /// Set at insertion and refreshed on every update.
    pub updated_at: DateTime<Utc>,
}

impl Receipt {
    /// Merges `patch` into this receipt.
    ///
    /// Only non-empty patch fields overwrite; everything else, including
    /// the id and both timestamps, is left alone. No validation is run on
    /// the result.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use receipt_core::{Receipt, ReceiptPatch};
    ///
    /// let mut receipt = Receipt {
    ///     id: 1,
    ///     title: "A".into(),
    ///     author: "B".into(),
    ///     description: "C".into(),
    ///     created_at: Utc::now(),
    ///     updated_at: Utc::now(),
    /// };
    ///
    /// receipt.apply_patch(&ReceiptPatch {
    ///     title: Some("X".into()),
    ///     author: Some(String::new()),
    ///     description: None,
    /// });
    ///
    /// assert_eq!(receipt.title, "X");
    /// assert_eq!(receipt.author, "B");
    /// assert_eq!(receipt.description, "C");
    /// ```
    pub fn apply_patch(&mut self, patch: &ReceiptPatch) {
        if let Some(title) = patch.title() {
            self.title = title.to_string();
        }
        if let Some(author) = patch.author() {
            self.author = author.to_string();
        }
        if let Some(description) = patch.description() {
            self.description = description.to_string();
        }
    }
}

// =============================================================================
// NewReceipt
// =============================================================================

/// Create payload.
///
/// Missing JSON fields decode as empty strings so they are reported by
/// validation rather than rejected by the decoder. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewReceipt {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl NewReceipt {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        NewReceipt {
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// ReceiptPatch
// =============================================================================

/// Update payload: any subset of the editable fields.
///
/// An empty string means "keep the stored value", same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ReceiptPatch {
    /// The replacement title, if one was supplied and is non-empty.
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    /// The replacement author, if one was supplied and is non-empty.
    pub fn author(&self) -> Option<&str> {
        non_empty(&self.author)
    }

    /// The replacement description, if one was supplied and is non-empty.
    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// True when applying this patch would change no field.
    pub fn is_empty(&self) -> bool {
        self.title().is_none() && self.author().is_none() && self.description().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
