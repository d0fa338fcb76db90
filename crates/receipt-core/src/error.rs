//! # Error Types
//!
//! Validation error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── ValidationError  - One field violation (field + message)          │
//! │  └── Violations       - Every violation found for one candidate        │
//! │                                                                         │
//! │  receipt-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  receipt-api errors                                                    │
//! │  ├── ReceiptError     - Service outcome (validation/not found/storage) │
//! │  └── ApiError         - What HTTP clients see (status + JSON)          │
//! │                                                                         │
//! │  Flow: Violations → ReceiptError → ApiError → HTTP response            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// A single field violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} must be provided")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must not be more than {max} characters long")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a TooLong error for the given field.
    pub fn too_long(field: impl Into<String>, max: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field } | ValidationError::TooLong { field, .. } => field,
        }
    }
}

// =============================================================================
// Violations
// =============================================================================

/// The full set of violations found for one candidate.
///
/// Holds at most one violation per field, in the order the rules ran.
/// Serializes as a `{ field: message }` map for API responses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<ValidationError>);

impl Violations {
    /// Creates an empty set.
    pub fn new() -> Self {
        Violations(Vec::new())
    }

    /// Records `error` unless its field already has a violation.
    pub fn push(&mut self, error: ValidationError) {
        if !self.contains_field(error.field()) {
            self.0.push(error);
        }
    }

    /// Records `error` when `ok` is false.
    pub fn check(&mut self, ok: bool, error: impl FnOnce() -> ValidationError) {
        if !ok {
            self.push(error());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns true if `field` already has a recorded violation.
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    /// Names of all fields with a violation.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(ValidationError::field).collect()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl Serialize for Violations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for error in &self.0 {
            map.serialize_entry(error.field(), &error.to_string())?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("title");
        assert_eq!(err.to_string(), "title must be provided");

        let err = ValidationError::too_long("author", 500);
        assert_eq!(
            err.to_string(),
            "author must not be more than 500 characters long"
        );
    }

    #[test]
    fn test_one_violation_per_field() {
        let mut violations = Violations::new();
        violations.push(ValidationError::required("title"));
        violations.push(ValidationError::too_long("title", 500));
        violations.push(ValidationError::required("author"));

        assert_eq!(violations.len(), 2);
        assert_eq!(violations.fields(), vec!["title", "author"]);
        assert!(matches!(
            violations.iter().next(),
            Some(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_display_joins_messages() {
        let mut violations = Violations::new();
        violations.push(ValidationError::required("title"));
        violations.push(ValidationError::required("description"));

        assert_eq!(
            violations.to_string(),
            "title must be provided; description must be provided"
        );
    }

    #[test]
    fn test_serializes_as_field_map() {
        let mut violations = Violations::new();
        violations.check(false, || ValidationError::required("author"));
        violations.check(true, || ValidationError::required("title"));

        let json = serde_json::to_value(&violations).unwrap();
        assert_eq!(json, serde_json::json!({ "author": "author must be provided" }));
    }

    #[test]
    fn test_into_result() {
        assert!(Violations::new().into_result().is_ok());

        let mut violations = Violations::new();
        violations.push(ValidationError::required("title"));
        assert!(violations.into_result().is_err());
    }
}
