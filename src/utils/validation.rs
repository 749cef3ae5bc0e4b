//! Payload validation utilities
//!
//! Field-level validation for mutation payloads. Violations are collected
//! per field so callers can surface them next to the offending input.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Collected validation failures for a payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Finish validation, turning collected failures into an error
    pub fn into_result(self) -> crate::utils::errors::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::utils::errors::ShepherdError::Validation(self))
        }
    }

    /// Require a non-empty, non-blank string
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", field));
        }
    }

    /// Enforce a maximum character length
    pub fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("{} must be at most {} characters", field, max));
        }
    }

    /// Validate an email address format
    pub fn email(&mut self, field: &str, value: &str) {
        if !is_valid_email(value) {
            self.add(field, format!("{} is not a valid email address", field));
        }
    }

    /// Validate a phone number format, if present
    pub fn phone(&mut self, field: &str, value: &str) {
        if !is_valid_phone(value) {
            self.add(field, format!("{} is not a valid phone number", field));
        }
    }

    /// Require an integer value within an inclusive range
    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.add(
                field,
                format!("{} must be between {} and {}", field, min, max),
            );
        }
    }

    /// Require a strictly positive integer
    pub fn positive(&mut self, field: &str, value: i64) {
        if value <= 0 {
            self.add(field, format!("{} must be positive", field));
        }
    }

    /// Require a non-negative integer
    pub fn non_negative(&mut self, field: &str, value: i64) {
        if value < 0 {
            self.add(field, format!("{} must not be negative", field));
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9\s\-()]{5,19}$").unwrap())
}

/// Check email address format
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Check phone number format
pub fn is_valid_phone(value: &str) -> bool {
    phone_regex().is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    use crate::utils::errors::ShepherdError;

    #[test]
    fn test_valid_payload_passes() {
        let mut v = ValidationErrors::new();
        v.require("name", "Grace Fellowship");
        v.email("email", "office@gracefellowship.org");
        v.range("progress", 40, 0, 100);
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn test_missing_required_field_is_reported_per_field() {
        let mut v = ValidationErrors::new();
        v.require("first_name", "  ");
        v.require("last_name", "Okafor");
        let err = v.into_result().unwrap_err();
        assert_matches!(err, ShepherdError::Validation(errors) => {
            assert_eq!(errors.errors.len(), 1);
            assert_eq!(errors.errors[0].field, "first_name");
        });
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("pastor@church.org"));
        assert!(!is_valid_email("pastor@church"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two words@church.org"));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("+1 (555) 010-2233"));
        assert!(is_valid_phone("0712345678"));
        assert!(!is_valid_phone("call me"));
        assert!(!is_valid_phone("12"));
    }

    #[test]
    fn test_range_collects_all_violations() {
        let mut v = ValidationErrors::new();
        v.range("progress", 140, 0, 100);
        v.positive("max_capacity", 0);
        v.non_negative("budget_used", -5);
        assert_eq!(v.errors.len(), 3);
    }
}
