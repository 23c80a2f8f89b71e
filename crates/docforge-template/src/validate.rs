/*
 * validate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Field validation.
//!
//! Two independent checks, both purely informational:
//!
//! - [`validate`] reports required fields that have no value.
//! - [`check_rules`] reports values that break a field's declared rules
//!   (`min`/`max`/`pattern`, select options, email and phone shape).
//!
//! Neither blocks rendering; callers decide what to do with the result.

use crate::schema::{Field, FieldType};
use crate::value::{DataRecord, DataValue};
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Outcome of the required-field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Keys of required fields without a value, in field order.
    pub missing_fields: Vec<String>,
}

/// Check that every required field has a value.
///
/// A value is missing when it is absent, `null` or `""`. `0` and `false`
/// are values.
pub fn validate(fields: &[Field], data: &DataRecord) -> ValidationResult {
    let missing_fields: Vec<String> = fields
        .iter()
        .filter(|field| field.required && !data.has_value(&field.key))
        .map(|field| field.key.clone())
        .collect();

    ValidationResult {
        is_valid: missing_fields.is_empty(),
        missing_fields,
    }
}

/// A field value that breaks one of the field's rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolation {
    pub key: String,
    pub label: String,
    pub kind: RuleViolationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum RuleViolationKind {
    NotANumber { found: String },
    BelowMinimum { min: f64, actual: f64 },
    AboveMaximum { max: f64, actual: f64 },
    TooShort { min: f64, length: usize },
    TooLong { max: f64, length: usize },
    PatternMismatch { pattern: String },
    InvalidPattern { pattern: String, message: String },
    InvalidEmail,
    InvalidPhone,
    NotAnOption { value: String },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        };
        match &self.kind {
            RuleViolationKind::NotANumber { found } => {
                write!(f, "{name} must be a number, found `{found}`")
            }
            RuleViolationKind::BelowMinimum { min, .. } => {
                write!(f, "{name} must be at least {min}")
            }
            RuleViolationKind::AboveMaximum { max, .. } => {
                write!(f, "{name} must be at most {max}")
            }
            RuleViolationKind::TooShort { min, .. } => {
                write!(f, "{name} must be at least {min} characters long")
            }
            RuleViolationKind::TooLong { max, .. } => {
                write!(f, "{name} must be at most {max} characters long")
            }
            RuleViolationKind::PatternMismatch { pattern } => {
                write!(f, "{name} must match `{pattern}`")
            }
            RuleViolationKind::InvalidPattern { pattern, message } => {
                write!(f, "{name} has an invalid pattern `{pattern}`: {message}")
            }
            RuleViolationKind::InvalidEmail => write!(f, "{name} must be an email address"),
            RuleViolationKind::InvalidPhone => write!(f, "{name} must be a phone number"),
            RuleViolationKind::NotAnOption { value } => {
                write!(f, "{name} must be one of the listed options, found `{value}`")
            }
        }
    }
}

/// Check field values against their declared rules.
///
/// Fields without a value are skipped; missing values are the business of
/// [`validate`].
pub fn check_rules(fields: &[Field], data: &DataRecord) -> Vec<RuleViolation> {
    let mut violations = Vec::new();
    for field in fields {
        let Some(value) = data.get(&field.key).filter(|v| !v.is_empty()) else {
            continue;
        };
        for kind in field_violations(field, value) {
            violations.push(RuleViolation {
                key: field.key.clone(),
                label: field.label.clone(),
                kind,
            });
        }
    }
    violations
}

fn field_violations(field: &Field, value: &DataValue) -> Vec<RuleViolationKind> {
    let mut found = Vec::new();
    let rules = field.validation.clone().unwrap_or_default();

    match &field.field_type {
        FieldType::Number => match value.as_f64() {
            Some(actual) => {
                if let Some(min) = rules.min.filter(|min| actual < *min) {
                    found.push(RuleViolationKind::BelowMinimum { min, actual });
                }
                if let Some(max) = rules.max.filter(|max| actual > *max) {
                    found.push(RuleViolationKind::AboveMaximum { max, actual });
                }
            }
            None => found.push(RuleViolationKind::NotANumber {
                found: value.to_display_string(),
            }),
        },
        field_type if field_type.is_text_like() => {
            let text = value.to_display_string();
            let length = text.chars().count();
            if let Some(min) = rules.min.filter(|min| (length as f64) < *min) {
                found.push(RuleViolationKind::TooShort { min, length });
            }
            if let Some(max) = rules.max.filter(|max| (length as f64) > *max) {
                found.push(RuleViolationKind::TooLong { max, length });
            }
            if let Some(pattern) = &rules.pattern {
                match Regex::new(pattern) {
                    Ok(re) if !re.is_match(&text) => {
                        found.push(RuleViolationKind::PatternMismatch {
                            pattern: pattern.clone(),
                        })
                    }
                    Ok(_) => {}
                    Err(e) => found.push(RuleViolationKind::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    }),
                }
            }
            if *field_type == FieldType::Email && !is_email(&text) {
                found.push(RuleViolationKind::InvalidEmail);
            }
            if *field_type == FieldType::Phone && !is_phone(&text) {
                found.push(RuleViolationKind::InvalidPhone);
            }
        }
        FieldType::Select if !field.options.is_empty() => {
            let text = value.to_display_string();
            if !is_option(field, &text) {
                found.push(RuleViolationKind::NotAnOption { value: text });
            }
        }
        FieldType::Multiselect if !field.options.is_empty() => {
            let chosen: Vec<String> = match value {
                DataValue::List(items) => items.iter().map(DataValue::to_display_string).collect(),
                other => vec![other.to_display_string()],
            };
            for text in chosen {
                if !is_option(field, &text) {
                    found.push(RuleViolationKind::NotAnOption { value: text });
                }
            }
        }
        _ => {}
    }

    found
}

fn is_option(field: &Field, value: &str) -> bool {
    field.options.iter().any(|option| option.value == value)
}

fn is_email(text: &str) -> bool {
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

fn is_phone(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}
