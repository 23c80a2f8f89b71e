/*
 * diagnostics.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Diagnostic collection for field discovery, validation and rendering.
//!
//! Problems found while producing a document never abort it. They are
//! collected here as [`DiagnosticMessage`]s with codes from the catalog in
//! `docforge-error-reporting`.

use crate::fields::FieldConflict;
use crate::validate::RuleViolation;
use docforge_error_reporting::{
    DiagnosticKind, DiagnosticMessage, DiagnosticMessageBuilder, get_error_info,
};

/// Error codes reported by the engine.
pub mod codes {
    /// Section kind the renderer does not support.
    pub const UNSUPPORTED_SECTION_KIND: &str = "D-1-1";
    /// Table section without columns.
    pub const TABLE_WITHOUT_COLUMNS: &str = "D-1-2";
    /// Table rows taken from the shared `tableData` key.
    pub const SHARED_TABLE_DATA: &str = "D-1-3";
    /// Table rows missing, denied, or not a list.
    pub const TABLE_ROWS_UNAVAILABLE: &str = "D-1-4";
    /// Field key declared with different types.
    pub const CONFLICTING_FIELD: &str = "D-2-1";
    /// Required field without a value.
    pub const MISSING_REQUIRED_FIELD: &str = "D-3-1";
    /// Field value breaking a validation rule.
    pub const RULE_VIOLATION: &str = "D-3-2";
}

/// Start a warning titled after its catalog entry.
pub fn catalog_warning(code: &str) -> DiagnosticMessageBuilder {
    let title = get_error_info(code).map_or(code, |info| info.title.as_str());
    DiagnosticMessageBuilder::warning(title).with_code(code)
}

/// Warning for a key declared again with a different type.
pub fn conflict_warning(conflict: &FieldConflict) -> DiagnosticMessage {
    let kept_type = conflict.kept_type.as_str();
    let ignored_type = conflict.ignored_type.as_str();
    catalog_warning(codes::CONFLICTING_FIELD)
        .problem(format!(
            "Field `{}` is declared as {kept_type} and as {ignored_type}",
            conflict.key
        ))
        .add_info(format!(
            "The {kept_type} declaration from {} is used",
            conflict.kept
        ))
        .add_note(format!(
            "The {ignored_type} declaration from {} is ignored",
            conflict.ignored
        ))
        .with_subject(&conflict.key)
        .build()
}

/// Warning for a required field without a value.
pub fn missing_field_warning(key: &str) -> DiagnosticMessage {
    catalog_warning(codes::MISSING_REQUIRED_FIELD)
        .problem(format!("Required field `{key}` has no value"))
        .with_subject(key)
        .build()
}

/// Warning for a value breaking a field rule.
pub fn rule_warning(violation: &RuleViolation) -> DiagnosticMessage {
    catalog_warning(codes::RULE_VIOLATION)
        .problem(violation.to_string())
        .with_subject(&violation.key)
        .build()
}

/// Collector for diagnostic messages.
///
/// In strict mode every warning is recorded as an error.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<DiagnosticMessage>,
    strict: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new(strict: bool) -> Self {
        Self {
            diagnostics: Vec::new(),
            strict,
        }
    }

    /// Add a diagnostic message as-is.
    pub fn add(&mut self, diagnostic: DiagnosticMessage) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning, or an error in strict mode.
    pub fn warn(&mut self, mut diagnostic: DiagnosticMessage) {
        if self.strict && diagnostic.kind == DiagnosticKind::Warning {
            diagnostic.kind = DiagnosticKind::Error;
        }
        self.add(diagnostic);
    }

    /// Add all diagnostics from another collector.
    pub fn extend(&mut self, other: DiagnosticCollector) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Check if any errors were collected (warnings don't count).
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }

    /// Get a reference to the collected diagnostics.
    pub fn diagnostics(&self) -> &[DiagnosticMessage] {
        &self.diagnostics
    }

    /// Consume the collector and return the diagnostics in report order.
    pub fn into_diagnostics(self) -> Vec<DiagnosticMessage> {
        self.diagnostics
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_new() {
        let collector = DiagnosticCollector::new(false);
        assert!(collector.is_empty());
        assert!(!collector.has_errors());
    }

    #[test]
    fn test_warning_stays_warning() {
        let mut collector = DiagnosticCollector::new(false);
        collector.warn(catalog_warning(codes::TABLE_WITHOUT_COLUMNS).build());

        assert!(!collector.has_errors());
        assert_eq!(collector.diagnostics()[0].title, "Table Without Columns");
        assert_eq!(collector.diagnostics()[0].code.as_deref(), Some("D-1-2"));
    }

    #[test]
    fn test_strict_mode_escalates() {
        let mut collector = DiagnosticCollector::new(true);
        collector.warn(catalog_warning(codes::UNSUPPORTED_SECTION_KIND).build());
        assert!(collector.has_errors());
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut first = DiagnosticCollector::new(false);
        first.warn(catalog_warning(codes::CONFLICTING_FIELD).build());
        let mut second = DiagnosticCollector::new(false);
        second.warn(catalog_warning(codes::RULE_VIOLATION).build());

        first.extend(second);
        let codes: Vec<Option<String>> = first
            .into_diagnostics()
            .into_iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(
            codes,
            vec![Some("D-2-1".to_string()), Some("D-3-2".to_string())]
        );
    }

    #[test]
    fn test_conflict_warning_names_both_origins() {
        use crate::fields::FieldOrigin;
        use crate::schema::FieldType;

        let warning = conflict_warning(&FieldConflict {
            key: "total".to_string(),
            kept: FieldOrigin::Global,
            kept_type: FieldType::Number,
            ignored: FieldOrigin::Section("totals".to_string()),
            ignored_type: FieldType::Text,
        });
        assert_eq!(warning.code.as_deref(), Some("D-2-1"));
        assert_eq!(
            warning.problem.as_deref(),
            Some("Field `total` is declared as number and as text")
        );
        assert_eq!(
            warning.details[1].content,
            "The text declaration from section `totals` is ignored"
        );
    }

    #[test]
    fn test_missing_field_warning() {
        let warning = missing_field_warning("invoiceNumber");
        assert_eq!(warning.title, "Missing Required Field");
        assert_eq!(warning.subject.as_deref(), Some("invoiceNumber"));
    }

    #[test]
    fn test_every_engine_code_is_in_the_catalog() {
        for code in [
            codes::UNSUPPORTED_SECTION_KIND,
            codes::TABLE_WITHOUT_COLUMNS,
            codes::SHARED_TABLE_DATA,
            codes::TABLE_ROWS_UNAVAILABLE,
            codes::CONFLICTING_FIELD,
            codes::MISSING_REQUIRED_FIELD,
            codes::RULE_VIOLATION,
        ] {
            assert!(get_error_info(code).is_some(), "{code} missing from catalog");
        }
    }
}
