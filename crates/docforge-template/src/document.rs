/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The full document pipeline.
//!
//! [`render_document`] runs every step a caller usually wants, in order:
//!
//! 1. discover fields, reporting conflicting declarations
//! 2. merge field defaults under the caller's data
//! 3. check required fields and validation rules
//! 4. render the sections against the merged record
//!
//! Validation never blocks rendering. Its findings come back as
//! diagnostics next to the nodes.

use crate::defaults::merge_with_defaults;
use crate::diagnostics::{
    DiagnosticCollector, conflict_warning, missing_field_warning, rule_warning,
};
use crate::fields::discover;
use crate::node::RenderNode;
use crate::options::RenderOptions;
use crate::render::Renderer;
use crate::schema::{Field, Template};
use crate::validate::{RuleViolation, ValidationResult, check_rules, validate};
use crate::value::DataRecord;
use docforge_error_reporting::DiagnosticMessage;
use serde::Serialize;

/// Everything produced for one template and data record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    /// Discovered fields, in precedence order.
    pub fields: Vec<Field>,
    /// The record the sections were rendered against.
    pub data: DataRecord,
    pub validation: ValidationResult,
    pub violations: Vec<RuleViolation>,
    pub nodes: Vec<RenderNode>,
    pub diagnostics: Vec<DiagnosticMessage>,
}

impl RenderedDocument {
    /// Whether any diagnostic is an error. Only strict mode produces them.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(DiagnosticMessage::is_error)
    }
}

/// The checked inputs of a render: fields, the merged record and what
/// validation found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckedDocument {
    pub fields: Vec<Field>,
    pub data: DataRecord,
    pub validation: ValidationResult,
    pub violations: Vec<RuleViolation>,
}

/// Discover fields, merge defaults and validate `data`, without rendering.
///
/// Conflicts, missing fields and rule violations are reported to
/// `diagnostics` as warnings.
pub fn check_document(
    template: &Template,
    data: &DataRecord,
    options: &RenderOptions,
    diagnostics: &mut DiagnosticCollector,
) -> CheckedDocument {
    let discovered = discover(template);
    for conflict in &discovered.conflicts {
        diagnostics.warn(conflict_warning(conflict));
    }

    let merged = if options.merge_defaults {
        merge_with_defaults(&discovered.fields, data)
    } else {
        data.clone()
    };

    let validation = validate(&discovered.fields, &merged);
    for key in &validation.missing_fields {
        diagnostics.warn(missing_field_warning(key));
    }

    let violations = if options.check_rules {
        check_rules(&discovered.fields, &merged)
    } else {
        Vec::new()
    };
    for violation in &violations {
        diagnostics.warn(rule_warning(violation));
    }

    CheckedDocument {
        fields: discovered.fields,
        data: merged,
        validation,
        violations,
    }
}

/// Discover, merge defaults, validate and render `template` against `data`.
pub fn render_document(
    template: &Template,
    data: &DataRecord,
    options: &RenderOptions,
) -> RenderedDocument {
    let mut diagnostics = DiagnosticCollector::new(options.strict);
    let checked = check_document(template, data, options, &mut diagnostics);
    let nodes =
        Renderer::new(options.clone()).render_into(template, &checked.data, &mut diagnostics);

    tracing::debug!(
        template = %template.id,
        fields = checked.fields.len(),
        nodes = nodes.len(),
        diagnostics = diagnostics.diagnostics().len(),
        "Rendered document"
    );

    RenderedDocument {
        fields: checked.fields,
        data: checked.data,
        validation: checked.validation,
        violations: checked.violations,
        nodes,
        diagnostics: diagnostics.into_diagnostics(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, Section, SectionKind, ValidationRules};
    use crate::value::DataValue;
    use docforge_error_reporting::DiagnosticKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn codes_of(document: &RenderedDocument) -> Vec<&str> {
        document
            .diagnostics
            .iter()
            .filter_map(|d| d.code.as_deref())
            .collect()
    }

    fn letter() -> Template {
        let mut greeting = Section::new("greeting", SectionKind::Body);
        greeting.content = Some("Dear {{name}}, your total is {{total}}.".to_string());
        Template {
            id: "letter".to_string(),
            name: "Letter".to_string(),
            version: 1,
            sections: vec![greeting],
            fields: vec![
                Field::new("f1", "name", "Name", FieldType::Text).required(),
                Field::new("f2", "total", "Total", FieldType::Number).with_default(0),
            ],
        }
    }

    #[test]
    fn test_defaults_are_rendered() {
        let data = DataRecord::from_json_value(json!({"name": "Acme"})).unwrap();
        let document = render_document(&letter(), &data, &RenderOptions::default());

        assert_eq!(
            document.nodes[0].text(),
            Some("Dear Acme, your total is 0.")
        );
        assert!(document.validation.is_valid);
        assert!(document.diagnostics.is_empty());
    }

    #[test]
    fn test_defaults_can_be_disabled() {
        let data = DataRecord::from_json_value(json!({"name": "Acme"})).unwrap();
        let options = RenderOptions::default().with_merge_defaults(false);
        let document = render_document(&letter(), &data, &options);

        assert_eq!(document.nodes[0].text(), Some("Dear Acme, your total is ."));
        assert_eq!(document.data, data);
    }

    #[test]
    fn test_missing_required_field_still_renders() {
        let document = render_document(&letter(), &DataRecord::new(), &RenderOptions::default());

        assert_eq!(document.validation.missing_fields, vec!["name".to_string()]);
        assert_eq!(codes_of(&document), vec!["D-3-1"]);
        assert_eq!(document.nodes.len(), 1);
        assert!(!document.has_errors());
    }

    #[test]
    fn test_rule_violations_are_reported() {
        let mut template = letter();
        template.fields[1].validation = Some(ValidationRules {
            min: Some(1.0),
            ..ValidationRules::default()
        });
        let data = DataRecord::from_json_value(json!({"name": "Acme", "total": -5})).unwrap();

        let document = render_document(&template, &data, &RenderOptions::default());
        assert_eq!(document.violations.len(), 1);
        assert_eq!(codes_of(&document), vec!["D-3-2"]);
        assert_eq!(document.diagnostics[0].subject.as_deref(), Some("total"));

        let mut options = RenderOptions::default();
        options.check_rules = false;
        let unchecked = render_document(&template, &data, &options);
        assert!(unchecked.violations.is_empty());
        assert!(unchecked.diagnostics.is_empty());
    }

    #[test]
    fn test_conflicting_declarations_are_reported() {
        let mut template = letter();
        let mut totals = Section::new("totals", SectionKind::Section);
        totals.fields = vec![Field::new("s1", "total", "Total", FieldType::Text)];
        template.sections.push(totals);

        let data = DataRecord::from_json_value(json!({"name": "Acme"})).unwrap();
        let document = render_document(&template, &data, &RenderOptions::default());

        assert_eq!(codes_of(&document), vec!["D-2-1"]);
        let total = document.fields.iter().find(|f| f.key == "total").unwrap();
        assert_eq!(total.field_type, FieldType::Number);
    }

    #[test]
    fn test_strict_mode_turns_findings_into_errors() {
        let options = RenderOptions::default().with_strict(true);
        let document = render_document(&letter(), &DataRecord::new(), &options);

        assert!(document.has_errors());
        assert_eq!(document.diagnostics[0].kind, DiagnosticKind::Error);
        assert_eq!(document.nodes.len(), 1);
    }

    #[test]
    fn test_check_document_does_not_render() {
        let mut template = letter();
        template
            .sections
            .push(Section::new("chart", SectionKind::Other("chart".to_string())));

        let mut diagnostics = DiagnosticCollector::new(false);
        let checked = check_document(
            &template,
            &DataRecord::new(),
            &RenderOptions::default(),
            &mut diagnostics,
        );

        assert_eq!(checked.validation.missing_fields, vec!["name".to_string()]);
        assert_eq!(checked.data.get("total"), Some(&DataValue::from(0)));
        let codes: Vec<&str> = diagnostics
            .diagnostics()
            .iter()
            .filter_map(|d| d.code.as_deref())
            .collect();
        assert_eq!(codes, vec!["D-3-1"]);
    }

    #[test]
    fn test_caller_data_is_not_mutated() {
        let data = DataRecord::from_json_value(json!({"name": "Acme"})).unwrap();
        let before = data.clone();
        let _ = render_document(&letter(), &data, &RenderOptions::default());
        assert_eq!(data, before);
    }
}
