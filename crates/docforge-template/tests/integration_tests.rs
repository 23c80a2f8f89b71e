/*
 * integration_tests.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! End-to-end tests over the templates in `test-fixtures/`.

use docforge_template::{
    DataRecord, FieldType, RenderNode, RenderOptions, RenderedDocument, SignatureLine,
    TableDataFallback, Template, discover, render_document, to_plain_text,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-fixtures")
        .join(name)
}

fn load(name: &str) -> (Template, DataRecord) {
    let template = Template::from_file(&fixture_path(&format!("{name}.template.json")))
        .expect("fixture template should parse");
    let source = std::fs::read_to_string(fixture_path(&format!("{name}.data.json")))
        .expect("fixture data should exist");
    let data = DataRecord::from_json_str(&source).expect("fixture data should parse");
    (template, data)
}

fn section_ids(document: &RenderedDocument) -> Vec<&str> {
    document.nodes.iter().map(RenderNode::section_id).collect()
}

fn codes(document: &RenderedDocument) -> Vec<&str> {
    document
        .diagnostics
        .iter()
        .filter_map(|d| d.code.as_deref())
        .collect()
}

fn field_keys(template: &Template) -> Vec<String> {
    discover(template)
        .fields
        .into_iter()
        .map(|field| field.key)
        .collect()
}

// ============================================================================
// Invoice
// ============================================================================

#[test]
fn test_invoice_fields() {
    let (template, _) = load("invoice");
    assert_eq!(
        field_keys(&template),
        vec![
            "invoiceNumber",
            "invoiceDate",
            "tax",
            "currency",
            "customerName",
            "customerEmail",
            "notes",
            "terms",
            "items",
        ]
    );

    let discovered = discover(&template);
    assert!(discovered.conflicts.is_empty());
    let items = discovered.fields.last().unwrap();
    assert_eq!(items.field_type, FieldType::Table);
    assert_eq!(items.label, "Line Items");
}

#[test]
fn test_invoice_document() {
    let (template, data) = load("invoice");
    let document = render_document(&template, &data, &RenderOptions::default());

    assert!(document.validation.is_valid);
    assert!(document.diagnostics.is_empty(), "{:?}", document.diagnostics);
    assert_eq!(
        section_ids(&document),
        vec!["header", "customer", "items", "sep", "totals", "footer"]
    );

    assert_eq!(document.nodes[0].text(), Some("INVOICE INV-0042"));
    assert_eq!(document.nodes[4].text(), Some("Tax: 0% (EUR)"));
    assert_eq!(
        document.nodes[5].text(),
        Some("Issued on 2025-03-01. Payment due within 30 days.")
    );
}

#[test]
fn test_invoice_table_rows() {
    let (template, data) = load("invoice");
    let document = render_document(&template, &data, &RenderOptions::default());

    let RenderNode::Table(table) = &document.nodes[2] else {
        panic!("expected a table node");
    };
    assert_eq!(table.title.as_deref(), Some("Line Items"));
    assert_eq!(table.header(), &["Description", "Qty", "Price"]);
    assert_eq!(
        table.data_rows(),
        &[
            vec!["Widget".to_string(), "2".to_string(), "10.5".to_string()],
            vec!["Gadget".to_string(), "1".to_string(), "20".to_string()],
        ]
    );
}

#[test]
fn test_invoice_customer_section_omits_empty_email() {
    let (template, data) = load("invoice");
    let document = render_document(&template, &data, &RenderOptions::default());

    let RenderNode::Section(section) = &document.nodes[1] else {
        panic!("expected a section node");
    };
    let lines: Vec<String> = section.field_lines.iter().map(|l| l.text()).collect();
    assert_eq!(lines, vec!["Customer: Acme Corp"]);
}

#[test]
fn test_invoice_notes_shown_when_flag_set() {
    let (template, mut data) = load("invoice");
    data.insert("hasNotes", true);
    let document = render_document(&template, &data, &RenderOptions::default());

    let notes = document
        .nodes
        .iter()
        .find(|node| node.section_id() == "notes")
        .expect("notes section should render");
    assert_eq!(notes.text(), Some("Notes: Leave at reception"));
}

#[test]
fn test_invoice_header_json_shape() {
    let (template, data) = load("invoice");
    let document = render_document(&template, &data, &RenderOptions::default());

    assert_eq!(
        serde_json::to_value(&document.nodes[0]).unwrap(),
        json!({
            "kind": "header",
            "sectionId": "header",
            "resolvedText": "INVOICE INV-0042",
            "styleHints": {"size": 18.0, "weight": "bold", "align": "center"}
        })
    );
}

#[test]
fn test_invoice_missing_number_is_reported_not_fatal() {
    let (template, data) = load("invoice");
    let mut data: DataRecord = data
        .iter()
        .filter(|(key, _)| *key != "invoiceNumber")
        .map(|(key, value)| (key, value.clone()))
        .collect();
    data.insert("tax", 250);

    let document = render_document(&template, &data, &RenderOptions::default());
    assert_eq!(
        document.validation.missing_fields,
        vec!["invoiceNumber".to_string()]
    );
    assert_eq!(codes(&document), vec!["D-3-1", "D-3-2"]);
    assert_eq!(document.nodes[0].text(), Some("INVOICE "));
}

// ============================================================================
// Salary slip: two tables sharing `tableData`
// ============================================================================

#[test]
fn test_salary_slip_shared_rows_warn() {
    let (template, data) = load("salary-slip");
    let document = render_document(&template, &data, &RenderOptions::default());

    assert_eq!(
        section_ids(&document),
        vec!["title", "earnings", "deductions", "approval"]
    );
    assert_eq!(codes(&document), vec!["D-1-3", "D-1-3", "D-1-1"]);

    for node in &document.nodes[1..3] {
        let RenderNode::Table(table) = node else {
            panic!("expected a table node");
        };
        assert_eq!(table.data_rows(), &[vec!["Base".to_string(), "5200".to_string()]]);
    }
}

#[test]
fn test_salary_slip_shared_rows_denied() {
    let (template, data) = load("salary-slip");
    let options = RenderOptions::default().with_table_data_fallback(TableDataFallback::Deny);
    let document = render_document(&template, &data, &options);

    assert_eq!(codes(&document), vec!["D-1-4", "D-1-4", "D-1-1"]);
    for node in &document.nodes[1..3] {
        let RenderNode::Table(table) = node else {
            panic!("expected a table node");
        };
        assert!(table.data_rows().is_empty());
    }
}

#[test]
fn test_salary_slip_signature() {
    let (template, data) = load("salary-slip");
    let document = render_document(&template, &data, &RenderOptions::default());

    let RenderNode::Signature(signature) = document.nodes.last().unwrap() else {
        panic!("expected a signature node");
    };
    assert_eq!(signature.title, "Approved By");
    assert_eq!(
        signature.lines,
        vec![
            SignatureLine::Filled {
                label: "Name".to_string(),
                value: "Ada Lovelace".to_string(),
            },
            SignatureLine::Blank {
                label: "Date".to_string(),
            },
            SignatureLine::Rule,
        ]
    );
}

#[test]
fn test_salary_slip_fields_include_signature_and_tables() {
    let (template, _) = load("salary-slip");
    assert_eq!(
        field_keys(&template),
        vec![
            "employeeName",
            "payPeriod",
            "baseSalary",
            "approverName",
            "approvedOn",
            "earnings",
            "deductions",
        ]
    );
}

// ============================================================================
// Letter: no declared globals, implicit fields only
// ============================================================================

#[test]
fn test_letter_fields_are_implicit() {
    let (template, _) = load("letter");
    let discovered = discover(&template);

    assert_eq!(
        field_keys(&template),
        vec![
            "senderEmail",
            "position",
            "recipientName",
            "companyName",
            "postscript",
            "senderName",
        ]
    );
    let recipient = &discovered.fields[2];
    assert_eq!(recipient.id, "placeholder-recipientName");
    assert_eq!(recipient.label, "Recipient Name");
    assert!(discovered.conflicts.is_empty());
}

#[test]
fn test_letter_preview() {
    let (template, data) = load("letter");
    let document = render_document(&template, &data, &RenderOptions::default());

    assert_eq!(codes(&document), vec!["D-3-2"]);
    assert_eq!(
        to_plain_text(&document.nodes),
        "Dear Hiring Manager,\n\
         \n\
         I am applying for the Compiler Engineer role at Initech.\n\
         \n\
         Jane Doe\n\
         Email: jane@example.com\n\
         Position: Compiler Engineer\n"
    );
}

#[test]
fn test_letter_postscript_shown_when_not_formal() {
    let (template, mut data) = load("letter");
    data.insert("formal", false);
    data.insert("postscript", "Portfolio attached.");

    let document = render_document(&template, &data, &RenderOptions::default());
    assert!(section_ids(&document).contains(&"ps"));
}

#[test]
fn test_rendering_is_deterministic() {
    for name in ["invoice", "salary-slip", "letter"] {
        let (template, data) = load(name);
        let options = RenderOptions::default();
        assert_eq!(
            render_document(&template, &data, &options),
            render_document(&template, &data, &options),
            "{name} rendered differently twice"
        );
    }
}
