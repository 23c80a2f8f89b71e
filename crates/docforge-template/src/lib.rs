/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Schema-driven document template engine.
//!
//! A [`Template`] describes a document declaratively: an ordered list of
//! [`Section`]s (header, body, tables, signatures, ...) and the typed
//! [`Field`]s a user fills in. This crate resolves a template against a
//! runtime [`DataRecord`] into a list of presentation-agnostic
//! [`RenderNode`]s, which a drawing layer turns into PDF or HTML.
//!
//! The engine supports:
//!
//! - Placeholders in section text: `{{key}}` or `{{key.Default text}}`
//! - Implicit field discovery from placeholders that were never declared
//! - Default values layered under caller data
//! - Required-field and rule validation
//! - Conditional sections: `showIf` / `hideIf`
//!
//! # Architecture
//!
//! Every operation is a pure function of its inputs. Nothing is cached and
//! nothing is mutated, so the renderer can be called on every keystroke of a
//! live preview or from many request handlers at once.
//!
//! Rendering is best-effort: malformed placeholders stay literal, unknown
//! section kinds are skipped, and problems are reported as diagnostics
//! instead of errors. [`TemplateError`] is reserved for inputs of the wrong
//! shape (e.g. a data record that is not a JSON object).
//!
//! # Example
//!
//! ```
//! use docforge_template::{DataRecord, RenderOptions, Template, render_document};
//!
//! let template = Template::from_json_str(r#"{
//!     "id": "letter",
//!     "name": "Letter",
//!     "sections": [
//!         {"id": "greeting", "kind": "body", "content": "Dear {{name.Customer}},"}
//!     ]
//! }"#)?;
//!
//! let data = DataRecord::from_json_str(r#"{"name": "Acme"}"#)?;
//! let document = render_document(&template, &data, &RenderOptions::default());
//!
//! assert_eq!(document.nodes.len(), 1);
//! assert_eq!(document.nodes[0].text(), Some("Dear Acme,"));
//! # Ok::<(), docforge_template::TemplateError>(())
//! ```

pub mod defaults;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod fields;
pub mod node;
pub mod options;
pub mod placeholder;
pub mod render;
pub mod schema;
pub mod text;
pub mod validate;
pub mod value;

// Re-export main types at crate root
pub use defaults::merge_with_defaults;
pub use diagnostics::{
    DiagnosticCollector, conflict_warning, missing_field_warning, rule_warning,
};
pub use document::{CheckedDocument, RenderedDocument, check_document, render_document};
pub use error::{TemplateError, TemplateResult};
pub use fields::{DiscoveredFields, FieldConflict, FieldOrigin, discover, discover_fields, humanize};
pub use node::{
    FieldLine, RenderNode, SectionNode, SeparatorNode, SignatureLine, SignatureNode, StyleHints,
    TableNode, TextNode,
};
pub use options::{RenderOptions, TableDataFallback};
pub use placeholder::{Placeholder, extract_keys, placeholders, replace};
pub use render::{RenderOutput, Renderer, is_visible, render_sections};
pub use schema::{
    Align, ColumnType, Conditional, Field, FieldOption, FieldType, FontWeight, Margins, Section,
    SectionKind, SectionStyle, TableColumn, Template, ValidationRules,
};
pub use text::to_plain_text;
pub use validate::{RuleViolation, RuleViolationKind, ValidationResult, check_rules, validate};
pub use value::{DataRecord, DataValue};
