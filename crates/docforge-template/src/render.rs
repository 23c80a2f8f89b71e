/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Section renderer.
//!
//! Walks the sections of a template in order, drops the ones whose
//! condition hides them, and dispatches on the section kind to produce one
//! [`RenderNode`] per remaining section.
//!
//! The renderer does not merge field defaults; pass a record that already
//! went through [`crate::merge_with_defaults`], or use
//! [`crate::render_document`] which does both.

use crate::diagnostics::{DiagnosticCollector, catalog_warning, codes};
use crate::fields::humanize;
use crate::node::{
    FieldLine, RenderNode, SEPARATOR_WIDTH, SectionNode, SeparatorNode, SignatureLine,
    SignatureNode, StyleHints, TableNode, TextNode,
};
use crate::options::{RenderOptions, TABLE_DATA_KEY, TableDataFallback};
use crate::placeholder::replace;
use crate::schema::{Field, Section, SectionKind, TableColumn, Template};
use crate::value::{DataRecord, DataValue};
use docforge_error_reporting::DiagnosticMessage;

/// Title of a signature section without one.
const SIGNATURE_TITLE: &str = "Signature";

impl Template {
    /// Render this template against `data` with default options.
    ///
    /// Diagnostics are discarded; use [`Renderer`] to keep them.
    pub fn render(&self, data: &DataRecord) -> Vec<RenderNode> {
        render_sections(self, data)
    }
}

/// Render the sections of `template` against `data` with default options.
pub fn render_sections(template: &Template, data: &DataRecord) -> Vec<RenderNode> {
    Renderer::default().render(template, data).nodes
}

/// Nodes and diagnostics produced by a render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub nodes: Vec<RenderNode>,
    pub diagnostics: Vec<DiagnosticMessage>,
}

/// Section renderer configured with [`RenderOptions`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Renderer { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render every visible section of `template`, in order.
    pub fn render(&self, template: &Template, data: &DataRecord) -> RenderOutput {
        let mut diagnostics = DiagnosticCollector::new(self.options.strict);
        let nodes = self.render_into(template, data, &mut diagnostics);
        RenderOutput {
            nodes,
            diagnostics: diagnostics.into_diagnostics(),
        }
    }

    pub(crate) fn render_into(
        &self,
        template: &Template,
        data: &DataRecord,
        diagnostics: &mut DiagnosticCollector,
    ) -> Vec<RenderNode> {
        let mut nodes = Vec::with_capacity(template.sections.len());
        for section in &template.sections {
            if !is_visible(section, data) {
                tracing::debug!(section = %section.id, "Section hidden by its condition");
                continue;
            }
            if let Some(node) = self.render_section(section, data, diagnostics) {
                nodes.push(node);
            }
        }
        tracing::debug!(
            template = %template.id,
            sections = template.sections.len(),
            nodes = nodes.len(),
            "Rendered template"
        );
        nodes
    }

    fn render_section(
        &self,
        section: &Section,
        data: &DataRecord,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<RenderNode> {
        tracing::trace!(section = %section.id, kind = section.kind.as_str(), "Rendering section");

        match &section.kind {
            SectionKind::Header => Some(RenderNode::Header(text_node(section, data))),
            SectionKind::Body => Some(RenderNode::Body(text_node(section, data))),
            SectionKind::Footer => Some(RenderNode::Footer(text_node(section, data))),
            SectionKind::Section => Some(RenderNode::Section(section_node(section, data))),
            SectionKind::Table => self
                .table_node(section, data, diagnostics)
                .map(RenderNode::Table),
            SectionKind::Separator => Some(RenderNode::Separator(SeparatorNode {
                section_id: section.id.clone(),
                width: SEPARATOR_WIDTH,
            })),
            SectionKind::Signature => Some(RenderNode::Signature(signature_node(section, data))),
            SectionKind::Other(name) => {
                diagnostics.warn(
                    catalog_warning(codes::UNSUPPORTED_SECTION_KIND)
                        .problem(format!("Section `{}` has unsupported kind `{name}`", section.id))
                        .add_info("The section was skipped")
                        .add_hint(
                            "Use one of header, body, footer, section, separator, table or signature?",
                        )
                        .with_subject(&section.id)
                        .build(),
                );
                None
            }
        }
    }

    fn table_node(
        &self,
        section: &Section,
        data: &DataRecord,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<TableNode> {
        if section.columns.is_empty() {
            diagnostics.warn(
                catalog_warning(codes::TABLE_WITHOUT_COLUMNS)
                    .problem(format!("Table section `{}` declares no columns", section.id))
                    .add_info("The section was skipped")
                    .with_subject(&section.id)
                    .build(),
            );
            return None;
        }

        let mut rows = vec![section.columns.iter().map(column_label).collect()];
        match self.table_rows(section, data, diagnostics) {
            Some(DataValue::List(entries)) => {
                rows.extend(entries.iter().map(|entry| table_row(&section.columns, entry)));
            }
            Some(other) => diagnostics.warn(
                catalog_warning(codes::TABLE_ROWS_UNAVAILABLE)
                    .problem(format!(
                        "Rows of table `{}` must be a list, found a {}",
                        section.id,
                        other.type_name()
                    ))
                    .with_subject(&section.id)
                    .build(),
            ),
            None => {}
        }

        Some(TableNode {
            section_id: section.id.clone(),
            title: resolve_optional(section.title.as_deref(), data),
            rows,
            style_hints: style_of(section),
        })
    }

    /// Row data of a table: `data[section.id]`, else the shared rows as the
    /// fallback policy allows.
    fn table_rows<'d>(
        &self,
        section: &Section,
        data: &'d DataRecord,
        diagnostics: &mut DiagnosticCollector,
    ) -> Option<&'d DataValue> {
        if let Some(rows) = data.get_present(&section.id) {
            return Some(rows);
        }

        let Some(shared) = data.get_present(TABLE_DATA_KEY) else {
            diagnostics.warn(
                catalog_warning(codes::TABLE_ROWS_UNAVAILABLE)
                    .problem(format!("No rows found for table `{}`", section.id))
                    .add_hint(format!("Provide the rows under the `{}` key?", section.id))
                    .with_subject(&section.id)
                    .build(),
            );
            return None;
        };

        match self.options.table_data_fallback {
            TableDataFallback::Allow => Some(shared),
            TableDataFallback::Warn => {
                diagnostics.warn(
                    catalog_warning(codes::SHARED_TABLE_DATA)
                        .problem(format!(
                            "Rows of table `{}` were read from `{TABLE_DATA_KEY}`",
                            section.id
                        ))
                        .add_info("Every table without its own rows shows the shared rows")
                        .add_hint(format!("Provide the rows under the `{}` key?", section.id))
                        .with_subject(&section.id)
                        .build(),
                );
                Some(shared)
            }
            TableDataFallback::Deny => {
                diagnostics.warn(
                    catalog_warning(codes::TABLE_ROWS_UNAVAILABLE)
                        .problem(format!("No rows found for table `{}`", section.id))
                        .add_info(format!("Shared `{TABLE_DATA_KEY}` rows are not used"))
                        .add_hint(format!("Provide the rows under the `{}` key?", section.id))
                        .with_subject(&section.id)
                        .build(),
                );
                None
            }
        }
    }
}

/// Whether a section's condition lets it render.
///
/// `showIf` is checked first: the section is skipped when its key is falsy.
/// Then `hideIf`: the section is skipped when its key is truthy. An empty key
/// counts as no condition.
pub fn is_visible(section: &Section, data: &DataRecord) -> bool {
    let Some(conditional) = &section.conditional else {
        return true;
    };
    if let Some(key) = conditional.show_if.as_deref().filter(|k| !k.is_empty()) {
        if !data.is_truthy(key) {
            return false;
        }
    }
    if let Some(key) = conditional.hide_if.as_deref().filter(|k| !k.is_empty()) {
        if data.is_truthy(key) {
            return false;
        }
    }
    true
}

fn style_of(section: &Section) -> StyleHints {
    StyleHints::resolve(&section.kind, section.style.as_ref())
}

/// Resolve optional text, dropping it when nothing is left.
fn resolve_optional(text: Option<&str>, data: &DataRecord) -> Option<String> {
    text.map(|t| replace(t, data)).filter(|t| !t.is_empty())
}

fn text_node(section: &Section, data: &DataRecord) -> TextNode {
    TextNode {
        section_id: section.id.clone(),
        resolved_text: section
            .content
            .as_deref()
            .map(|content| replace(content, data))
            .unwrap_or_default(),
        style_hints: style_of(section),
    }
}

fn section_node(section: &Section, data: &DataRecord) -> SectionNode {
    let field_lines = section
        .fields
        .iter()
        .filter_map(|field| {
            data.get(&field.key)
                .filter(|value| !value.is_empty())
                .map(|value| FieldLine::new(field_label(field), value.to_display_string()))
        })
        .collect();

    SectionNode {
        section_id: section.id.clone(),
        title: resolve_optional(section.title.as_deref(), data),
        resolved_text: resolve_optional(section.content.as_deref(), data),
        field_lines,
        style_hints: style_of(section),
    }
}

fn signature_node(section: &Section, data: &DataRecord) -> SignatureNode {
    let mut lines: Vec<SignatureLine> = section
        .fields
        .iter()
        .map(|field| match data.get(&field.key).filter(|v| !v.is_empty()) {
            Some(value) => SignatureLine::Filled {
                label: field_label(field),
                value: value.to_display_string(),
            },
            None => SignatureLine::Blank {
                label: field_label(field),
            },
        })
        .collect();
    lines.push(SignatureLine::Rule);

    SignatureNode {
        section_id: section.id.clone(),
        title: resolve_optional(section.title.as_deref(), data)
            .unwrap_or_else(|| SIGNATURE_TITLE.to_string()),
        lines,
        style_hints: style_of(section),
    }
}

fn field_label(field: &Field) -> String {
    if field.label.is_empty() {
        humanize(&field.key)
    } else {
        field.label.clone()
    }
}

fn column_label(column: &TableColumn) -> String {
    if column.label.is_empty() {
        humanize(&column.key)
    } else {
        column.label.clone()
    }
}

fn table_row(columns: &[TableColumn], entry: &DataValue) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            entry
                .get(&column.key)
                .map(DataValue::to_display_string)
                .unwrap_or_default()
        })
        .collect()
}
