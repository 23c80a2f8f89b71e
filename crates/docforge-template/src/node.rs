/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render nodes: the renderer's output.
//!
//! One node per visible section, in section order. Nodes carry resolved
//! text and style hints only; measuring, wrapping and paginating them is the
//! job of the drawing layer that consumes them.

use crate::schema::{Align, FontWeight, Margins, SectionKind, SectionStyle};
use serde::{Deserialize, Serialize};

/// Width of a separator, in characters of the plain-text preview.
pub const SEPARATOR_WIDTH: usize = 50;

/// The resolved output for one visible section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderNode {
    Header(TextNode),
    Body(TextNode),
    Footer(TextNode),
    Section(SectionNode),
    Table(TableNode),
    Separator(SeparatorNode),
    Signature(SignatureNode),
}

impl RenderNode {
    /// Id of the section this node was rendered from.
    pub fn section_id(&self) -> &str {
        match self {
            RenderNode::Header(node) | RenderNode::Body(node) | RenderNode::Footer(node) => {
                &node.section_id
            }
            RenderNode::Section(node) => &node.section_id,
            RenderNode::Table(node) => &node.section_id,
            RenderNode::Separator(node) => &node.section_id,
            RenderNode::Signature(node) => &node.section_id,
        }
    }

    /// The section kind this node was rendered from.
    pub fn kind(&self) -> SectionKind {
        match self {
            RenderNode::Header(_) => SectionKind::Header,
            RenderNode::Body(_) => SectionKind::Body,
            RenderNode::Footer(_) => SectionKind::Footer,
            RenderNode::Section(_) => SectionKind::Section,
            RenderNode::Table(_) => SectionKind::Table,
            RenderNode::Separator(_) => SectionKind::Separator,
            RenderNode::Signature(_) => SectionKind::Signature,
        }
    }

    /// The resolved body text, for nodes that have one.
    pub fn text(&self) -> Option<&str> {
        match self {
            RenderNode::Header(node) | RenderNode::Body(node) | RenderNode::Footer(node) => {
                Some(&node.resolved_text)
            }
            RenderNode::Section(node) => node.resolved_text.as_deref(),
            _ => None,
        }
    }

    /// Style hints, for nodes that carry text.
    pub fn style_hints(&self) -> Option<&StyleHints> {
        match self {
            RenderNode::Header(node) | RenderNode::Body(node) | RenderNode::Footer(node) => {
                Some(&node.style_hints)
            }
            RenderNode::Section(node) => Some(&node.style_hints),
            RenderNode::Table(node) => Some(&node.style_hints),
            RenderNode::Signature(node) => Some(&node.style_hints),
            RenderNode::Separator(_) => None,
        }
    }
}

/// Header, body and footer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub section_id: String,
    pub resolved_text: String,
    pub style_hints: StyleHints,
}

/// Output of a `section` section: optional title and text plus one line per
/// field that has a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNode {
    pub section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_text: Option<String>,
    pub field_lines: Vec<FieldLine>,
    pub style_hints: StyleHints,
}

/// A `label: value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLine {
    pub label: String,
    pub value: String,
}

impl FieldLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        FieldLine {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Table output. `rows[0]` is the header row of column labels; the rest are
/// data rows in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableNode {
    pub section_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rows: Vec<Vec<String>>,
    pub style_hints: StyleHints,
}

impl TableNode {
    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparatorNode {
    pub section_id: String,
    pub width: usize,
}

/// Signature block output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureNode {
    pub section_id: String,
    pub title: String,
    /// Field lines followed by a single [`SignatureLine::Rule`].
    pub lines: Vec<SignatureLine>,
    pub style_hints: StyleHints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "line", rename_all = "camelCase")]
pub enum SignatureLine {
    /// A field with a value: `label: value`.
    Filled { label: String, value: String },
    /// A field without a value: `label: ` followed by a blank to write on.
    Blank { label: String },
    /// The line to sign on.
    Rule,
}

/// Resolved typography hints for the drawing layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleHints {
    pub size: f64,
    pub weight: FontWeight,
    pub align: Align,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
}

impl StyleHints {
    /// Default style of a section kind, before section overrides.
    pub fn defaults_for(kind: &SectionKind) -> StyleHints {
        let (size, weight, align) = match kind {
            SectionKind::Header => (18.0, FontWeight::Bold, Align::Center),
            SectionKind::Footer | SectionKind::Table => (10.0, FontWeight::Normal, Align::Left),
            _ => (12.0, FontWeight::Normal, Align::Left),
        };
        StyleHints {
            size,
            weight,
            align,
            margins: None,
        }
    }

    /// Default style of `kind` with the section's overrides applied.
    pub fn resolve(kind: &SectionKind, style: Option<&SectionStyle>) -> StyleHints {
        let defaults = Self::defaults_for(kind);
        let Some(style) = style else {
            return defaults;
        };
        StyleHints {
            size: style.size.unwrap_or(defaults.size),
            weight: style.weight.unwrap_or(defaults.weight),
            align: style.align.unwrap_or(defaults.align),
            margins: style.margins.or(defaults.margins),
        }
    }
}
