/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Plain-text preview of render nodes.
//!
//! A monospace approximation of the drawn document, used by the CLI and in
//! tests. Each node becomes one block of lines; blocks are separated by a
//! blank line and empty blocks are dropped.
//!
//! Alignment hints are honored against [`SEPARATOR_WIDTH`]. Size and weight
//! hints have no plain-text form and are ignored.

use crate::node::{FieldLine, RenderNode, SEPARATOR_WIDTH, SignatureLine, SignatureNode, TableNode};
use crate::schema::Align;

/// Width of the blank a signature field is written on.
const BLANK_WIDTH: usize = 20;

/// Width of the line a signature goes on.
const SIGNATURE_RULE_WIDTH: usize = 30;

/// Render nodes as plain text.
pub fn to_plain_text(nodes: &[RenderNode]) -> String {
    let blocks: Vec<String> = nodes
        .iter()
        .map(block)
        .filter(|block| !block.is_empty())
        .collect();

    if blocks.is_empty() {
        return String::new();
    }
    let mut text = blocks.join("\n\n");
    text.push('\n');
    text
}

fn block(node: &RenderNode) -> String {
    match node {
        RenderNode::Header(node) | RenderNode::Body(node) | RenderNode::Footer(node) => {
            align_lines(&node.resolved_text, node.style_hints.align)
        }
        RenderNode::Section(node) => {
            let mut lines: Vec<String> = Vec::new();
            lines.extend(node.title.iter().cloned());
            lines.extend(node.resolved_text.iter().cloned());
            lines.extend(node.field_lines.iter().map(FieldLine::text));
            lines.join("\n")
        }
        RenderNode::Table(node) => table_block(node),
        RenderNode::Separator(node) => "-".repeat(node.width),
        RenderNode::Signature(node) => signature_block(node),
    }
}

fn align_lines(text: &str, align: Align) -> String {
    text.lines()
        .map(|line| {
            let free = SEPARATOR_WIDTH.saturating_sub(line.chars().count());
            let pad = match align {
                Align::Left => 0,
                Align::Center => free / 2,
                Align::Right => free,
            };
            format!("{}{line}", " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table_block(node: &TableNode) -> String {
    let columns = node.header().len();
    let mut widths = vec![0; columns];
    for row in &node.rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    // Trailing empty cells are dropped along with their separators.
    let format_row = |row: &[String]| {
        let filled = row
            .iter()
            .rposition(|cell| !cell.is_empty())
            .map_or(0, |i| i + 1);
        row[..filled]
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines: Vec<String> = Vec::with_capacity(node.rows.len() + 2);
    lines.extend(node.title.iter().cloned());
    lines.push(format_row(node.header()));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(node.data_rows().iter().map(|row| format_row(row)));
    lines.join("\n")
}

fn signature_block(node: &SignatureNode) -> String {
    let mut lines = vec![node.title.clone()];
    lines.extend(node.lines.iter().map(|line| match line {
        SignatureLine::Filled { label, value } => format!("{label}: {value}"),
        SignatureLine::Blank { label } => format!("{label}: {}", "_".repeat(BLANK_WIDTH)),
        SignatureLine::Rule => "_".repeat(SIGNATURE_RULE_WIDTH),
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{SectionNode, SeparatorNode, StyleHints, TextNode};
    use crate::schema::SectionKind;
    use pretty_assertions::assert_eq;

    fn text_node(kind: SectionKind, text: &str) -> TextNode {
        TextNode {
            section_id: kind.as_str().to_string(),
            resolved_text: text.to_string(),
            style_hints: StyleHints::defaults_for(&kind),
        }
    }

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_plain_text(&[]), "");
    }

    #[test]
    fn test_header_is_centered() {
        let nodes = [RenderNode::Header(text_node(SectionKind::Header, "INVOICE"))];
        assert_eq!(to_plain_text(&nodes), format!("{}INVOICE\n", " ".repeat(21)));
    }

    #[test]
    fn test_right_alignment() {
        let mut node = text_node(SectionKind::Body, "Total: 30");
        node.style_hints.align = Align::Right;
        assert_eq!(
            to_plain_text(&[RenderNode::Body(node)]),
            format!("{}Total: 30\n", " ".repeat(41))
        );
    }

    #[test]
    fn test_empty_body_is_dropped() {
        let nodes = [
            RenderNode::Body(text_node(SectionKind::Body, "First")),
            RenderNode::Body(text_node(SectionKind::Body, "")),
            RenderNode::Footer(text_node(SectionKind::Footer, "Last")),
        ];
        assert_eq!(to_plain_text(&nodes), "First\n\nLast\n");
    }

    #[test]
    fn test_table_rows_with_empty_cells() {
        let nodes = [RenderNode::Table(TableNode {
            section_id: "items".to_string(),
            title: None,
            rows: vec![
                strings(&["Item", "Qty", "Price"]),
                strings(&["Widget", "", ""]),
                strings(&["", "2", ""]),
                strings(&["", "", ""]),
            ],
            style_hints: StyleHints::defaults_for(&SectionKind::Table),
        })];
        assert_eq!(
            to_plain_text(&nodes),
            "Item   | Qty | Price\n-------+-----+------\nWidget\n       | 2\n\n"
        );
    }

    #[test]
    fn test_section_block() {
        let nodes = [RenderNode::Section(SectionNode {
            section_id: "customer".to_string(),
            title: Some("Bill To".to_string()),
            resolved_text: None,
            field_lines: vec![
                FieldLine::new("Name", "Acme"),
                FieldLine::new("Email", "ap@acme.test"),
            ],
            style_hints: StyleHints::defaults_for(&SectionKind::Section),
        })];
        assert_eq!(
            to_plain_text(&nodes),
            "Bill To\nName: Acme\nEmail: ap@acme.test\n"
        );
    }

    #[test]
    fn test_document_preview() {
        let nodes = [
            RenderNode::Body(text_node(SectionKind::Body, "Dear Acme,")),
            RenderNode::Separator(SeparatorNode {
                section_id: "sep".to_string(),
                width: 10,
            }),
            RenderNode::Table(TableNode {
                section_id: "items".to_string(),
                title: Some("Items".to_string()),
                rows: vec![
                    strings(&["Description", "Price"]),
                    strings(&["Widget", "10"]),
                    strings(&["Gadget", ""]),
                ],
                style_hints: StyleHints::defaults_for(&SectionKind::Table),
            }),
            RenderNode::Signature(SignatureNode {
                section_id: "sign".to_string(),
                title: "Signature".to_string(),
                lines: vec![
                    SignatureLine::Filled {
                        label: "Name".to_string(),
                        value: "Ada".to_string(),
                    },
                    SignatureLine::Blank {
                        label: "Date".to_string(),
                    },
                    SignatureLine::Rule,
                ],
                style_hints: StyleHints::defaults_for(&SectionKind::Signature),
            }),
        ];

        insta::assert_snapshot!(to_plain_text(&nodes), @r"
        Dear Acme,

        ----------

        Items
        Description | Price
        ------------+------
        Widget      | 10
        Gadget

        Signature
        Name: Ada
        Date: ____________________
        ______________________________
        ");
    }
}
