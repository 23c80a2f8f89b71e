/*
 * fields.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Field discovery.
//!
//! Builds the complete set of editable fields of a template, in this order
//! of precedence (the first field seen for a key wins):
//!
//! 1. Template-level fields
//! 2. Fields declared by sections, in section order
//! 3. Implicit fields for placeholders in section content, then title
//! 4. One `table` field per table section with columns
//!
//! The result only depends on the template, so forms built from it and
//! tests against it are stable.
//!
//! A key declared twice with different types is almost always a template
//! authoring mistake. The first declaration still wins, but the collision is
//! recorded as a [`FieldConflict`].

use crate::placeholder::extract_keys;
use crate::schema::{Field, FieldType, Section, SectionKind, Template};
use indexmap::IndexMap;
use std::fmt;

/// Label of a table field whose section has no title.
const TABLE_FIELD_LABEL: &str = "Table Data";

/// Where a discovered field came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOrigin {
    /// Declared at template level.
    Global,
    /// Declared by the section with this id.
    Section(String),
    /// Synthesized from a placeholder in the section with this id.
    Implicit(String),
    /// Synthesized for the table section with this id.
    Table(String),
}

impl FieldOrigin {
    fn is_implicit(&self) -> bool {
        matches!(self, FieldOrigin::Implicit(_))
    }
}

impl fmt::Display for FieldOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldOrigin::Global => write!(f, "template fields"),
            FieldOrigin::Section(id) => write!(f, "section `{id}`"),
            FieldOrigin::Implicit(id) => write!(f, "a placeholder in section `{id}`"),
            FieldOrigin::Table(id) => write!(f, "table section `{id}`"),
        }
    }
}

/// A key declared again with a different type than the field that won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConflict {
    pub key: String,
    pub kept: FieldOrigin,
    pub kept_type: FieldType,
    pub ignored: FieldOrigin,
    pub ignored_type: FieldType,
}

/// Result of field discovery.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiscoveredFields {
    /// Fields in precedence order, one per key.
    pub fields: Vec<Field>,
    /// Where each field came from, parallel to `fields`.
    pub origins: Vec<FieldOrigin>,
    /// Ignored declarations whose type differs from the field that won.
    pub conflicts: Vec<FieldConflict>,
}

/// Discover the editable fields of a template.
pub fn discover_fields(template: &Template) -> Vec<Field> {
    discover(template).fields
}

/// Discover the editable fields of a template, with origins and conflicts.
pub fn discover(template: &Template) -> DiscoveredFields {
    let global = template
        .fields
        .iter()
        .map(|field| (field.clone(), FieldOrigin::Global));

    let declared = template.sections.iter().flat_map(|section| {
        section
            .fields
            .iter()
            .map(|field| (field.clone(), FieldOrigin::Section(section.id.clone())))
    });

    let implicit = template.sections.iter().flat_map(|section| {
        implicit_keys(section)
            .into_iter()
            .map(|key| (implicit_field(&key), FieldOrigin::Implicit(section.id.clone())))
    });

    let tables = template.sections.iter().filter_map(|section| {
        table_field(section).map(|field| (field, FieldOrigin::Table(section.id.clone())))
    });

    global
        .chain(declared)
        .chain(implicit)
        .chain(tables)
        .fold(FieldSet::default(), FieldSet::offer)
        .finish()
}

/// Turn a camelCase key into a label: `employeeName` becomes `Employee Name`.
pub fn humanize(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else {
            if ch.is_uppercase() {
                label.push(' ');
            }
            label.push(ch);
        }
    }
    label
}

/// Placeholder keys of a section: content first, then title.
fn implicit_keys(section: &Section) -> Vec<String> {
    [section.content.as_deref(), section.title.as_deref()]
        .into_iter()
        .flatten()
        .flat_map(extract_keys)
        .collect()
}

fn implicit_field(key: &str) -> Field {
    Field::new(
        format!("placeholder-{key}"),
        key,
        humanize(key),
        FieldType::Text,
    )
}

fn table_field(section: &Section) -> Option<Field> {
    if section.kind != SectionKind::Table || section.columns.is_empty() {
        return None;
    }
    let label = section
        .title
        .clone()
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| TABLE_FIELD_LABEL.to_string());
    Some(Field::new(&section.id, &section.id, label, FieldType::Table))
}

/// Insertion-ordered accumulator for the discovery fold.
#[derive(Default)]
struct FieldSet {
    fields: IndexMap<String, (Field, FieldOrigin)>,
    conflicts: Vec<FieldConflict>,
}

impl FieldSet {
    fn offer(mut self, (field, origin): (Field, FieldOrigin)) -> Self {
        match self.fields.get(&field.key) {
            None => {
                self.fields.insert(field.key.clone(), (field, origin));
            }
            Some((kept, kept_origin)) => {
                if !origin.is_implicit() && kept.field_type != field.field_type {
                    tracing::debug!(
                        key = %field.key,
                        kept = %kept_origin,
                        ignored = %origin,
                        "Conflicting field declaration"
                    );
                    self.conflicts.push(FieldConflict {
                        key: field.key.clone(),
                        kept: kept_origin.clone(),
                        kept_type: kept.field_type.clone(),
                        ignored: origin,
                        ignored_type: field.field_type,
                    });
                }
            }
        }
        self
    }

    fn finish(self) -> DiscoveredFields {
        let (fields, origins) = self.fields.into_values().unzip();
        DiscoveredFields {
            fields,
            origins,
            conflicts: self.conflicts,
        }
    }
}
