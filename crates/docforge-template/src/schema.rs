/*
 * schema.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template schema types.
//!
//! These are passive definitions deserialized from the template JSON that the
//! builder UI produces. Section kinds and field types are closed enums with
//! an `Other` variant, so a template written by a newer builder still loads;
//! the renderer skips what it does not understand.

use crate::error::{TemplateError, TemplateResult};
use crate::value::DataValue;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A declarative document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Template identifier.
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Template version, incremented by the persistence layer.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Sections in document order.
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Template-level fields, not tied to a section.
    #[serde(default)]
    pub fields: Vec<Field>,
}

fn default_version() -> u32 {
    1
}

impl Template {
    /// Parse a template from JSON.
    pub fn from_json_str(json: &str) -> TemplateResult<Self> {
        serde_json::from_str(json).map_err(TemplateError::InvalidTemplate)
    }

    /// Load a template from a JSON file.
    pub fn from_file(path: &Path) -> TemplateResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }
}

/// One structural unit of a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section identifier; also the data key for table rows.
    pub id: String,

    /// What kind of section this is.
    #[serde(alias = "type")]
    pub kind: SectionKind,

    /// Optional title, may contain placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional body text, may contain placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Fields rendered as `label: value` lines (section and signature kinds).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,

    /// Columns of a table section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<TableColumn>,

    /// Style overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<SectionStyle>,

    /// Visibility condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
}

impl Section {
    /// Create a section with only an id and a kind.
    pub fn new(id: impl Into<String>, kind: SectionKind) -> Self {
        Section {
            id: id.into(),
            kind,
            title: None,
            content: None,
            fields: Vec::new(),
            columns: Vec::new(),
            style: None,
            conditional: None,
        }
    }
}

/// The kind of a section, which selects how it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    Header,
    Body,
    Footer,
    Section,
    Separator,
    Table,
    Signature,
    /// A kind this version of the engine does not know.
    Other(String),
}

impl SectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Body => "body",
            SectionKind::Footer => "footer",
            SectionKind::Section => "section",
            SectionKind::Separator => "separator",
            SectionKind::Table => "table",
            SectionKind::Signature => "signature",
            SectionKind::Other(name) => name,
        }
    }
}

impl From<String> for SectionKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "header" => SectionKind::Header,
            "body" => SectionKind::Body,
            "footer" => SectionKind::Footer,
            "section" => SectionKind::Section,
            "separator" => SectionKind::Separator,
            "table" => SectionKind::Table,
            "signature" => SectionKind::Signature,
            _ => SectionKind::Other(name),
        }
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        kind.as_str().to_string()
    }
}

/// A named, typed, editable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,

    /// Data record key this field reads and writes.
    pub key: String,

    #[serde(default)]
    pub label: String,

    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    #[serde(default)]
    pub required: bool,

    /// Value used when the record has no value for `key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DataValue>,

    /// Choices for select and multiselect fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
}

impl Field {
    /// Create an optional field with no default, options or rules.
    pub fn new(
        id: impl Into<String>,
        key: impl Into<String>,
        label: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Field {
            id: id.into(),
            key: key.into(),
            label: label.into(),
            field_type,
            required: false,
            default_value: None,
            options: Vec::new(),
            validation: None,
        }
    }

    /// Mark this field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: impl Into<DataValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// The input type of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Number,
    Date,
    Email,
    Phone,
    Select,
    Multiselect,
    Checkbox,
    Image,
    Table,
    /// A type this version of the engine does not know.
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Checkbox => "checkbox",
            FieldType::Image => "image",
            FieldType::Table => "table",
            FieldType::Other(name) => name,
        }
    }

    /// Whether values of this type are free text whose length can be bounded.
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Textarea | FieldType::Email | FieldType::Phone
        )
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => FieldType::Text,
            "textarea" => FieldType::Textarea,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "email" => FieldType::Email,
            "phone" => FieldType::Phone,
            "select" => FieldType::Select,
            "multiselect" => FieldType::Multiselect,
            "checkbox" => FieldType::Checkbox,
            "image" => FieldType::Image,
            "table" => FieldType::Table,
            _ => FieldType::Other(name),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

/// One choice of a select or multiselect field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

/// Validation rules of a field.
///
/// `min` and `max` bound the value of number fields and the length of
/// text fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// A column of a table section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    pub id: String,
    /// Key of the cell value in each row record.
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        let key = key.into();
        TableColumn {
            id: key.clone(),
            key,
            label: label.into(),
            column_type: ColumnType::Text,
        }
    }
}

/// The value type of a table column. Cells are printed the same way for
/// every type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    /// A type this version of the engine does not know.
    Other(String),
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Other(name) => name,
        }
    }
}

impl From<String> for ColumnType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "text" => ColumnType::Text,
            "number" => ColumnType::Number,
            "date" => ColumnType::Date,
            _ => ColumnType::Other(name),
        }
    }
}

impl From<ColumnType> for String {
    fn from(column_type: ColumnType) -> Self {
        column_type.as_str().to_string()
    }
}

/// Section-level style overrides. Unset properties keep the kind's default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
    #[serde(default)]
    pub left: f64,
}

/// Visibility condition of a section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    /// Render only when this key is truthy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<String>,
    /// Skip when this key is truthy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_if: Option<String>,
}
