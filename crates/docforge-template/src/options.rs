/*
 * options.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render configuration.

use serde::{Deserialize, Serialize};

/// Data key shared by all table sections whose own rows are absent.
pub const TABLE_DATA_KEY: &str = "tableData";

/// How table sections treat the shared [`TABLE_DATA_KEY`] rows.
///
/// With more than one table in a template, the shared key makes both tables
/// show the same rows, so new templates should key rows by section id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableDataFallback {
    /// Use the shared rows silently.
    Allow,
    /// Use the shared rows and report a deprecation warning.
    #[default]
    Warn,
    /// Ignore the shared rows.
    Deny,
}

/// Options for rendering a template.
///
/// Every field has a default, so a partial config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Treatment of the shared `tableData` rows.
    pub table_data_fallback: TableDataFallback,

    /// Report warnings as errors. Rendering still completes.
    pub strict: bool,

    /// Merge field defaults before validating and rendering a document.
    pub merge_defaults: bool,

    /// Check field values against their validation rules.
    pub check_rules: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            table_data_fallback: TableDataFallback::default(),
            strict: false,
            merge_defaults: true,
            check_rules: true,
        }
    }
}

impl RenderOptions {
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_table_data_fallback(mut self, fallback: TableDataFallback) -> Self {
        self.table_data_fallback = fallback;
        self
    }

    pub fn with_merge_defaults(mut self, merge: bool) -> Self {
        self.merge_defaults = merge;
        self
    }
}
