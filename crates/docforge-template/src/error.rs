/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for loading templates and data records.
//!
//! Rendering itself never fails; these errors only describe inputs that do
//! not have the shape the engine expects.

use thiserror::Error;

/// Errors that can occur when constructing engine inputs.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template document is not valid template JSON.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[source] serde_json::Error),

    /// The data record is not valid JSON.
    #[error("Invalid data record: {0}")]
    InvalidData(#[source] serde_json::Error),

    /// The data record is valid JSON but not an object.
    #[error("Data record must be a JSON object, found {found}")]
    DataNotAnObject { found: &'static str },

    /// I/O error (e.g., reading a template file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
