//! Core diagnostic message types.
//!
//! This module defines the structures for representing diagnostic messages
//! (errors, warnings, info) following tidyverse-style guidelines.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// An error that the caller should not ignore
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
    /// Informational message
    Info,
    /// A note providing additional context
    Note,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
            DiagnosticKind::Info => "Info",
            DiagnosticKind::Note => "Note",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Error detail (✖ bullet)
    Error,
    /// Info detail (ℹ bullet)
    Info,
    /// Note detail (plain bullet)
    Note,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailItem {
    /// The kind of detail (error, info, note)
    pub kind: DetailKind,
    /// The content of the detail
    pub content: String,
}

/// A diagnostic message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "D-1-1") for searchability
/// 2. **Title**: Brief error message
/// 3. **Kind**: Error, Warning, Info
/// 4. **Problem**: What went wrong
/// 5. **Details**: Specific information (bulleted)
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
/// 7. **Subject**: The template element the message is about, such as a
///    section id or a field key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    /// Optional error code (e.g., "D-1-1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Brief title for the message
    pub title: String,

    /// The kind of diagnostic
    pub kind: DiagnosticKind,

    /// The problem statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    /// Specific details
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<DetailItem>,

    /// Hints for fixing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,

    /// The template element this diagnostic refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl DiagnosticMessage {
    /// Create a new diagnostic message with just a title and kind.
    ///
    /// Prefer [`crate::DiagnosticMessageBuilder`] for anything with details.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            code: None,
            title: title.into(),
            kind,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            subject: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    /// Create a warning diagnostic.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.kind == DiagnosticKind::Error
    }

    /// Render this diagnostic message as text following tidyverse style.
    ///
    /// Format:
    /// ```text
    /// Warning [D-1-2]: title
    /// Problem statement here
    /// ✖ Error detail
    /// ℹ Info detail
    /// ? Hint
    /// ```
    pub fn to_text(&self) -> String {
        let mut result = String::new();

        match &self.code {
            Some(code) => {
                result.push_str(&format!("{} [{}]: {}\n", self.kind.label(), code, self.title))
            }
            None => result.push_str(&format!("{}: {}\n", self.kind.label(), self.title)),
        }

        if let Some(problem) = &self.problem {
            result.push_str(problem);
            result.push('\n');
        }

        for detail in &self.details {
            result.push_str(&format!("{} {}\n", detail.kind.bullet(), detail.content));
        }

        for hint in &self.hints {
            result.push_str(&format!("? {}\n", hint));
        }

        result
    }

    /// Render this diagnostic message as a JSON value.
    ///
    /// ```
    /// use docforge_error_reporting::DiagnosticMessage;
    ///
    /// let msg = DiagnosticMessage::warning("Something looks off").with_code("D-1-1");
    /// let json = msg.to_json();
    /// assert_eq!(json["kind"], "warning");
    /// assert_eq!(json["code"], "D-1-1");
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        // The derived Serialize impl cannot fail for this shape.
        serde_json::to_value(self).unwrap_or_else(|_| {
            json!({
                "kind": self.kind,
                "title": self.title,
            })
        })
    }
}
