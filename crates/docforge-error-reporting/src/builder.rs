//! Builder API for diagnostic messages.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};

/// Builder for [`DiagnosticMessage`].
///
/// ```
/// use docforge_error_reporting::{DiagnosticKind, DiagnosticMessageBuilder};
///
/// let msg = DiagnosticMessageBuilder::error("Missing Required Field")
///     .with_code("D-3-1")
///     .problem("Field `customerName` is required but has no value")
///     .with_subject("customerName")
///     .build();
///
/// assert_eq!(msg.kind, DiagnosticKind::Error);
/// assert_eq!(msg.subject.as_deref(), Some("customerName"));
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    message: DiagnosticMessage,
}

impl DiagnosticMessageBuilder {
    /// Start building a message of the given kind.
    pub fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            message: DiagnosticMessage::new(kind, title),
        }
    }

    /// Start building an error.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    /// Start building a warning.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Start building an informational message.
    pub fn info(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, title)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.message.code = Some(code.into());
        self
    }

    /// Set the problem statement.
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.message.problem = Some(problem.into());
        self
    }

    /// Add an error detail (✖ bullet).
    pub fn add_detail(self, content: impl Into<String>) -> Self {
        self.add_detail_of_kind(DetailKind::Error, content)
    }

    /// Add an info detail (ℹ bullet).
    pub fn add_info(self, content: impl Into<String>) -> Self {
        self.add_detail_of_kind(DetailKind::Info, content)
    }

    /// Add a note detail (plain bullet).
    pub fn add_note(self, content: impl Into<String>) -> Self {
        self.add_detail_of_kind(DetailKind::Note, content)
    }

    fn add_detail_of_kind(mut self, kind: DetailKind, content: impl Into<String>) -> Self {
        self.message.details.push(DetailItem {
            kind,
            content: content.into(),
        });
        self
    }

    /// Add a hint for fixing the problem.
    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.message.hints.push(hint.into());
        self
    }

    /// Name the template element the message is about.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.message.subject = Some(subject.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> DiagnosticMessage {
        self.message
    }
}
