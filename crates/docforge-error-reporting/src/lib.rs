//! Structured diagnostic messages for docforge.
//!
//! Document generation in docforge is best-effort: a template with an unknown
//! section kind or a record with a missing required field still renders. The
//! problems found along the way are reported as [`DiagnosticMessage`]s rather
//! than errors, so callers can decide what to surface to the user.
//!
//! The message structure follows tidyverse-style guidelines:
//!
//! - a short title and an optional error code (e.g. `D-1-2`)
//! - a problem statement
//! - bulleted details
//! - hints for fixing the problem
//!
//! Error codes are described in an embedded catalog (see [`catalog`]).
//!
//! # Example
//!
//! ```
//! use docforge_error_reporting::DiagnosticMessageBuilder;
//!
//! let warning = DiagnosticMessageBuilder::warning("Table Without Columns")
//!     .with_code("D-1-2")
//!     .problem("Table section `items` declares no columns")
//!     .add_hint("Add at least one column to the section?")
//!     .build();
//!
//! assert!(warning.to_text().contains("Warning: Table Without Columns"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
