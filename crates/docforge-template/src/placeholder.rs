/*
 * placeholder.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Placeholder parsing and substitution.
//!
//! The grammar is exactly:
//!
//! ```text
//! {{identifier}}
//! {{identifier.default text}}
//! ```
//!
//! where `identifier` is `[A-Za-z0-9_]+` and the default text is anything
//! without a `}`. Anything else containing braces is ordinary text.
//!
//! Substitution is a single left-to-right pass. Substituted values and
//! default texts are never scanned again, so a value that itself contains
//! `{{...}}` is inserted literally.

use crate::value::DataRecord;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)(?:\.([^}]+))?\}\}").expect("placeholder grammar is valid")
});

/// A placeholder occurrence in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The data key.
    pub key: &'a str,
    /// Literal text used when the key has no value.
    pub default: Option<&'a str>,
    /// Byte range of the whole `{{...}}` token.
    pub range: Range<usize>,
}

impl<'a> Placeholder<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        let whole = caps.get(0)?;
        let key = caps.get(1)?.as_str();
        Some(Placeholder {
            key,
            default: caps.get(2).map(|m| m.as_str()),
            range: whole.range(),
        })
    }

    /// The text this placeholder resolves to against `data`.
    ///
    /// A value that is present and not empty wins, then the default text,
    /// then the empty string. `0` and `false` are values.
    pub fn resolve(&self, data: &DataRecord) -> String {
        match data.get(self.key) {
            Some(value) if !value.is_empty() => value.to_display_string(),
            _ => self.default.unwrap_or_default().to_string(),
        }
    }
}

/// Iterate over the placeholders in `content`, left to right.
pub fn placeholders(content: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER
        .captures_iter(content)
        .filter_map(|caps| Placeholder::from_captures(&caps))
}

/// Substitute every placeholder in `content` with its value from `data`.
///
/// Never fails: malformed tokens are left as they are.
pub fn replace(content: &str, data: &DataRecord) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            Placeholder::from_captures(caps)
                .map(|placeholder| placeholder.resolve(data))
                .unwrap_or_default()
        })
        .into_owned()
}

/// The keys referenced by placeholders in `content`, deduplicated, in
/// first-seen order.
pub fn extract_keys(content: &str) -> Vec<String> {
    placeholders(content)
        .map(|p| p.key)
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
