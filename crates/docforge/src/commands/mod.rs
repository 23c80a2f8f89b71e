//! Command implementations for the docforge CLI
//!
//! Each command module handles the CLI interface and delegates to
//! docforge-template for the actual work. Output goes to stdout,
//! diagnostics to stderr.

use std::path::Path;

use anyhow::{Context, Result};

use docforge_error_reporting::DiagnosticMessage;
use docforge_template::{DataRecord, Template};

pub mod fields;
pub mod render;
pub mod validate;

pub(crate) fn load_template(path: &Path) -> Result<Template> {
    Template::from_file(path)
        .with_context(|| format!("Failed to load template: {}", path.display()))
}

pub(crate) fn load_data(path: Option<&Path>) -> Result<DataRecord> {
    let Some(path) = path else {
        return Ok(DataRecord::new());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;
    DataRecord::from_json_str(&source)
        .with_context(|| format!("Failed to load data record: {}", path.display()))
}

pub(crate) fn report_diagnostics(diagnostics: &[DiagnosticMessage]) {
    for diagnostic in diagnostics {
        eprintln!("{}", diagnostic.to_text());
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::write;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_data_defaults_to_empty_record() {
        assert!(load_data(None).unwrap().is_empty());
    }

    #[test]
    fn test_load_data_rejects_non_object() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "data.json", "[1, 2, 3]");
        let error = load_data(Some(&path)).unwrap_err();
        assert!(error.to_string().contains("Failed to load data record"));
    }

    #[test]
    fn test_load_template_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{\"id\": ");
        let error = load_template(&path).unwrap_err();
        assert!(error.to_string().contains("broken.json"));
    }
}
