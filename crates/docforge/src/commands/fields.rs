/*
 * fields.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Fields command: print the editable fields a form for the template needs.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};

use docforge_error_reporting::DiagnosticMessage;
use docforge_template::{Field, conflict_warning, discover};

/// Execute the fields command
pub fn execute(template: &Path) -> Result<ExitCode> {
    let (fields, diagnostics) = list_fields(template)?;
    super::report_diagnostics(&diagnostics);
    println!(
        "{}",
        serde_json::to_string_pretty(&fields).context("Failed to serialize fields")?
    );
    Ok(ExitCode::SUCCESS)
}

fn list_fields(template: &Path) -> Result<(Vec<Field>, Vec<DiagnosticMessage>)> {
    let template = super::load_template(template)?;
    let discovered = discover(&template);
    let diagnostics = discovered.conflicts.iter().map(conflict_warning).collect();
    Ok((discovered.fields, diagnostics))
}
