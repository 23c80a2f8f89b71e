/*
 * validate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Validate command: check a data record against the fields of a template.
//!
//! Prints the validation result as JSON. Exits with status 1 when a
//! required field has no value. Rule violations are reported but do not
//! change the exit status unless strict mode is configured.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;

use docforge_error_reporting::DiagnosticMessage;
use docforge_template::{DiagnosticCollector, RuleViolation, ValidationResult, check_document};

use crate::config::{Overrides, load_options};

/// Arguments for the validate command
#[derive(Debug)]
pub struct ValidateArgs {
    pub template: PathBuf,
    pub data: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
}

/// Printed result of the validate command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport {
    #[serde(flatten)]
    validation: ValidationResult,
    violations: Vec<RuleViolation>,
    #[serde(skip)]
    diagnostics: Vec<DiagnosticMessage>,
}

impl ValidationReport {
    fn passed(&self) -> bool {
        self.validation.is_valid && !self.diagnostics.iter().any(DiagnosticMessage::is_error)
    }
}

/// Execute the validate command
pub fn execute(args: ValidateArgs) -> Result<ExitCode> {
    let report = check(&args)?;
    super::report_diagnostics(&report.diagnostics);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize validation result")?
    );

    if report.passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn check(args: &ValidateArgs) -> Result<ValidationReport> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let options = load_options(args.config.as_deref(), &cwd, &args.overrides)?;
    let template = super::load_template(&args.template)?;
    let data = super::load_data(Some(&args.data))?;

    let mut diagnostics = DiagnosticCollector::new(options.strict);
    let checked = check_document(&template, &data, &options, &mut diagnostics);

    Ok(ValidationReport {
        validation: checked.validation,
        violations: checked.violations,
        diagnostics: diagnostics.into_diagnostics(),
    })
}
