/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Runs the full document pipeline and prints the render nodes as JSON or
//! as a plain-text preview. Diagnostics go to stderr. The exit status is 1
//! only when strict mode turned a diagnostic into an error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::info;

use docforge_template::{RenderedDocument, render_document, to_plain_text};

use crate::config::{Overrides, load_options};

/// Output format of the render command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Render nodes as JSON
    Json,
    /// Plain-text preview
    Text,
}

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    pub template: PathBuf,
    pub data: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<ExitCode> {
    let document = render(&args)?;
    super::report_diagnostics(&document.diagnostics);
    println!("{}", format_output(&document, args.format)?);

    if document.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn render(args: &RenderArgs) -> Result<RenderedDocument> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let options = load_options(args.config.as_deref(), &cwd, &args.overrides)?;
    let template = super::load_template(&args.template)?;
    let data = super::load_data(args.data.as_deref())?;

    info!(
        "Rendering template '{}' ({} sections)",
        template.id,
        template.sections.len()
    );
    Ok(render_document(&template, &data, &options))
}

fn format_output(document: &RenderedDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&document.nodes)
            .context("Failed to serialize render nodes"),
        OutputFormat::Text => Ok(to_plain_text(&document.nodes).trim_end().to_string()),
    }
}
