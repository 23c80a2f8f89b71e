/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Render options from `docforge.toml` and command-line flags.
//!
//! The file holds a flat table of [`RenderOptions`] keys:
//!
//! ```toml
//! tableDataFallback = "deny"
//! strict = true
//! ```
//!
//! Flags given on the command line win over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use docforge_template::{RenderOptions, TableDataFallback};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "docforge.toml";

/// Flag values that override the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub strict: bool,
    pub no_defaults: bool,
    pub table_data: Option<TableDataFallback>,
}

impl Overrides {
    pub fn apply(&self, mut options: RenderOptions) -> RenderOptions {
        if self.strict {
            options.strict = true;
        }
        if self.no_defaults {
            options.merge_defaults = false;
        }
        if let Some(fallback) = self.table_data {
            options.table_data_fallback = fallback;
        }
        options
    }
}

/// Load render options from `path`, or from [`DEFAULT_CONFIG_FILE`] in `cwd`
/// if it exists, then apply the flag overrides.
pub fn load_options(
    path: Option<&Path>,
    cwd: &Path,
    overrides: &Overrides,
) -> Result<RenderOptions> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = cwd.join(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(overrides.apply(RenderOptions::default()));
            }
            default
        }
    };

    debug!("Loading render options from {}", path.display());
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let options = parse_options(&source)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(overrides.apply(options))
}

pub fn parse_options(source: &str) -> Result<RenderOptions, toml::de::Error> {
    toml::from_str(source)
}

/// Parse the value of `--table-data`.
pub fn parse_table_data_fallback(value: &str) -> Result<TableDataFallback, String> {
    match value {
        "allow" => Ok(TableDataFallback::Allow),
        "warn" => Ok(TableDataFallback::Warn),
        "deny" => Ok(TableDataFallback::Deny),
        other => Err(format!(
            "unknown table data policy '{other}' (expected allow, warn or deny)"
        )),
    }
}
