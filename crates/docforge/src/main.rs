//! docforge CLI - Main entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docforge_template::TableDataFallback;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docforge")]
#[command(version)]
#[command(about = "Render schema-driven document templates", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template against a data record
    Render {
        /// Template JSON file
        template: PathBuf,

        /// Data record JSON file (defaults to an empty record)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = commands::render::OutputFormat::Json)]
        format: commands::render::OutputFormat,

        /// Do not merge field defaults into the data record
        #[arg(long)]
        no_defaults: bool,

        /// Report warnings as errors and exit with status 1 if there are any
        #[arg(long)]
        strict: bool,

        /// Use of the shared `tableData` rows (allow, warn, deny)
        #[arg(long, value_parser = config::parse_table_data_fallback)]
        table_data: Option<TableDataFallback>,

        /// Render options file (defaults to ./docforge.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the editable fields of a template
    Fields {
        /// Template JSON file
        template: PathBuf,
    },

    /// Check a data record against the fields of a template
    Validate {
        /// Template JSON file
        template: PathBuf,

        /// Data record JSON file
        #[arg(short, long)]
        data: PathBuf,

        /// Do not merge field defaults into the data record
        #[arg(long)]
        no_defaults: bool,

        /// Render options file (defaults to ./docforge.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            template,
            data,
            format,
            no_defaults,
            strict,
            table_data,
            config,
        } => commands::render::execute(commands::render::RenderArgs {
            template,
            data,
            format,
            config,
            overrides: config::Overrides {
                strict,
                no_defaults,
                table_data,
            },
        }),
        Commands::Fields { template } => commands::fields::execute(&template),
        Commands::Validate {
            template,
            data,
            no_defaults,
            config,
        } => commands::validate::execute(commands::validate::ValidateArgs {
            template,
            data,
            config,
            overrides: config::Overrides {
                no_defaults,
                ..config::Overrides::default()
            },
        }),
    }
}
