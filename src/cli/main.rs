//! nested-schema command line

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nested_schema::cli::commands::{build::handle_build, validate::handle_validate};
use nested_schema::cli::output::OutputFormat;

#[derive(Parser)]
#[command(name = "nested-schema", version, about = "Build relational schemas from nested table definitions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the schema and print it
    Build {
        /// Definition document (use - for stdin)
        input: String,
        /// Builder configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Build the schema and report dependency order, cycles and self-references
    Validate {
        /// Definition document (use - for stdin)
        input: String,
        /// Builder configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nested_schema=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            input,
            config,
            format,
        } => handle_build(&input, config.as_deref(), format)?,
        Commands::Validate { input, config } => handle_validate(&input, config.as_deref())?,
    }
    Ok(())
}
