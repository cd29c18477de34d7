mod commands;
mod config;
mod error;
mod resources;
mod sink;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::commands::{cmd_generate, cmd_validate, GenerateOptions};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// KTreeSitter grammar binding generator.
#[derive(Parser)]
#[command(
    name = "ktreesitter",
    version,
    about = "KTreeSitter grammar binding generator"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Kotlin, JNI and CMake sources for a grammar
    Generate {
        /// Path to the grammar configuration TOML
        config: PathBuf,
        /// Output directory for generated files
        #[arg(long, default_value = "build/generated")]
        out: PathBuf,
        /// Directory with template overrides (all seven *.in files)
        #[arg(long)]
        templates: Option<PathBuf>,
        /// List the files that would be generated without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a grammar configuration without generating anything
    Validate {
        /// Path to the grammar configuration TOML
        config: PathBuf,
        /// Directory with template overrides to check as well
        #[arg(long)]
        templates: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate {
            config,
            out,
            templates,
            dry_run,
        } => {
            cmd_generate(
                GenerateOptions {
                    config: &config,
                    out: &out,
                    templates: templates.as_deref(),
                    dry_run,
                },
                cli.output,
                cli.quiet,
            );
        }
        Commands::Validate { config, templates } => {
            cmd_validate(&config, templates.as_deref(), cli.output, cli.quiet);
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, true) => "info",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
