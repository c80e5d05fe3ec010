//! # ingate CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Reports go to stdout; logs go to stderr so hook output stays readable.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ingate_cli::audit::{run_audit, AuditArgs};
use ingate_cli::config::Config;
use ingate_cli::export::{run_schema, SchemaArgs};
use ingate_cli::manifest::{run_chunks, ChunksArgs};
use ingate_cli::report::Reporter;
use ingate_cli::twin::{run_twin, TwinArgs};
use ingate_cli::{discover_repo_root, run_check, Workspace};

/// Pre-commit validation gate for ingestion documents.
///
/// Checks the chunk manifest, the ingestion audit trail and staged
/// metadata twins against their schemas before a commit is accepted.
#[derive(Parser, Debug)]
#[command(name = "ingate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Repository root. Discovered from the working directory when absent.
    #[arg(long, global = true)]
    repo_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the chunk manifest (chunks.json).
    Chunks(ChunksArgs),

    /// Validate the ingestion audit trail (.claude/ingestion-audit.json).
    Audit(AuditArgs),

    /// Validate staged metadata twins under raw-text/.
    Twin(TwinArgs),

    /// Validate the chunk manifest and the audit trail.
    Check,

    /// Print the JSON Schema for a document kind.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            report_error(&mut io::stdout(), &e);
            ExitCode::from(1)
        }
    }
}

/// Best effort: stdout may be the thing that failed.
fn report_error(out: &mut impl Write, err: &anyhow::Error) {
    let _ = writeln!(out, "ERROR: {err:#}");
}

fn run(cli: Cli) -> Result<u8> {
    let repo_root = match cli.repo_root {
        Some(root) => root,
        None => {
            let cwd = std::env::current_dir()?;
            discover_repo_root(&cwd).unwrap_or_else(|| {
                tracing::debug!("no .git or .claude found; using current directory");
                cwd
            })
        }
    };
    tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");

    let config = Config::load(cli.config.as_deref(), &repo_root)?;
    let ws = Workspace::new(repo_root, config);
    let mut reporter = Reporter::new(io::stdout().lock());

    match cli.command {
        Commands::Chunks(args) => run_chunks(&args, &ws, &mut reporter),
        Commands::Audit(args) => run_audit(&args, &ws, &mut reporter),
        Commands::Twin(args) => run_twin(&args, &ws, &mut reporter),
        Commands::Check => run_check(&ws, &mut reporter),
        Commands::Schema(args) => run_schema(&args, &mut reporter),
    }
}
