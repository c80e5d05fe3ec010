//! # Ingestion Audit Subcommand
//!
//! `ingate audit [PATH] [--json-schema FILE]` validates the audit trail, by
//! default `<repo root>/.claude/ingestion-audit.json`.
//!
//! When a JSON Schema file is given (flag or `audit.json_schema` in config)
//! the document must satisfy it as well. The schema file is loaded before
//! the document is touched; failing to load it is an error for the whole
//! command rather than a verdict on the document.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ingate_schema::{DocumentKind, ExternalSchema};

use crate::report::{check_document, Reporter};
use crate::Workspace;

/// Arguments for `ingate audit`.
#[derive(Args, Debug, Default)]
pub struct AuditArgs {
    /// Audit trail to validate instead of the configured location.
    pub path: Option<PathBuf>,

    /// Additionally validate against this JSON Schema file.
    #[arg(long)]
    pub json_schema: Option<PathBuf>,
}

/// Validate the ingestion audit trail. Returns 0 when valid, 1 otherwise.
pub fn run_audit<W: Write>(
    args: &AuditArgs,
    ws: &Workspace,
    reporter: &mut Reporter<W>,
) -> Result<u8> {
    let schema = DocumentKind::IngestionAudit.schema()?;

    let external = load_external(args, ws)?;
    let path = ws.target(args.path.as_deref(), &ws.config.audit.path);
    tracing::debug!(path = %path.display(), "validating ingestion audit");

    let passed = check_document(
        reporter,
        &path,
        &schema,
        external.as_ref(),
        "is valid against schema",
    )
    .context("failed to write report")?;
    Ok(if passed { 0 } else { 1 })
}

/// The flag wins over config; neither means no external check.
fn load_external(args: &AuditArgs, ws: &Workspace) -> Result<Option<ExternalSchema>> {
    let schema_path = match (&args.json_schema, &ws.config.audit.json_schema) {
        (Some(flag), _) => ws.target(Some(flag), flag),
        (None, Some(configured)) => ws.target(None, configured),
        (None, None) => return Ok(None),
    };
    let loaded = ExternalSchema::load(&schema_path)
        .with_context(|| format!("failed to load JSON Schema {}", schema_path.display()))?;
    tracing::debug!(schema = loaded.name(), "loaded external JSON Schema");
    Ok(Some(loaded))
}
