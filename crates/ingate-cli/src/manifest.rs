//! # Chunk Manifest Subcommand
//!
//! `ingate chunks [PATH]` validates the chunk manifest, by default
//! `<repo root>/chunks.json`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ingate_schema::DocumentKind;

use crate::report::{check_document, Reporter};
use crate::Workspace;

/// Arguments for `ingate chunks`.
#[derive(Args, Debug, Default)]
pub struct ChunksArgs {
    /// Manifest to validate instead of the configured location.
    pub path: Option<PathBuf>,
}

/// Validate the chunk manifest. Returns 0 when valid, 1 otherwise.
pub fn run_chunks<W: Write>(
    args: &ChunksArgs,
    ws: &Workspace,
    reporter: &mut Reporter<W>,
) -> Result<u8> {
    let schema = DocumentKind::ChunkManifest.schema()?;
    let path = ws.target(args.path.as_deref(), &ws.config.chunks.path);
    tracing::debug!(path = %path.display(), "validating chunk manifest");

    let passed = check_document(reporter, &path, &schema, None, "is valid")
        .context("failed to write report")?;
    Ok(if passed { 0 } else { 1 })
}
