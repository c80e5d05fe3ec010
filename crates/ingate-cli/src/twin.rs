//! # Metadata Twin Subcommand
//!
//! `ingate twin <FILES>...` validates staged metadata twins. The commit hook
//! passes every staged file; only `.json` files under a `raw-text` path
//! segment and outside any `meta` segment are twins; everything else is
//! skipped without output.
//!
//! Every candidate is checked even after a failure, so one run reports all
//! broken twins in the batch.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use ingate_schema::DocumentKind;

use crate::report::{check_document, Reporter};
use crate::Workspace;

/// Arguments for `ingate twin`.
#[derive(Args, Debug, Default)]
pub struct TwinArgs {
    /// Staged files; non-twins are ignored.
    pub files: Vec<PathBuf>,
}

/// Whether `path` names a metadata twin: a `.json` file with a
/// `content_segment` directory in its path and no `excluded_segment`.
pub fn is_twin_candidate(path: &Path, content_segment: &str, excluded_segment: &str) -> bool {
    if path.extension() != Some(OsStr::new("json")) {
        return false;
    }
    let has_segment = |segment: &str| {
        path.components()
            .any(|c| matches!(c, Component::Normal(name) if name == OsStr::new(segment)))
    };
    has_segment(content_segment) && !has_segment(excluded_segment)
}

/// Validate every twin among `args.files`. Returns 1 if any twin failed.
pub fn run_twin<W: Write>(
    args: &TwinArgs,
    ws: &Workspace,
    reporter: &mut Reporter<W>,
) -> Result<u8> {
    if args.files.is_empty() {
        reporter
            .error("No files provided for validation")
            .context("failed to write report")?;
        return Ok(1);
    }

    let schema = DocumentKind::MetadataTwin.schema()?;
    let filter = &ws.config.twin;
    let mut failed = 0usize;
    let mut checked = 0usize;

    for file in &args.files {
        if !is_twin_candidate(file, &filter.content_segment, &filter.excluded_segment) {
            tracing::trace!(file = %file.display(), "not a metadata twin, skipped");
            continue;
        }
        checked += 1;
        let path = ws.target(Some(file), file);
        let passed = check_document(reporter, &path, &schema, None, "is valid metadata twin")
            .context("failed to write report")?;
        if !passed {
            failed += 1;
        }
    }

    tracing::info!(checked, failed, "metadata twin batch complete");
    Ok(if failed == 0 { 0 } else { 1 })
}
