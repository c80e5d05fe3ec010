//! # ingate-cli
//!
//! Library backing the `ingate` binary. Each subcommand lives in its own
//! module with a clap `Args` struct and a `run_*` function returning the
//! process exit code, so the commands can be driven from tests without
//! spawning a process.
//!
//! ## Subcommands
//!
//! - `chunks [PATH]`: validate the chunk manifest.
//! - `audit [PATH] [--json-schema FILE]`: validate the ingestion audit trail.
//! - `twin <FILES>...`: validate staged metadata twins.
//! - `check`: `chunks` then `audit`.
//! - `schema <chunks|audit|twin>`: print the exported JSON Schema.

pub mod audit;
pub mod config;
pub mod export;
pub mod manifest;
pub mod report;
pub mod twin;

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::audit::{run_audit, AuditArgs};
use crate::config::Config;
use crate::manifest::{run_chunks, ChunksArgs};
use crate::report::Reporter;

/// Directories whose presence marks a repository root.
const ROOT_MARKERS: &[&str] = &[".git", ".claude"];

/// Resolve a path relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path is joined to the
/// repository root when that file exists there, and otherwise left
/// relative to the working directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Walk up from `start` to the first directory holding `.git` or `.claude`.
pub fn discover_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// Repository root plus loaded configuration, shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub repo_root: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn new(repo_root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            repo_root: repo_root.into(),
            config,
        }
    }

    /// Target for a document: the path given on the command line, resolved
    /// with [`resolve_path`], or the configured location under the root.
    pub fn target(&self, explicit: Option<&Path>, configured: &Path) -> PathBuf {
        match explicit {
            Some(path) => resolve_path(path, &self.repo_root),
            None if configured.is_absolute() => configured.to_path_buf(),
            None => self.repo_root.join(configured),
        }
    }
}

/// Run `chunks` then `audit` at their configured locations. Both always run.
pub fn run_check<W: Write>(ws: &Workspace, reporter: &mut Reporter<W>) -> Result<u8> {
    let chunks = run_chunks(&ChunksArgs::default(), ws, reporter)?;
    let audit = run_audit(&AuditArgs::default(), ws, reporter)?;
    Ok(chunks.max(audit))
}
