//! # Schema Export Subcommand
//!
//! `ingate schema <chunks|audit|twin>` prints the built-in schema for a
//! document kind as a Draft 2020-12 JSON Schema.

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ingate_schema::{to_json_schema, DocumentKind};

use crate::report::Reporter;

/// Document kind as spelled on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    Chunks,
    Audit,
    Twin,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Chunks => DocumentKind::ChunkManifest,
            KindArg::Audit => DocumentKind::IngestionAudit,
            KindArg::Twin => DocumentKind::MetadataTwin,
        }
    }
}

/// Arguments for `ingate schema`.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Which document schema to print.
    #[arg(value_enum)]
    pub kind: KindArg,
}

pub fn run_schema<W: Write>(args: &SchemaArgs, reporter: &mut Reporter<W>) -> Result<u8> {
    let kind = DocumentKind::from(args.kind);
    let schema = kind.schema()?;
    let rendered = serde_json::to_string_pretty(&to_json_schema(&schema))
        .with_context(|| format!("failed to serialize {kind} schema"))?;
    reporter.line(rendered).context("failed to write schema")?;
    Ok(0)
}
