//! # Console Report
//!
//! Formats per-file outcomes on stdout. The format is consumed by humans
//! reading commit hook output:
//!
//! ```text
//! ✓ chunks.json is valid
//! ERROR: .claude/ingestion-audit.json does not exist
//! ERROR: Invalid JSON in twin.json
//!        trailing comma at line 3 column 1
//! ERROR: Schema validation failed for chunks.json
//!        must be one of: plaintext, ... (found "invalid_tag")
//!        Path: chunks[0].fragments[0].component
//! ```

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use ingate_schema::{
    load_document, validate_value, ExternalSchema, Schema, ValidateError, Violations,
};

/// Validator label for the built-in descriptor schemas.
pub const BUILTIN_VALIDATOR: &str = "Schema";
/// Validator label for external JSON Schema files.
pub const JSON_SCHEMA_VALIDATOR: &str = "JSON Schema";

const INDENT: &str = "       ";

/// Writes report lines to any output.
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// A plain line, written as-is.
    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// `ERROR: <message>`.
    pub fn error(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, "ERROR: {message}")
    }

    /// `✓ <basename> <suffix>`.
    pub fn valid(&mut self, path: &Path, suffix: &str) -> io::Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        writeln!(self.out, "✓ {name} {suffix}")
    }

    /// Report a document that could not be loaded or did not validate.
    pub fn failure(&mut self, err: &ValidateError) -> io::Result<()> {
        match err {
            ValidateError::NotFound { path } => {
                self.error(format_args!("{} does not exist", path.display()))
            }
            ValidateError::Read { path, source } => {
                self.error(format_args!("Failed to read {}: {source}", path.display()))
            }
            ValidateError::Parse { path, source } => {
                self.error(format_args!("Invalid JSON in {}", path.display()))?;
                writeln!(self.out, "{INDENT}{source}")
            }
            ValidateError::Invalid {
                path, violations, ..
            } => self.violations(BUILTIN_VALIDATOR, path, violations),
        }
    }

    /// `ERROR: <validator> validation failed for <path>` followed by one
    /// indented entry per violation.
    pub fn violations(
        &mut self,
        validator: &str,
        path: &Path,
        violations: &Violations,
    ) -> io::Result<()> {
        self.error(format_args!(
            "{validator} validation failed for {}",
            path.display()
        ))?;
        for violation in violations {
            match &violation.found {
                Some(found) => writeln!(self.out, "{INDENT}{} (found {found})", violation.message)?,
                None => writeln!(self.out, "{INDENT}{}", violation.message)?,
            }
            if !violation.path.is_root() {
                writeln!(self.out, "{INDENT}Path: {}", violation.path)?;
            }
        }
        Ok(())
    }
}

/// Load `path`, check it against `schema` and, when given, an external JSON
/// Schema, and report the outcome. Returns whether the document passed.
///
/// A document that fails to load is reported once and never reaches either
/// validator.
pub fn check_document<W: Write>(
    reporter: &mut Reporter<W>,
    path: &Path,
    schema: &Schema,
    external: Option<&ExternalSchema>,
    success_suffix: &str,
) -> io::Result<bool> {
    let document = match load_document(path) {
        Ok(document) => document,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "document not loaded");
            reporter.failure(&err)?;
            return Ok(false);
        }
    };

    let mut passed = true;
    if let Err(violations) = validate_value(schema, &document) {
        reporter.violations(BUILTIN_VALIDATOR, path, &violations)?;
        passed = false;
    }
    if let Some(external) = external {
        if let Err(violations) = external.validate(&document) {
            reporter.violations(JSON_SCHEMA_VALIDATOR, path, &violations)?;
            passed = false;
        }
    }

    if passed {
        reporter.valid(path, success_suffix)?;
    }
    tracing::info!(path = %path.display(), passed, "checked document");
    Ok(passed)
}
