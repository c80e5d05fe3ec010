//! # Configuration
//!
//! Optional YAML file overriding where the gate looks for documents.
//! Read from `--config <PATH>` when given, otherwise from
//! `<repo root>/.ingate.yaml` if it exists. Every key has a default, so an
//! absent file means default behavior.
//!
//! ```yaml
//! chunks:
//!   path: chunks.json
//! audit:
//!   path: .claude/ingestion-audit.json
//!   json_schema: .claude/ingestion-audit-schema.json
//! twin:
//!   content_segment: raw-text
//!   excluded_segment: meta
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the repository root when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".ingate.yaml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub chunks: ChunksConfig,
    pub audit: AuditConfig,
    pub twin: TwinConfig,
}

/// Where the chunk manifest lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunksConfig {
    /// Manifest path, relative to the repository root.
    pub path: PathBuf,
}

impl Default for ChunksConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("chunks.json"),
        }
    }
}

/// Where the ingestion audit trail lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Audit trail path, relative to the repository root.
    pub path: PathBuf,
    /// Optional JSON Schema file the audit trail must also satisfy.
    pub json_schema: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".claude/ingestion-audit.json"),
            json_schema: None,
        }
    }
}

/// Which staged files count as metadata twins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwinConfig {
    /// Path segment a twin must live under.
    pub content_segment: String,
    /// Path segment that excludes a file even under the content segment.
    pub excluded_segment: String,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            content_segment: "raw-text".to_string(),
            excluded_segment: "meta".to_string(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `<repo_root>/.ingate.yaml`
    /// is read if present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>, repo_root: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = repo_root.join(DEFAULT_CONFIG_FILE);
                if !candidate.is_file() {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}
