//! # Document Schemas
//!
//! The three document kinds gated at commit time:
//!
//! - **Chunk manifest** (`chunks.json`): batch summary of ingested chunks,
//!   their fragments, and component distribution figures.
//! - **Ingestion audit** (`.claude/ingestion-audit.json`): full audit trail
//!   with classification confidence, transformations, compliance scores,
//!   and review state per fragment.
//! - **Metadata twin** (`online-resources/raw-text/**/*.json`): provenance
//!   record persisted next to a single fragment's text.
//!
//! The shapes evolve independently. Identical-looking records (source
//! metadata, review status, relationships) deliberately differ between
//! kinds, so nothing is shared beyond the constants below.
//!
//! Aggregates (`total_chunks`, `total_fragments`, distribution percentages)
//! are range-checked only. They are never reconciled with list lengths.

use std::fmt;

use crate::schema::*;

/// `YYYY-MM-DDTHH:MM:SSZ`.
pub const TIMESTAMP: &str = r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$";
/// `MAJOR.MINOR.PATCH`.
pub const SEMVER: &str = r"^\d+\.\d+\.\d+$";
/// Lowercase hex SHA-256 digest.
pub const SHA256_HEX: &str = r"^[a-f0-9]{64}$";
/// `NNN-slug-hex4`.
pub const CONTENT_ID: &str = r"^\d{3}-[a-z0-9-]+-[a-f0-9]{4}$";
/// Audit-trail fragment id, e.g. `chunk_01_frag_003`.
pub const AUDIT_FRAG_ID: &str = r"^chunk_\d{2,}_frag_\d{3}$";

/// Content-type classification tags.
pub const COMPONENTS: &[&str] = &[
    "plaintext",
    "callouts",
    "docks",
    "tradeoffs",
    "tables",
    "data",
    "faqs",
    "diagrams",
    "disclaimers",
    "others",
];

/// Component tags accepted in the audit trail, which also tracks headers.
pub const AUDIT_COMPONENTS: &[&str] = &[
    "plaintext",
    "callouts",
    "docks",
    "tradeoffs",
    "tables",
    "data",
    "faqs",
    "diagrams",
    "disclaimers",
    "others",
    "header_h1",
    "header_h2",
    "header_h3",
];

/// Transformation kinds recorded in the audit trail.
pub const TRANSFORMATION_KINDS: &[&str] = &[
    "deduplication",
    "line_breaking",
    "paragraph_splitting",
    "tone_adjustment",
    "modal_replacement",
    "voice_conversion",
    "conciseness",
    "passive_to_active",
    "formality_adjustment",
    "normalization",
    "placeholder_preservation",
    "encoding_fix",
    "whitespace_cleanup",
    "formatting_componentization",
];

/// Extraction methods accepted by the manifest and metadata twins.
pub const EXTRACTION_METHODS: &[&str] = &["copy_paste", "ocr", "api", "manual", "import"];

/// Extraction methods accepted by the audit trail.
pub const AUDIT_EXTRACTION_METHODS: &[&str] =
    &["manual_paste", "ocr", "api", "file_upload", "copy_paste"];

pub const CHUNK_STATUSES: &[&str] = &["pending", "processing", "completed", "failed"];

/// Fragment review states in the manifest and metadata twins.
pub const REVIEW_STATUSES: &[&str] = &["pending", "approved", "rejected", "needs_review"];

/// Fragment review states in the audit trail.
pub const AUDIT_REVIEW_STATUSES: &[&str] = &["pending", "approved", "rejected", "needs_revision"];

pub const OVERRIDE_TYPES: &[&str] = &[
    "component_change",
    "transformation_skipped",
    "classification_corrected",
    "manual_edit",
];

pub const RELATIONSHIP_TYPES: &[&str] = &[
    "continuation",
    "alternative",
    "prerequisite",
    "related",
    "contradicts",
];

pub const WARNING_TYPES: &[&str] = &[
    "long_line",
    "large_file",
    "mixed_language",
    "low_confidence",
    "placeholder_unresolved",
    "formatting_issue",
    "encoding_warning",
    "component_saturation",
];

pub const SEVERITIES: &[&str] = &["low", "medium", "high"];

pub const REVIEWERS: &[&str] = &["human", "auto"];

/// Pinned value of `metadata.schema_version` in the audit trail.
pub const AUDIT_SCHEMA_VERSION: &str = "1.0.0";

/// The document kinds this crate knows how to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    ChunkManifest,
    IngestionAudit,
    MetadataTwin,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::ChunkManifest,
        DocumentKind::IngestionAudit,
        DocumentKind::MetadataTwin,
    ];

    /// Stable identifier, also the schema name.
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::ChunkManifest => "chunk-manifest",
            DocumentKind::IngestionAudit => "ingestion-audit",
            DocumentKind::MetadataTwin => "metadata-twin",
        }
    }

    /// The descriptor tree for this kind.
    pub fn shape(self) -> Shape {
        match self {
            DocumentKind::ChunkManifest => chunk_manifest(),
            DocumentKind::IngestionAudit => ingestion_audit(),
            DocumentKind::MetadataTwin => metadata_twin(),
        }
    }

    /// Build the compiled schema for this kind.
    ///
    /// # Errors
    ///
    /// [`SchemaError::InvalidPattern`] if a built-in pattern is broken.
    pub fn schema(self) -> Result<Schema, SchemaError> {
        Schema::new(self.name(), self.shape())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn components_of(value: fn() -> Shape) -> Shape {
    object(COMPONENTS.iter().map(|&c| required(c, value())).collect())
}

// ---------------------------------------------------------------------------
// Chunk manifest
// ---------------------------------------------------------------------------

/// Shape of `chunks.json`.
pub fn chunk_manifest() -> Shape {
    let source_metadata = object(vec![
        required("extraction_method", one_of(EXTRACTION_METHODS)),
        required("page_number", integer(Bounds::at_least(1.0))),
        required("source_format", string()),
    ]);

    let fragment = object(vec![
        required("fragment_id", pattern(r"^chunk_\d+_frag_\d+$")),
        required("seq", integer(Bounds::at_least(1.0))),
        required("component", one_of(COMPONENTS)),
        required("content_id", pattern(CONTENT_ID)),
        required("title", string()),
        required("path_txt", pattern(r"^online-resources/raw-text/.+\.txt$")),
        required("path_json", pattern(r"^online-resources/raw-text/.+\.json$")),
        required("sha256_txt", pattern(SHA256_HEX)),
        required("word_count", count()),
        required("character_count", count()),
        required("transformations_applied", list(string())),
        required("review_status", one_of(REVIEW_STATUSES)),
    ]);

    let chunk = object(vec![
        required("chunk_id", pattern(r"^chunk_\d+$")),
        required("status", one_of(CHUNK_STATUSES)),
        required("ingested_at", pattern(TIMESTAMP)),
        required("source_document", string()),
        required("source_metadata", source_metadata),
        required("fragments_generated", count()),
        required("fragments", list(fragment)),
    ]);

    let target_range = || object(vec![required("min", percent()), required("max", percent())]);

    object(vec![
        required("version", pattern(SEMVER)),
        required("last_updated", pattern(TIMESTAMP)),
        required("total_chunks", count()),
        required("total_fragments", count()),
        required("chunks", list(chunk)),
        required("component_distribution", components_of(count)),
        required("component_distribution_percentage", components_of(percent)),
        required(
            "target_distribution",
            object(vec![
                required("plaintext", target_range()),
                required("others_combined", target_range()),
            ]),
        ),
        required("saturation_warnings", list(string())),
        required("placeholders_inventory", list(string())),
    ])
}

// ---------------------------------------------------------------------------
// Ingestion audit
// ---------------------------------------------------------------------------

fn pinned_range(min: f64, max: f64) -> Shape {
    object(vec![
        defaulted("min", literal(min)),
        defaulted("max", literal(max)),
    ])
}

fn audit_metadata() -> Shape {
    let component_stats = object(vec![
        optional(
            "current_distribution",
            map(object(vec![
                required("count", count()),
                required("percentage", percent()),
            ])),
        ),
        optional(
            "target_distribution",
            object(vec![
                required("plaintext", pinned_range(70.0, 80.0)),
                required("others_combined", pinned_range(20.0, 30.0)),
            ]),
        ),
        optional(
            "saturation_warnings",
            list(object(vec![
                required("component", string()),
                required("current", number(Bounds::UNBOUNDED)),
                required("threshold", number(Bounds::UNBOUNDED)),
                required("message", string()),
            ])),
        ),
    ]);

    object(vec![
        defaulted("schema_version", literal(AUDIT_SCHEMA_VERSION)),
        required("created_at", pattern(TIMESTAMP)),
        required("last_updated", pattern(TIMESTAMP)),
        optional("total_chunks", count()),
        optional("total_fragments", count()),
        optional("component_stats", component_stats),
    ])
}

fn audit_fragment() -> Shape {
    let brandguide = object(vec![
        optional("overall_score", ratio()),
        optional("voice_check", ratio()),
        optional("tone_check", ratio()),
        optional("modals_allowed", boolean()),
        optional("modals_forbidden_detected", list(string())),
        optional("max_line_length_ok", boolean()),
        optional("max_file_size_ok", boolean()),
        optional("utf8_lf_ok", boolean()),
        optional("issues", list(string())),
    ]);

    let quality = object(vec![
        optional("readability_score", percent()),
        optional("avg_sentence_length", number(Bounds::at_least(0.0))),
        optional("avg_word_length", number(Bounds::at_least(0.0))),
        optional("technical_term_density", ratio()),
        optional("passive_voice_ratio", ratio()),
    ]);

    let relationships = object(vec![
        optional("references", list(string())),
        optional("referenced_by", list(string())),
        optional(
            "related_fragments",
            list(object(vec![
                required("frag_id", pattern(AUDIT_FRAG_ID)),
                required("relationship_type", one_of(RELATIONSHIP_TYPES)),
                optional("description", string()),
            ])),
        ),
    ]);

    let warning = object(vec![
        required("type", one_of(WARNING_TYPES)),
        required("message", string()),
        required("severity", one_of(SEVERITIES)),
        optional("line_number", integer(Bounds::at_least(1.0))),
    ]);

    let review = object(vec![
        optional("status", one_of(AUDIT_REVIEW_STATUSES)),
        optional("reviewed_by", one_of(REVIEWERS)),
        optional("reviewed_at", pattern(TIMESTAMP)),
        optional("review_notes", string()),
    ]);

    object(vec![
        required("frag_id", pattern(AUDIT_FRAG_ID)),
        required("seq", integer(Bounds::at_least(1.0))),
        optional("section_title", string()),
        required("component", one_of(AUDIT_COMPONENTS)),
        required("classification_confidence", ratio()),
        optional("classification_reasoning", string()),
        optional(
            "alternative_components",
            list(object(vec![
                required("component", string()),
                required("confidence", ratio()),
            ])),
        ),
        required("original_text", string()),
        optional("original_word_count", count()),
        optional("original_char_count", count()),
        required("transformed_text", string()),
        optional("transformed_word_count", count()),
        optional("transformed_char_count", count()),
        optional(
            "transformations",
            list(object(vec![
                required("type", one_of(TRANSFORMATION_KINDS)),
                required("description", string()),
                optional("before", string()),
                optional("after", string()),
            ])),
        ),
        optional("brandguide_compliance", brandguide),
        optional(
            "manual_overrides",
            list(object(vec![
                required("override_type", one_of(OVERRIDE_TYPES)),
                required("reason", string()),
                optional("timestamp", pattern(TIMESTAMP)),
            ])),
        ),
        optional("quality_metrics", quality),
        optional("relationships", relationships),
        optional("warnings", list(warning)),
        optional("review_status", review),
        optional("final_filename", pattern(r"^\d{3}-[a-z0-9-]+-[a-f0-9]{4}\.txt$")),
        optional("final_path", string()),
        optional("final_sha256", pattern(SHA256_HEX)),
    ])
}

/// Shape of `.claude/ingestion-audit.json`.
pub fn ingestion_audit() -> Shape {
    let source_metadata = object(vec![
        optional("document_name", string()),
        optional("page_number", integer(Bounds::at_least(1.0))),
        optional("section_number", string()),
        optional("extraction_method", one_of(AUDIT_EXTRACTION_METHODS)),
        optional("source_file_sha256", pattern(SHA256_HEX)),
    ]);

    let chunk = object(vec![
        required("chunk_id", pattern(r"^chunk_\d{2,}$")),
        required("ingested_at", pattern(TIMESTAMP)),
        optional("source_description", string()),
        required("original_text", string()),
        optional("sha256_original", pattern(SHA256_HEX)),
        optional("word_count", count()),
        optional("char_count", count()),
        optional("placeholders_detected", list(string())),
        optional("source_metadata", source_metadata),
        required("fragments", list_min(audit_fragment(), 1)),
    ]);

    object(vec![
        required("metadata", audit_metadata()),
        required("chunks", list(chunk)),
    ])
}

// ---------------------------------------------------------------------------
// Metadata twin
// ---------------------------------------------------------------------------

/// Shape of a per-fragment metadata twin.
pub fn metadata_twin() -> Shape {
    let metadata = object(vec![
        required("title", string()),
        required("description", string()),
        required("domain", string()),
        required("keywords", list(string())),
        required("language", pattern(r"^[a-z]{2}-[A-Z]{2}$")),
        required("created_at", pattern(TIMESTAMP)),
        required("updated_at", pattern(TIMESTAMP)),
        required("author", string()),
        required("source", string()),
        required("section", string()),
        required("target_audience", list(string())),
        required("reading_level", string()),
        required("estimated_reading_time_minutes", count()),
    ]);

    let source_metadata = object(vec![
        required("document_name", string()),
        required("extraction_method", one_of(EXTRACTION_METHODS)),
        optional("page_number", integer(Bounds::at_least(1.0))),
        optional("source_format", string()),
    ]);

    let placeholder = object(vec![
        required("key", pattern(r"^\$\{[a-z0-9-]+\}$")),
        required("description", string()),
        required("type", string()),
        optional("format", string()),
        required("required", boolean()),
    ]);

    let transformation = object(vec![
        required("type", string()),
        required("description", string()),
        required("before", string()),
        required("after", string()),
        required("timestamp", pattern(TIMESTAMP)),
    ]);

    let brandguide = object(vec![
        required("overall_score", ratio()),
        required("voice_check", ratio()),
        required("tone_check", ratio()),
        required("modals_allowed", boolean()),
        required("modals_forbidden_detected", list(string())),
        required("max_line_length_ok", boolean()),
        required("max_file_size_ok", boolean()),
        required("utf8_lf_ok", boolean()),
        required("issues", list(string())),
    ]);

    let quality = object(vec![
        required("word_count", count()),
        required("character_count", count()),
        required("readability_score", number(Bounds::UNBOUNDED)),
        required("avg_sentence_length", number(Bounds::at_least(0.0))),
        required("avg_word_length", number(Bounds::at_least(0.0))),
        required("technical_term_density", ratio()),
        required("passive_voice_ratio", ratio()),
        required("flesch_reading_ease", number(Bounds::UNBOUNDED)),
        required("gunning_fog_index", number(Bounds::UNBOUNDED)),
    ]);

    let relationships = object(vec![
        required("references", list(string())),
        required("referenced_by", list(string())),
        required("related_fragments", list(string())),
    ]);

    let review = object(vec![
        required("status", one_of(REVIEW_STATUSES)),
        required("reviewed_by", string()),
        required("reviewed_at", pattern(TIMESTAMP)),
        required("review_notes", string()),
    ]);

    let audit = object(vec![
        required("fragment_id", string()),
        required("chunk_id", string()),
        required("ingestion_date", pattern(TIMESTAMP)),
        required("sha256_original", pattern(SHA256_HEX)),
        required("sha256_transformed", pattern(SHA256_HEX)),
        required("classification_confidence", ratio()),
        required("classification_reasoning", string()),
        required("alternative_components", list(string())),
    ]);

    object(vec![
        required("version", pattern(SEMVER)),
        required("content_id", pattern(CONTENT_ID)),
        required("component", one_of(COMPONENTS)),
        required("original_text", non_blank()),
        required("transformed_text", non_blank()),
        required("metadata", metadata),
        required("source_metadata", source_metadata),
        required("placeholders", list(placeholder)),
        required("transformations", list(transformation)),
        required("brandguide_compliance", brandguide),
        required("quality_metrics", quality),
        required("relationships", relationships),
        required("warnings", list(string())),
        required("review_status", review),
        required("audit", audit),
    ])
}
