//! Known-good documents shared by the integration tests.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const HASH: &str = "3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b8555";

fn components(value: Value) -> Value {
    json!({
        "plaintext": value, "callouts": value, "docks": value, "tradeoffs": value,
        "tables": value, "data": value, "faqs": value, "diagrams": value,
        "disclaimers": value, "others": value
    })
}

/// A manifest with no chunks and percentages summing to 100.
pub fn empty_manifest() -> Value {
    let mut percentages = components(json!(0.0));
    percentages["plaintext"] = json!(75.0);
    percentages["callouts"] = json!(25.0);
    json!({
        "version": "1.0.0",
        "last_updated": "2025-03-01T12:00:00Z",
        "total_chunks": 0,
        "total_fragments": 0,
        "chunks": [],
        "component_distribution": components(json!(0)),
        "component_distribution_percentage": percentages,
        "target_distribution": {
            "plaintext": {"min": 70.0, "max": 80.0},
            "others_combined": {"min": 20.0, "max": 30.0}
        },
        "saturation_warnings": [],
        "placeholders_inventory": []
    })
}

pub fn manifest_fragment() -> Value {
    json!({
        "fragment_id": "chunk_1_frag_1",
        "seq": 1,
        "component": "plaintext",
        "content_id": "001-welcome-note-a1b2",
        "title": "Welcome",
        "path_txt": "online-resources/raw-text/plaintext/001-welcome-note-a1b2.txt",
        "path_json": "online-resources/raw-text/plaintext/001-welcome-note-a1b2.json",
        "sha256_txt": HASH,
        "word_count": 120,
        "character_count": 640,
        "transformations_applied": ["whitespace_cleanup"],
        "review_status": "pending"
    })
}

/// A manifest with one chunk holding one fragment.
pub fn manifest() -> Value {
    let mut doc = empty_manifest();
    doc["total_chunks"] = json!(1);
    doc["total_fragments"] = json!(1);
    doc["chunks"] = json!([{
        "chunk_id": "chunk_1",
        "status": "completed",
        "ingested_at": "2025-03-01T11:59:00Z",
        "source_document": "handbook.pdf",
        "source_metadata": {
            "extraction_method": "copy_paste",
            "page_number": 3,
            "source_format": "pdf"
        },
        "fragments_generated": 1,
        "fragments": [manifest_fragment()]
    }]);
    doc
}

pub fn audit_fragment() -> Value {
    json!({
        "frag_id": "chunk_01_frag_001",
        "seq": 1,
        "section_title": "Intro",
        "component": "header_h1",
        "classification_confidence": 0.92,
        "classification_reasoning": "Single short line in title case",
        "alternative_components": [{"component": "plaintext", "confidence": 0.08}],
        "original_text": "WELCOME",
        "original_word_count": 1,
        "original_char_count": 7,
        "transformed_text": "Welcome",
        "transformed_word_count": 1,
        "transformed_char_count": 7,
        "transformations": [{
            "type": "normalization",
            "description": "Title case",
            "before": "WELCOME",
            "after": "Welcome"
        }],
        "brandguide_compliance": {
            "overall_score": 0.9,
            "voice_check": 1.0,
            "tone_check": 0.8,
            "modals_allowed": true,
            "modals_forbidden_detected": [],
            "max_line_length_ok": true,
            "max_file_size_ok": true,
            "utf8_lf_ok": true,
            "issues": []
        },
        "manual_overrides": [{
            "override_type": "classification_corrected",
            "reason": "Heading, not body text",
            "timestamp": "2025-03-01T12:05:00Z"
        }],
        "quality_metrics": {
            "readability_score": 88.5,
            "avg_sentence_length": 1.0,
            "avg_word_length": 7.0,
            "technical_term_density": 0.0,
            "passive_voice_ratio": 0.0
        },
        "relationships": {
            "references": [],
            "referenced_by": ["chunk_01_frag_002"],
            "related_fragments": [{
                "frag_id": "chunk_01_frag_002",
                "relationship_type": "continuation",
                "description": null
            }]
        },
        "warnings": [{
            "type": "low_confidence",
            "message": "Short fragment",
            "severity": "low",
            "line_number": 1
        }],
        "review_status": {
            "status": "approved",
            "reviewed_by": "human",
            "reviewed_at": "2025-03-01T12:10:00Z",
            "review_notes": null
        },
        "final_filename": "001-welcome-a1b2.txt",
        "final_path": "online-resources/raw-text/header_h1/001-welcome-a1b2.txt",
        "final_sha256": HASH
    })
}

/// An audit trail with every optional block populated.
pub fn audit() -> Value {
    json!({
        "metadata": {
            "schema_version": "1.0.0",
            "created_at": "2025-03-01T11:00:00Z",
            "last_updated": "2025-03-01T12:10:00Z",
            "total_chunks": 1,
            "total_fragments": 1,
            "component_stats": {
                "current_distribution": {
                    "header_h1": {"count": 1, "percentage": 100.0}
                },
                "target_distribution": {
                    "plaintext": {"min": 70.0, "max": 80.0},
                    "others_combined": {"min": 20.0, "max": 30.0}
                },
                "saturation_warnings": [{
                    "component": "header_h1",
                    "current": 100.0,
                    "threshold": 30.0,
                    "message": "header_h1 above threshold"
                }]
            }
        },
        "chunks": [{
            "chunk_id": "chunk_01",
            "ingested_at": "2025-03-01T11:00:00Z",
            "source_description": "Pasted from handbook",
            "original_text": "WELCOME",
            "sha256_original": HASH,
            "word_count": 1,
            "char_count": 7,
            "placeholders_detected": [],
            "source_metadata": {
                "document_name": "handbook.pdf",
                "page_number": 1,
                "section_number": "1",
                "extraction_method": "manual_paste",
                "source_file_sha256": HASH
            },
            "fragments": [audit_fragment()]
        }]
    })
}

/// An audit trail carrying only what is required.
pub fn minimal_audit() -> Value {
    json!({
        "metadata": {
            "created_at": "2025-03-01T11:00:00Z",
            "last_updated": "2025-03-01T11:00:00Z"
        },
        "chunks": [{
            "chunk_id": "chunk_01",
            "ingested_at": "2025-03-01T11:00:00Z",
            "original_text": "Hello",
            "fragments": [{
                "frag_id": "chunk_01_frag_001",
                "seq": 1,
                "component": "plaintext",
                "classification_confidence": 1.0,
                "original_text": "Hello",
                "transformed_text": "Hello"
            }]
        }]
    })
}

pub fn twin() -> Value {
    json!({
        "version": "1.0.0",
        "content_id": "001-welcome-note-a1b2",
        "component": "plaintext",
        "original_text": "Welcome to ${company-name}.",
        "transformed_text": "Welcome to ${company-name}.",
        "metadata": {
            "title": "Welcome",
            "description": "Opening note",
            "domain": "onboarding",
            "keywords": ["welcome"],
            "language": "pt-BR",
            "created_at": "2025-03-01T12:00:00Z",
            "updated_at": "2025-03-01T12:00:00Z",
            "author": "ingestion",
            "source": "handbook.pdf",
            "section": "1",
            "target_audience": ["new hires"],
            "reading_level": "basic",
            "estimated_reading_time_minutes": 1
        },
        "source_metadata": {
            "document_name": "handbook.pdf",
            "extraction_method": "copy_paste",
            "page_number": 1,
            "source_format": null
        },
        "placeholders": [{
            "key": "${company-name}",
            "description": "Legal company name",
            "type": "string",
            "format": null,
            "required": true
        }],
        "transformations": [{
            "type": "whitespace_cleanup",
            "description": "Trimmed trailing spaces",
            "before": "Welcome to ${company-name}.  ",
            "after": "Welcome to ${company-name}.",
            "timestamp": "2025-03-01T12:00:00Z"
        }],
        "brandguide_compliance": {
            "overall_score": 0.95,
            "voice_check": 1.0,
            "tone_check": 0.9,
            "modals_allowed": true,
            "modals_forbidden_detected": [],
            "max_line_length_ok": true,
            "max_file_size_ok": true,
            "utf8_lf_ok": true,
            "issues": []
        },
        "quality_metrics": {
            "word_count": 3,
            "character_count": 27,
            "readability_score": 71.2,
            "avg_sentence_length": 3.0,
            "avg_word_length": 7.3,
            "technical_term_density": 0.0,
            "passive_voice_ratio": 0.0,
            "flesch_reading_ease": 71.2,
            "gunning_fog_index": 4.1
        },
        "relationships": {
            "references": [],
            "referenced_by": [],
            "related_fragments": []
        },
        "warnings": [],
        "review_status": {
            "status": "needs_review",
            "reviewed_by": "auto",
            "reviewed_at": "2025-03-01T12:00:00Z",
            "review_notes": ""
        },
        "audit": {
            "fragment_id": "chunk_1_frag_1",
            "chunk_id": "chunk_1",
            "ingestion_date": "2025-03-01T12:00:00Z",
            "sha256_original": HASH,
            "sha256_transformed": HASH,
            "classification_confidence": 0.97,
            "classification_reasoning": "Prose paragraph",
            "alternative_components": ["callouts"]
        }
    })
}
