//! Documents a freshly ingested repository would hold.

#![allow(dead_code)]

use serde_json::{json, Value};

pub const HASH: &str = "3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b8555";

const COMPONENTS: [&str; 10] = [
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

fn per_component(value: Value) -> Value {
    Value::Object(
        COMPONENTS
            .iter()
            .map(|c| (c.to_string(), value.clone()))
            .collect(),
    )
}

/// `chunks.json` before the first ingestion.
pub fn empty_manifest() -> Value {
    let mut percentages = per_component(json!(0.0));
    percentages["plaintext"] = json!(80.0);
    percentages["others"] = json!(20.0);
    json!({
        "version": "1.0.0",
        "last_updated": "2025-04-02T09:30:00Z",
        "total_chunks": 0,
        "total_fragments": 0,
        "chunks": [],
        "component_distribution": per_component(json!(0)),
        "component_distribution_percentage": percentages,
        "target_distribution": {
            "plaintext": {"min": 70.0, "max": 80.0},
            "others_combined": {"min": 20.0, "max": 30.0}
        },
        "saturation_warnings": [],
        "placeholders_inventory": []
    })
}

/// `chunks.json` after one pasted chunk became one fragment.
pub fn manifest() -> Value {
    let mut doc = empty_manifest();
    doc["total_chunks"] = json!(1);
    doc["total_fragments"] = json!(1);
    doc["chunks"] = json!([{
        "chunk_id": "chunk_1",
        "status": "completed",
        "ingested_at": "2025-04-02T09:29:00Z",
        "source_document": "onboarding.docx",
        "source_metadata": {
            "extraction_method": "copy_paste",
            "page_number": 2,
            "source_format": "docx"
        },
        "fragments_generated": 1,
        "fragments": [{
            "fragment_id": "chunk_1_frag_1",
            "seq": 1,
            "component": "plaintext",
            "content_id": "001-first-week-c0de",
            "title": "First week",
            "path_txt": "online-resources/raw-text/plaintext/001-first-week-c0de.txt",
            "path_json": "online-resources/raw-text/plaintext/001-first-week-c0de.json",
            "sha256_txt": HASH,
            "word_count": 48,
            "character_count": 260,
            "transformations_applied": [],
            "review_status": "approved"
        }]
    }]);
    doc
}

/// `.claude/ingestion-audit.json` with only required fields.
pub fn minimal_audit() -> Value {
    json!({
        "metadata": {
            "created_at": "2025-04-02T09:00:00Z",
            "last_updated": "2025-04-02T09:30:00Z"
        },
        "chunks": [{
            "chunk_id": "chunk_01",
            "ingested_at": "2025-04-02T09:00:00Z",
            "original_text": "First week",
            "fragments": [{
                "frag_id": "chunk_01_frag_001",
                "seq": 1,
                "component": "plaintext",
                "classification_confidence": 0.88,
                "original_text": "First week",
                "transformed_text": "First week"
            }]
        }]
    })
}

/// A metadata twin as written next to its `.txt` fragment.
pub fn twin() -> Value {
    let compliance = json!({
        "overall_score": 1.0,
        "voice_check": 1.0,
        "tone_check": 1.0,
        "modals_allowed": true,
        "modals_forbidden_detected": [],
        "max_line_length_ok": true,
        "max_file_size_ok": true,
        "utf8_lf_ok": true,
        "issues": []
    });
    json!({
        "version": "1.0.0",
        "content_id": "001-first-week-c0de",
        "component": "plaintext",
        "original_text": "Your first week at ${company-name}.",
        "transformed_text": "Your first week at ${company-name}.",
        "metadata": {
            "title": "First week",
            "description": "What to expect",
            "domain": "onboarding",
            "keywords": ["first week"],
            "language": "en-US",
            "created_at": "2025-04-02T09:30:00Z",
            "updated_at": "2025-04-02T09:30:00Z",
            "author": "ingestion",
            "source": "onboarding.docx",
            "section": "2",
            "target_audience": ["new hires"],
            "reading_level": "basic",
            "estimated_reading_time_minutes": 1
        },
        "source_metadata": {
            "document_name": "onboarding.docx",
            "extraction_method": "copy_paste",
            "page_number": null,
            "source_format": "docx"
        },
        "placeholders": [{
            "key": "${company-name}",
            "description": "Legal company name",
            "type": "string",
            "format": null,
            "required": true
        }],
        "transformations": [],
        "brandguide_compliance": compliance,
        "quality_metrics": {
            "word_count": 6,
            "character_count": 35,
            "readability_score": 80.0,
            "avg_sentence_length": 6.0,
            "avg_word_length": 4.8,
            "technical_term_density": 0.0,
            "passive_voice_ratio": 0.0,
            "flesch_reading_ease": 80.0,
            "gunning_fog_index": 3.2
        },
        "relationships": {
            "references": [],
            "referenced_by": [],
            "related_fragments": []
        },
        "warnings": [],
        "review_status": {
            "status": "approved",
            "reviewed_by": "human",
            "reviewed_at": "2025-04-02T10:00:00Z",
            "review_notes": ""
        },
        "audit": {
            "fragment_id": "chunk_1_frag_1",
            "chunk_id": "chunk_1",
            "ingestion_date": "2025-04-02T09:30:00Z",
            "sha256_original": HASH,
            "sha256_transformed": HASH,
            "classification_confidence": 0.88,
            "classification_reasoning": "Short prose paragraph",
            "alternative_components": []
        }
    })
}
