//! The exported JSON Schema must judge documents the same way as the
//! built-in validator. Each document below is run through both.

mod common;

use ingate_schema::{to_json_schema, validate_value, DocumentKind, ExternalSchema};
use serde_json::{json, Value};

fn both(kind: DocumentKind, doc: &Value) -> (bool, bool) {
    let schema = kind.schema().unwrap();
    let exported = ExternalSchema::from_value(kind.name(), &to_json_schema(&schema))
        .unwrap_or_else(|e| panic!("exported {kind} schema does not compile: {e}"));
    (
        validate_value(&schema, doc).is_ok(),
        exported.validate(doc).is_ok(),
    )
}

fn assert_agree(kind: DocumentKind, doc: Value, expect_valid: bool) {
    let (builtin, exported) = both(kind, &doc);
    assert_eq!(builtin, expect_valid, "built-in validator disagrees for {kind}");
    assert_eq!(exported, expect_valid, "exported JSON Schema disagrees for {kind}");
}

#[test]
fn valid_fixtures_pass_both() {
    assert_agree(DocumentKind::ChunkManifest, common::manifest(), true);
    assert_agree(DocumentKind::ChunkManifest, common::empty_manifest(), true);
    assert_agree(DocumentKind::IngestionAudit, common::audit(), true);
    assert_agree(DocumentKind::IngestionAudit, common::minimal_audit(), true);
    assert_agree(DocumentKind::MetadataTwin, common::twin(), true);
}

#[test]
fn enum_violation_fails_both() {
    let mut doc = common::manifest();
    doc["chunks"][0]["fragments"][0]["component"] = json!("invalid_tag");
    assert_agree(DocumentKind::ChunkManifest, doc, false);
}

#[test]
fn pattern_violation_fails_both() {
    let mut doc = common::manifest();
    doc["chunks"][0]["fragments"][0]["sha256_txt"] = json!("ABC");
    assert_agree(DocumentKind::ChunkManifest, doc, false);
}

#[test]
fn pinned_literal_violation_fails_both() {
    let mut doc = common::audit();
    doc["metadata"]["schema_version"] = json!("2.0.0");
    assert_agree(DocumentKind::IngestionAudit, doc, false);
}

#[test]
fn pinned_literal_may_be_omitted_in_both() {
    let mut doc = common::audit();
    doc["metadata"].as_object_mut().unwrap().remove("schema_version");
    assert_agree(DocumentKind::IngestionAudit, doc, true);
}

#[test]
fn min_items_violation_fails_both() {
    let mut doc = common::minimal_audit();
    doc["chunks"][0]["fragments"] = json!([]);
    assert_agree(DocumentKind::IngestionAudit, doc, false);
}

#[test]
fn optional_null_passes_both() {
    let mut doc = common::minimal_audit();
    doc["metadata"]["total_chunks"] = Value::Null;
    doc["chunks"][0]["source_metadata"] = Value::Null;
    assert_agree(DocumentKind::IngestionAudit, doc, true);
}

#[test]
fn required_null_fails_both() {
    let mut doc = common::twin();
    doc["audit"]["chunk_id"] = Value::Null;
    assert_agree(DocumentKind::MetadataTwin, doc, false);
}

#[test]
fn blank_text_fails_both() {
    let mut doc = common::twin();
    doc["transformed_text"] = json!(" \n\t ");
    assert_agree(DocumentKind::MetadataTwin, doc, false);
}

#[test]
fn range_violation_fails_both() {
    let mut doc = common::twin();
    doc["quality_metrics"]["passive_voice_ratio"] = json!(1.5);
    assert_agree(DocumentKind::MetadataTwin, doc, false);
}

#[test]
fn missing_required_field_fails_both() {
    let mut doc = common::twin();
    doc.as_object_mut().unwrap().remove("review_status");
    assert_agree(DocumentKind::MetadataTwin, doc, false);
}

#[test]
fn non_ascii_digits_are_digits_in_both() {
    let mut doc = common::manifest();
    doc["chunks"][0]["fragments"][0]["content_id"] = json!("١٢٣-welcome-a1b2");
    assert_agree(DocumentKind::ChunkManifest, doc, true);
}

#[test]
fn next_line_counts_as_blank_in_both() {
    let mut doc = common::twin();
    doc["original_text"] = json!("\u{85}");
    assert_agree(DocumentKind::MetadataTwin, doc, false);
}

#[test]
fn byte_order_mark_is_not_blank_in_either() {
    let mut doc = common::twin();
    doc["original_text"] = json!("\u{FEFF}");
    assert_agree(DocumentKind::MetadataTwin, doc, true);
}

#[test]
fn carriage_return_matches_dot_in_both() {
    let mut doc = common::manifest();
    doc["chunks"][0]["fragments"][0]["path_txt"] =
        json!("online-resources/raw-text/plaintext/a\rb.txt");
    assert_agree(DocumentKind::ChunkManifest, doc, true);
}
