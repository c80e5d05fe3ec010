//! # ingate-schema: Document Schemas & Structural Validation
//!
//! Schemas and validation for the JSON documents an ingestion pipeline
//! commits alongside its content: the chunk manifest, the ingestion audit
//! trail, and per-fragment metadata twins.
//!
//! ## Modules
//!
//! - [`schema`]: the descriptor tree ([`Shape`], [`Field`], [`Schema`])
//!   and builder functions.
//! - [`documents`]: the three document schemas and [`DocumentKind`].
//! - [`validate`]: the recursive validator, violation reporting, and
//!   document loading.
//! - [`json_schema`]: JSON Schema export and validation against external
//!   JSON Schema files.
//!
//! ## Example
//!
//! ```
//! use ingate_schema::{validate_value, DocumentKind};
//! use serde_json::json;
//!
//! let schema = DocumentKind::IngestionAudit.schema().unwrap();
//! let doc = json!({
//!     "metadata": {
//!         "schema_version": "2.0.0",
//!         "created_at": "2025-01-01T00:00:00Z",
//!         "last_updated": "2025-01-01T00:00:00Z"
//!     },
//!     "chunks": []
//! });
//! let violations = validate_value(&schema, &doc).unwrap_err();
//! assert_eq!(violations.paths(), vec!["metadata.schema_version"]);
//! ```
//!
//! ## Crate Policy
//!
//! - Validation is read-only; documents are never modified.
//! - Checks are structural. Nothing is reconciled across fields or across
//!   documents.

pub mod documents;
pub mod json_schema;
pub mod schema;
pub mod validate;

pub use documents::DocumentKind;
pub use json_schema::{to_json_schema, ExternalSchema, ExternalSchemaError};
pub use schema::{Bounds, Field, Presence, Schema, SchemaError, Shape, StringRule};
pub use validate::{
    load_document, validate_file, validate_value, FieldPath, Segment, ValidateError, Violation,
    Violations,
};
