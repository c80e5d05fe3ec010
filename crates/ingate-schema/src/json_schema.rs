//! # JSON Schema Interop
//!
//! Two directions:
//!
//! - [`to_json_schema`] renders a descriptor tree as a Draft 2020-12 JSON
//!   Schema document, so upstream producers can check their output with
//!   any off-the-shelf validator.
//! - [`ExternalSchema`] loads a JSON Schema document from disk and checks
//!   documents against it with the `jsonschema` crate, reporting through
//!   the same [`Violation`] type as the built-in walk.
//!
//! ## Reference resolution
//!
//! External schemas are resolved offline. Any `$ref` that is not internal
//! to the document is refused by [`OfflineRetriever`] instead of fetched.

use std::path::{Path, PathBuf};

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::schema::{Bounds, Field, Presence, Schema, Shape, StringRule};
use crate::validate::{FieldPath, Segment, Violation, Violations};

const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Render `schema` as a JSON Schema document.
pub fn to_json_schema(schema: &Schema) -> Value {
    let mut root = match shape_to_json(schema.root()) {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("allOf".to_string(), json!([other]));
            map
        }
    };
    root.insert("$schema".to_string(), json!(DRAFT_2020_12));
    root.insert("title".to_string(), json!(schema.name()));
    Value::Object(root)
}

fn shape_to_json(shape: &Shape) -> Value {
    match shape {
        Shape::String(rule) => string_to_json(rule),
        Shape::Integer(bounds) => with_bounds(json!({"type": "integer"}), bounds),
        Shape::Number(bounds) => with_bounds(json!({"type": "number"}), bounds),
        Shape::Boolean => json!({"type": "boolean"}),
        Shape::Literal(value) => json!({"const": value}),
        Shape::Object(fields) => object_to_json(fields),
        Shape::List { item, min_len } => {
            let mut out = json!({"type": "array", "items": shape_to_json(item)});
            if *min_len > 0 {
                out["minItems"] = json!(min_len);
            }
            out
        }
        Shape::Map(value) => json!({
            "type": "object",
            "additionalProperties": shape_to_json(value),
        }),
    }
}

fn string_to_json(rule: &StringRule) -> Value {
    let mut out = json!({"type": "string"});
    if let Some(values) = rule.one_of {
        out["enum"] = json!(values);
    }
    // JSON Schema patterns are unanchored searches.
    let mut patterns: Vec<String> = Vec::new();
    if let Some(source) = rule.pattern {
        patterns.push(format!("^(?:{})$", ecma_pattern(source)));
    }
    if rule.non_blank {
        patterns.push(non_whitespace_class());
    }
    match patterns.len() {
        0 => {}
        1 => out["pattern"] = json!(patterns[0]),
        _ => {
            out["allOf"] = Value::Array(
                patterns
                    .into_iter()
                    .map(|p| json!({"pattern": p}))
                    .collect(),
            )
        }
    }
    out
}

/// Characters `char::is_whitespace` accepts, as inclusive ranges.
const WHITESPACE: &[(char, char)] = &[
    ('\u{9}', '\u{D}'),
    ('\u{20}', '\u{20}'),
    ('\u{85}', '\u{85}'),
    ('\u{A0}', '\u{A0}'),
    ('\u{1680}', '\u{1680}'),
    ('\u{2000}', '\u{200A}'),
    ('\u{2028}', '\u{2029}'),
    ('\u{202F}', '\u{202F}'),
    ('\u{205F}', '\u{205F}'),
    ('\u{3000}', '\u{3000}'),
];

/// A class matching any character `str::trim` would keep. ECMA `\S` uses a
/// different whitespace set.
fn non_whitespace_class() -> String {
    let mut class = String::from("[^");
    for &(start, end) in WHITESPACE {
        class.push(start);
        if end != start {
            class.push('-');
            class.push(end);
        }
    }
    class.push(']');
    class
}

/// Rewrite a `regex` crate pattern so an ECMA engine reads it the same way.
/// `\d` is ASCII-only in ECMA and `.` there also stops at `\r`, U+2028 and
/// U+2029.
fn ecma_pattern(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    let mut in_class = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('d') => out.push_str(r"\p{Nd}"),
                Some('D') => out.push_str(r"\P{Nd}"),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '.' if !in_class => out.push_str(r"[^\n]"),
            _ => out.push(c),
        }
    }
    out
}

fn with_bounds(mut out: Value, bounds: &Bounds) -> Value {
    if let Some(min) = bounds.min {
        out["minimum"] = json!(min);
    }
    if let Some(max) = bounds.max {
        out["maximum"] = json!(max);
    }
    out
}

fn object_to_json(fields: &[Field]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in fields {
        let inner = shape_to_json(&field.shape);
        let property = match field.presence {
            Presence::Optional => json!({"anyOf": [inner, {"type": "null"}]}),
            Presence::Required => {
                required.push(field.name);
                inner
            }
            Presence::Defaulted => inner,
        };
        properties.insert(field.name.to_string(), property);
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

// ---------------------------------------------------------------------------
// External schemas
// ---------------------------------------------------------------------------

/// Failures loading an external JSON Schema. These abort before any
/// document is judged.
#[derive(Error, Debug)]
pub enum ExternalSchemaError {
    /// The schema file does not exist.
    #[error("JSON Schema {} does not exist", .path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The schema file could not be read.
    #[error("failed to read JSON Schema {}: {source}", .path.display())]
    Read {
        /// The unreadable path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not well-formed JSON.
    #[error("invalid JSON in schema {}: {source}", .path.display())]
    Parse {
        /// The malformed path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The schema is well-formed JSON but not a usable JSON Schema.
    #[error("failed to compile JSON Schema {name}: {reason}")]
    Compile {
        /// Schema file name or title.
        name: String,
        /// Compiler message.
        reason: String,
    },
}

/// Refuses every external `$ref`; this tool never touches the network.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference not allowed: {}", uri.as_str()).into())
    }
}

/// A compiled JSON Schema loaded from disk.
pub struct ExternalSchema {
    name: String,
    validator: Validator,
}

impl std::fmt::Debug for ExternalSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalSchema")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ExternalSchema {
    /// Load and compile the JSON Schema at `path`.
    ///
    /// # Errors
    ///
    /// Any [`ExternalSchemaError`] variant.
    pub fn load(path: &Path) -> Result<Self, ExternalSchemaError> {
        if !path.exists() {
            return Err(ExternalSchemaError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|source| ExternalSchemaError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let value: Value =
            serde_json::from_str(&content).map_err(|source| ExternalSchemaError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_value(name, &value)
    }

    /// Compile an in-memory JSON Schema document.
    ///
    /// # Errors
    ///
    /// [`ExternalSchemaError::Compile`] if the document is not a valid schema.
    pub fn from_value(name: impl Into<String>, schema: &Value) -> Result<Self, ExternalSchemaError> {
        let name = name.into();
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .with_retriever(OfflineRetriever)
            .build(schema)
            .map_err(|e| ExternalSchemaError::Compile {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        tracing::debug!(schema = %name, "compiled external JSON Schema");
        Ok(Self { name, validator })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check `document`, collecting every violation.
    pub fn validate(&self, document: &Value) -> Result<(), Violations> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(document)
            .map(|err| Violation {
                path: pointer_to_path(document, &err.instance_path.to_string()),
                message: err.to_string(),
                found: None,
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.into())
        }
    }
}

/// Convert a JSON Pointer into a [`FieldPath`], using the document to tell
/// list indices from numeric object keys.
fn pointer_to_path(document: &Value, pointer: &str) -> FieldPath {
    let mut segments = Vec::new();
    let mut current = Some(document);
    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        let index = match current {
            Some(Value::Array(_)) => token.parse::<usize>().ok(),
            _ => None,
        };
        match index {
            Some(i) => {
                current = current.and_then(|v| v.get(i));
                segments.push(Segment::Index(i));
            }
            None => {
                current = current.and_then(|v| v.get(token.as_str()));
                segments.push(Segment::Key(token));
            }
        }
    }
    FieldPath::from(segments)
}
