//! # Structural Validation
//!
//! One recursive walk interprets any [`Schema`] against a parsed JSON
//! document. The walk is depth-first and never stops early: each node
//! reports at most one violation (its first failed check) and traversal
//! then carries on into siblings, so a single run lists every independent
//! defect in the document.
//!
//! Loading is separate from checking. [`load_document`] reads and parses a
//! file and fails with [`ValidateError::NotFound`], [`ValidateError::Read`]
//! or [`ValidateError::Parse`]; a document that fails to parse never
//! reaches the structural walk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{Bounds, Field, Presence, Schema, Shape, StringRule};

/// Longest string excerpt shown when describing an offending value.
const EXCERPT_CHARS: usize = 60;

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// One step from a parent node to a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An object key.
    Key(String),
    /// A list index.
    Index(usize),
}

/// Location of a node relative to the document root.
///
/// Renders dotted and bracketed, e.g. `chunks[0].fragments[2].component`.
/// Keys that are empty or contain `.`, `[`, `]` or `"` render as a quoted
/// bracket, e.g. `current_distribution["a.b"].count`. The root itself
/// renders as `(root)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<Segment>);

impl FieldPath {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// This path extended by an object key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Key(key.into()));
        Self(segments)
    }

    /// This path extended by a list index.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Index(index));
        Self(segments)
    }
}

impl From<Vec<Segment>> for FieldPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if needs_quoting(key) => {
                    write!(f, "[{}]", Value::String(key.clone()))?
                }
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Keys that would read as different nesting when printed bare.
fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(|c: char| matches!(c, '.' | '[' | ']' | '"'))
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// A single failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Where in the document the check failed.
    pub path: FieldPath,
    /// What the check expected.
    pub message: String,
    /// Description of the offending value, when there was one.
    pub found: Option<String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(found) = &self.found {
            write!(f, " (found {found})")?;
        }
        Ok(())
    }
}

/// Every violation found in one document, in traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Rendered paths of every violation, in order.
    pub fn paths(&self) -> Vec<String> {
        self.0.iter().map(|v| v.path.to_string()).collect()
    }

    /// Whether any violation sits at the given rendered path.
    pub fn contains_path(&self, path: &str) -> bool {
        self.0.iter().any(|v| v.path.to_string() == path)
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.0
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a document file did not validate.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// The file does not exist.
    #[error("{} does not exist", .path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// The unreadable path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not well-formed JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// The malformed path.
        path: PathBuf,
        /// Parser error, carrying line and column.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but broke the schema.
    #[error("{}: {} violation(s) against {schema}:\n{violations}", .path.display(), .violations.len())]
    Invalid {
        /// The offending document.
        path: PathBuf,
        /// Name of the schema that was violated.
        schema: String,
        /// Every violation found.
        violations: Violations,
    },
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Read and parse a JSON document.
///
/// # Errors
///
/// [`ValidateError::NotFound`] if `path` does not exist,
/// [`ValidateError::Read`] if it cannot be read, and
/// [`ValidateError::Parse`] if its content is not well-formed JSON.
pub fn load_document(path: &Path) -> Result<Value, ValidateError> {
    if !path.exists() {
        return Err(ValidateError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| ValidateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ValidateError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Check a parsed document against `schema`, collecting every violation.
pub fn validate_value(schema: &Schema, document: &Value) -> Result<(), Violations> {
    let mut walker = Walker {
        schema,
        violations: Vec::new(),
    };
    walker.visit(schema.root(), document, &FieldPath::root());
    if walker.violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(
            schema = schema.name(),
            count = walker.violations.len(),
            "document failed validation"
        );
        Err(Violations(walker.violations))
    }
}

/// Load the file at `path` and check it against `schema`.
///
/// # Errors
///
/// Any [`load_document`] error, or [`ValidateError::Invalid`] carrying the
/// full violation list.
pub fn validate_file(schema: &Schema, path: &Path) -> Result<(), ValidateError> {
    let document = load_document(path)?;
    validate_value(schema, &document).map_err(|violations| ValidateError::Invalid {
        path: path.to_path_buf(),
        schema: schema.name().to_string(),
        violations,
    })
}

// ---------------------------------------------------------------------------
// Walker
// ---------------------------------------------------------------------------

struct Walker<'s> {
    schema: &'s Schema,
    violations: Vec<Violation>,
}

impl Walker<'_> {
    fn fail(&mut self, path: &FieldPath, message: impl Into<String>, found: Option<&Value>) {
        self.violations.push(Violation {
            path: path.clone(),
            message: message.into(),
            found: found.map(describe),
        });
    }

    fn visit(&mut self, shape: &Shape, value: &Value, path: &FieldPath) {
        match shape {
            Shape::String(rule) => self.visit_string(rule, value, path),
            Shape::Integer(bounds) => match as_integer(value) {
                Some(n) => self.check_bounds(bounds, n, value, path),
                None => self.fail(path, "expected an integer", Some(value)),
            },
            Shape::Number(bounds) => match value.as_f64() {
                Some(n) => self.check_bounds(bounds, n, value, path),
                None => self.fail(path, "expected a number", Some(value)),
            },
            Shape::Boolean => {
                if !value.is_boolean() {
                    self.fail(path, "expected a boolean", Some(value));
                }
            }
            Shape::Literal(expected) => {
                if !literal_matches(expected, value) {
                    self.fail(path, format!("must equal {expected}"), Some(value));
                }
            }
            Shape::Object(fields) => match value.as_object() {
                Some(map) => self.visit_fields(fields, map, path),
                None => self.fail(path, "expected an object", Some(value)),
            },
            Shape::List { item, min_len } => match value.as_array() {
                Some(items) => {
                    if items.len() < *min_len {
                        self.fail(
                            path,
                            format!("must contain at least {min_len} item(s)"),
                            Some(value),
                        );
                    }
                    for (i, element) in items.iter().enumerate() {
                        self.visit(item, element, &path.index(i));
                    }
                }
                None => self.fail(path, "expected an array", Some(value)),
            },
            Shape::Map(inner) => match value.as_object() {
                Some(map) => {
                    for (key, element) in map {
                        self.visit(inner, element, &path.key(key.as_str()));
                    }
                }
                None => self.fail(path, "expected an object", Some(value)),
            },
        }
    }

    fn visit_fields(&mut self, fields: &[Field], map: &Map<String, Value>, path: &FieldPath) {
        for field in fields {
            let child = path.key(field.name);
            match (map.get(field.name), field.presence) {
                (None, Presence::Required) => self.fail(&child, "field required", None),
                (None, _) => {}
                (Some(Value::Null), Presence::Optional) => {}
                (Some(value), _) => self.visit(&field.shape, value, &child),
            }
        }
    }

    fn visit_string(&mut self, rule: &StringRule, value: &Value, path: &FieldPath) {
        let Some(text) = value.as_str() else {
            self.fail(path, "expected a string", Some(value));
            return;
        };
        if rule.non_blank && text.trim().is_empty() {
            self.fail(path, "text cannot be empty or whitespace only", Some(value));
            return;
        }
        if let Some(allowed) = rule.one_of {
            if !allowed.contains(&text) {
                self.fail(
                    path,
                    format!("must be one of: {}", allowed.join(", ")),
                    Some(value),
                );
                return;
            }
        }
        if let Some(source) = rule.pattern {
            // Every pattern is compiled in `Schema::new`; a miss is treated
            // as a failed match rather than a panic.
            let matched = self
                .schema
                .regex(source)
                .is_some_and(|regex| regex.is_match(text));
            if !matched {
                self.fail(path, format!("does not match pattern {source}"), Some(value));
            }
        }
    }

    fn check_bounds(&mut self, bounds: &Bounds, n: f64, value: &Value, path: &FieldPath) {
        if let Some(message) = bounds.check(n) {
            self.fail(path, message, Some(value));
        }
    }
}

/// Integers are JSON numbers without a fractional part; `3.0` counts.
fn as_integer(value: &Value) -> Option<f64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(i) = number.as_i64() {
        return Some(i as f64);
    }
    if let Some(u) = number.as_u64() {
        return Some(u as f64);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
}

fn literal_matches(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => expected == actual,
    }
}

/// Short human-readable description of a JSON value.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > EXCERPT_CHARS => {
            let excerpt: String = s.chars().take(EXCERPT_CHARS).collect();
            format!("{}...", Value::String(excerpt))
        }
        Value::String(_) => value.to_string(),
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(map) => format!("object with {} field(s)", map.len()),
    }
}
