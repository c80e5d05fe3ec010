//! # Schema Descriptors
//!
//! A schema is a tree of [`Shape`] descriptors. Leaves describe scalar
//! values (strings, integers, numbers, booleans, pinned literals); composite
//! shapes nest objects, ordered lists, and string-keyed maps.
//!
//! Descriptors carry no behavior. The recursive walk in
//! [`crate::validate`] interprets them, and [`crate::json_schema`] renders
//! them as JSON Schema documents.
//!
//! Patterns are stored as plain strings and compiled once, when a
//! [`Schema`] is constructed. A pattern that fails to compile means the
//! schema itself is broken, never the document under validation.

use std::collections::HashMap;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while building a [`Schema`].
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A string pattern in the schema is not a valid regular expression.
    #[error("schema '{schema}' has an invalid pattern {pattern:?} at {field}: {source}")]
    InvalidPattern {
        /// Name of the schema being built.
        schema: String,
        /// Dotted path of the field declaring the pattern.
        field: String,
        /// The offending pattern source.
        pattern: String,
        /// Underlying regex compile error.
        #[source]
        source: regex::Error,
    },
}

/// Whether a field must appear in its parent object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present and non-null.
    Required,
    /// May be absent or `null`.
    Optional,
    /// May be absent; when present it must satisfy the shape (so `null`
    /// only passes if the shape accepts it).
    Defaulted,
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// Lower bound, inclusive.
    pub min: Option<f64>,
    /// Upper bound, inclusive.
    pub max: Option<f64>,
}

impl Bounds {
    /// No bounds at all.
    pub const UNBOUNDED: Bounds = Bounds {
        min: None,
        max: None,
    };

    /// `value >= min`.
    pub const fn at_least(min: f64) -> Self {
        Bounds {
            min: Some(min),
            max: None,
        }
    }

    /// `min <= value <= max`.
    pub const fn between(min: f64, max: f64) -> Self {
        Bounds {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Returns a violation message if `value` falls outside the bounds.
    pub fn check(&self, value: f64) -> Option<String> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if value < min || value > max => {
                Some(format!("must be between {min} and {max}"))
            }
            (Some(min), None) if value < min => {
                Some(format!("must be greater than or equal to {min}"))
            }
            (None, Some(max)) if value > max => {
                Some(format!("must be less than or equal to {max}"))
            }
            _ => None,
        }
    }
}

/// Constraints on a string value. All set constraints must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringRule {
    /// Regular expression the whole string must match.
    pub pattern: Option<&'static str>,
    /// Closed set of accepted values.
    pub one_of: Option<&'static [&'static str]>,
    /// Reject strings that are empty after trimming whitespace.
    pub non_blank: bool,
}

/// A node in the schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A JSON string.
    String(StringRule),
    /// A JSON number with no fractional part.
    Integer(Bounds),
    /// Any JSON number.
    Number(Bounds),
    /// A JSON boolean.
    Boolean,
    /// Exactly this value. Numbers compare by magnitude, so `70` equals `70.0`.
    Literal(Value),
    /// A JSON object with declared fields. Undeclared fields are ignored.
    Object(Vec<Field>),
    /// An ordered list whose items all share one shape.
    List {
        /// Shape of every item.
        item: Box<Shape>,
        /// Minimum number of items.
        min_len: usize,
    },
    /// A JSON object with arbitrary keys and uniform values.
    Map(Box<Shape>),
}

/// A named field of an [`Shape::Object`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Key in the parent object.
    pub name: &'static str,
    /// Presence requirement.
    pub presence: Presence,
    /// Shape of the value.
    pub shape: Shape,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Any string.
pub fn string() -> Shape {
    Shape::String(StringRule::default())
}

/// A string fully matching `pattern`.
pub fn pattern(pattern: &'static str) -> Shape {
    Shape::String(StringRule {
        pattern: Some(pattern),
        ..StringRule::default()
    })
}

/// A string drawn from a closed set.
pub fn one_of(values: &'static [&'static str]) -> Shape {
    Shape::String(StringRule {
        one_of: Some(values),
        ..StringRule::default()
    })
}

/// A string with at least one non-whitespace character.
pub fn non_blank() -> Shape {
    Shape::String(StringRule {
        non_blank: true,
        ..StringRule::default()
    })
}

/// An integer within `bounds`.
pub fn integer(bounds: Bounds) -> Shape {
    Shape::Integer(bounds)
}

/// A non-negative integer.
pub fn count() -> Shape {
    Shape::Integer(Bounds::at_least(0.0))
}

/// A number within `bounds`.
pub fn number(bounds: Bounds) -> Shape {
    Shape::Number(bounds)
}

/// A number in `[0, 1]`.
pub fn ratio() -> Shape {
    Shape::Number(Bounds::between(0.0, 1.0))
}

/// A number in `[0, 100]`.
pub fn percent() -> Shape {
    Shape::Number(Bounds::between(0.0, 100.0))
}

pub fn boolean() -> Shape {
    Shape::Boolean
}

/// Exactly `value`.
pub fn literal(value: impl Into<Value>) -> Shape {
    Shape::Literal(value.into())
}

pub fn object(fields: Vec<Field>) -> Shape {
    Shape::Object(fields)
}

/// A list of `item`, possibly empty.
pub fn list(item: Shape) -> Shape {
    Shape::List {
        item: Box::new(item),
        min_len: 0,
    }
}

/// A list of `item` with at least `min_len` entries.
pub fn list_min(item: Shape, min_len: usize) -> Shape {
    Shape::List {
        item: Box::new(item),
        min_len,
    }
}

/// A string-keyed map whose values all have shape `value`.
pub fn map(value: Shape) -> Shape {
    Shape::Map(Box::new(value))
}

pub fn required(name: &'static str, shape: Shape) -> Field {
    Field {
        name,
        presence: Presence::Required,
        shape,
    }
}

pub fn optional(name: &'static str, shape: Shape) -> Field {
    Field {
        name,
        presence: Presence::Optional,
        shape,
    }
}

pub fn defaulted(name: &'static str, shape: Shape) -> Field {
    Field {
        name,
        presence: Presence::Defaulted,
        shape,
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A named shape tree with its patterns compiled.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    root: Shape,
    patterns: HashMap<&'static str, Regex>,
}

impl Schema {
    /// Build a schema, compiling every pattern in the tree.
    ///
    /// Patterns are anchored on both ends, so a match always spans the
    /// whole string.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] for the first pattern that
    /// does not compile.
    pub fn new(name: &'static str, root: Shape) -> Result<Self, SchemaError> {
        let mut patterns = HashMap::new();
        compile_patterns(name, &root, &mut Vec::new(), &mut patterns)?;
        tracing::trace!(schema = name, patterns = patterns.len(), "compiled schema");
        Ok(Self {
            name,
            root,
            patterns,
        })
    }

    /// The schema's name, used in reports and JSON Schema titles.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The root shape.
    pub fn root(&self) -> &Shape {
        &self.root
    }

    /// The compiled form of a pattern declared somewhere in this schema.
    pub(crate) fn regex(&self, pattern: &str) -> Option<&Regex> {
        self.patterns.get(pattern)
    }
}

fn compile_patterns(
    schema: &'static str,
    shape: &Shape,
    trail: &mut Vec<&'static str>,
    out: &mut HashMap<&'static str, Regex>,
) -> Result<(), SchemaError> {
    match shape {
        Shape::String(StringRule {
            pattern: Some(source),
            ..
        }) => {
            if !out.contains_key(source) {
                let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| {
                    SchemaError::InvalidPattern {
                        schema: schema.to_string(),
                        field: if trail.is_empty() {
                            "(root)".to_string()
                        } else {
                            trail.join(".")
                        },
                        pattern: source.to_string(),
                        source: e,
                    }
                })?;
                out.insert(*source, regex);
            }
            Ok(())
        }
        Shape::Object(fields) => {
            for field in fields {
                trail.push(field.name);
                let result = compile_patterns(schema, &field.shape, trail, out);
                trail.pop();
                result?;
            }
            Ok(())
        }
        Shape::List { item, .. } => compile_patterns(schema, item, trail, out),
        Shape::Map(value) => compile_patterns(schema, value, trail, out),
        _ => Ok(()),
    }
}
