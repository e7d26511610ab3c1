//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the catalog layer.
pub type MovieResult<T> = Result<T, MovieError>;

/// Domain-level error.
///
/// Only two things can go wrong with a request: the client sent a record that
/// does not fit the schema, or it referenced an id that is not in the store.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MovieError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("movie not found")]
    NotFound,
}

impl MovieError {
    pub fn not_found() -> Self {
        Self::NotFound
    }
}

/// A record failed schema validation.
///
/// Carries every failing field, not just the first one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn single(issue: FieldIssue) -> Self {
        Self::new(vec![issue])
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("validation failed: ")?;
        for (n, issue) in self.issues.iter().enumerate() {
            if n > 0 {
                f.write_str("; ")?;
            }
            match issue.path_display() {
                p if p.is_empty() => f.write_str(&issue.message)?,
                p => write!(f, "{p}: {}", issue.message)?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Machine-readable kind of a field failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
    TooBig,
    InvalidEnumValue,
    InvalidUrl,
    InvalidJson,
    InvalidQuery,
}

/// One element of the location of a failing value inside the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(value: &str) -> Self {
        Self::Key(value.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// A single field-level failure: where, what was expected, what was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub expected: String,
    /// The offending value; absent when the field was missing altogether.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<serde_json::Value>,
    pub message: String,
}

impl FieldIssue {
    pub fn new(
        code: IssueCode,
        expected: impl Into<String>,
        received: Option<serde_json::Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            path: Vec::new(),
            expected: expected.into(),
            received,
            message: message.into(),
        }
    }

    /// A required field is absent.
    pub fn required(field: &str, expected: impl Into<String>) -> Self {
        Self::new(IssueCode::InvalidType, expected, None, "Required").at(field)
    }

    /// The value has the wrong JSON type.
    pub fn invalid_type(expected: &str, received: &serde_json::Value) -> Self {
        Self::new(
            IssueCode::InvalidType,
            expected,
            Some(received.clone()),
            format!("Expected {expected}, received {}", json_type_name(received)),
        )
    }

    /// Prefix the issue's path with `segment`.
    pub fn at(mut self, segment: impl Into<PathSegment>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Dotted rendering of the path (`genre.1`), empty for the body root.
    pub fn path_display(&self) -> String {
        self.path
            .iter()
            .map(|s| match s {
                PathSegment::Key(k) => k.clone(),
                PathSegment::Index(i) => i.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Name of a JSON value's type as used in error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_f64() => "float",
        serde_json::Value::Number(_) => "integer",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
