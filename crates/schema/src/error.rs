//! Structured validation errors.
//!
//! A `ValidationError` is a flat list of `FieldIssue`s, one per violated
//! constraint, serialized to clients as a JSON array:
//!
//! ```json
//! [{ "field": "genre", "index": 1, "kind": "unknown_value", "message": "..." }]
//! ```

use serde::Serialize;
use thiserror::Error;

/// What went wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Required field absent
    Missing,
    /// Present but the wrong JSON type
    WrongType,
    /// Right type, outside its allowed range (includes empty strings/lists)
    OutOfRange,
    /// Right type, unparseable content (bad URL, malformed body)
    InvalidFormat,
    /// Not a member of a closed vocabulary
    UnknownValue,
}

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    /// Field name; empty when the whole candidate is at fault
    pub field: String,
    /// Position inside an array field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub kind: IssueKind,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &str, kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            index: None,
            kind,
            message: message.into(),
        }
    }

    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, IssueKind::Missing, format!("{field} is required"))
    }
}

/// A candidate movie failed validation
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("movie failed validation with {} issue(s)", .issues.len())]
#[serde(transparent)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    /// Single issue against the candidate as a whole
    pub fn root(kind: IssueKind, message: impl Into<String>) -> Self {
        Self::new(vec![FieldIssue::new("", kind, message)])
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Issues reported against `field`
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldIssue> + 'a {
        self.issues.iter().filter(move |issue| issue.field == field)
    }
}
