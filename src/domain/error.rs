use serde::Serialize;

use super::todo::TodoId;

/// One failed constraint, located the way clients address request parts
/// (`["body", "title"]`, `["path", "todo_id"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldViolation {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self { loc: loc.iter().map(|s| s.to_string()).collect(), msg: msg.into(), kind: kind.into() }
    }

    pub fn body(field: &str, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(&["body", field], msg, kind)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("request validation failed ({} violation(s))", .0.len())]
    Validation(Vec<FieldViolation>),

    #[error("Todo with id {0} not found")]
    NotFound(TodoId),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type TodoResult<T> = Result<T, TodoError>;
