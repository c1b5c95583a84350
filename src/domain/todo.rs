use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{FieldViolation, TodoError};

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1024;

/// Storage-assigned row id. Never reused while the row exists.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Partial update. `None` leaves the stored value alone; JSON `null` and an
/// omitted key both deserialize to `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl CreateTodo {
    pub fn validate(&self) -> Result<(), TodoError> {
        let mut violations = Vec::new();
        check_len(&mut violations, "title", Some(self.title.as_str()), TITLE_MAX_LEN);
        check_len(&mut violations, "description", self.description.as_deref(), DESCRIPTION_MAX_LEN);
        if violations.is_empty() { Ok(()) } else { Err(TodoError::Validation(violations)) }
    }
}

impl UpdateTodo {
    pub fn validate(&self) -> Result<(), TodoError> {
        let mut violations = Vec::new();
        check_len(&mut violations, "title", self.title.as_deref(), TITLE_MAX_LEN);
        check_len(&mut violations, "description", self.description.as_deref(), DESCRIPTION_MAX_LEN);
        if violations.is_empty() { Ok(()) } else { Err(TodoError::Validation(violations)) }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

impl Todo {
    /// Overwrites only the fields present in `patch`.
    pub fn apply(&mut self, patch: UpdateTodo) {
        if let Some(t) = patch.title { self.title = t; }
        if let Some(d) = patch.description { self.description = Some(d); }
        if let Some(c) = patch.completed { self.completed = c; }
    }
}

fn check_len(violations: &mut Vec<FieldViolation>, field: &str, value: Option<&str>, max: usize) {
    if let Some(value) = value {
        if value.chars().count() > max {
            violations.push(FieldViolation::body(
                field,
                format!("ensure this value has at most {max} characters"),
                "value_error.any_str.max_length",
            ));
        }
    }
}
