//! Table layout for persisted todos and the row <-> entity mapping.

use sqlx::FromRow;

use crate::domain::todo::{Todo, TodoId};

/// Length checks mirror `TITLE_MAX_LEN` / `DESCRIPTION_MAX_LEN` so rows written
/// outside the service still respect them.
pub const CREATE_TODOS_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(255) NOT NULL CHECK (length(title) <= 255),
    description VARCHAR(1024) CHECK (description IS NULL OR length(description) <= 1024),
    completed BOOLEAN NOT NULL DEFAULT 0
)";

pub const TODO_COLUMNS: &str = "id, title, description, completed";

#[derive(Debug, FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo { id: TodoId(row.id), title: row.title, description: row.description, completed: row.completed }
    }
}
