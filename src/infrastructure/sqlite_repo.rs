use std::{str::FromStr, sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};

use super::schema::{TodoRow, CREATE_TODOS_TABLE, TODO_COLUMNS};
use crate::domain::{
    repository::TodoRepository,
    todo::{CreateTodo, Todo, TodoId, UpdateTodo},
};

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = if is_in_memory(database_url) {
            // Every connection to `:memory:` is its own database; keep exactly one alive.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };
        let pool = pool.connect_with(options).await?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_TODOS_TABLE).execute(&*self.pool).await?;
        Ok(())
    }

    async fn create(&self, input: CreateTodo) -> Result<Todo> {
        let result = sqlx::query("INSERT INTO todos (title, description, completed) VALUES (?1, ?2, ?3)")
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.completed)
            .execute(&*self.pool)
            .await?;
        Ok(Todo {
            id: TodoId(result.last_insert_rowid()),
            title: input.title,
            description: input.description,
            completed: input.completed,
        })
    }

    async fn get(&self, id: TodoId) -> Result<Option<Todo>> {
        let row = sqlx::query_as::<_, TodoRow>(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1"))
            .bind(id.0)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(Todo::from))
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id ASC"))
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> Result<Option<Todo>> {
        // Single statement: NULL parameters keep the stored value, and no
        // read-to-write lock upgrade can hit SQLITE_BUSY_SNAPSHOT under WAL.
        let row = sqlx::query_as::<_, TodoRow>(&format!(
            "UPDATE todos SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                completed = COALESCE(?4, completed)
             WHERE id = ?1
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(id.0)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.completed)
        .fetch_optional(&*self.pool)
        .await?;
        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: TodoId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn repo() -> SqliteTodoRepository {
        let repo = SqliteTodoRepository::connect("sqlite::memory:", 5).await.unwrap();
        repo.init().await.unwrap();
        repo
    }

    fn new_todo(title: &str) -> CreateTodo {
        CreateTodo { title: title.into(), description: None, completed: false }
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let repo = repo().await;
        repo.init().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_assigned_in_insertion_order() {
        let repo = repo().await;
        let a = repo.create(new_todo("a")).await.unwrap();
        let b = repo.create(new_todo("b")).await.unwrap();
        assert!(b.id > a.id);
        let titles: Vec<_> = repo.list().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn update_missing_row_writes_nothing() {
        let repo = repo().await;
        let patch = UpdateTodo { title: Some("x".into()), ..Default::default() };
        assert!(repo.update(TodoId(42), patch).await.unwrap().is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_persists_only_present_fields() {
        let repo = repo().await;
        let created = repo
            .create(CreateTodo { title: "t".into(), description: Some("d".into()), completed: false })
            .await
            .unwrap();
        let patch = UpdateTodo { completed: Some(true), ..Default::default() };
        repo.update(created.id, patch).await.unwrap().unwrap();
        let stored = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored, Todo { completed: true, ..created });
    }

    #[tokio::test]
    async fn rename_keeps_description_and_completed() {
        let repo = repo().await;
        let created = repo
            .create(CreateTodo { title: "t".into(), description: Some("d".into()), completed: true })
            .await
            .unwrap();
        let patch = UpdateTodo { title: Some("renamed".into()), ..Default::default() };
        let updated = repo.update(created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated, Todo { title: "renamed".into(), ..created });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_on_a_file_database_all_commit() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("todos.db").display());
        let repo = SqliteTodoRepository::connect(&url, 5).await.unwrap();
        repo.init().await.unwrap();

        let mut ids = Vec::new();
        for i in 0..10 {
            ids.push(repo.create(new_todo(&format!("t{i}"))).await.unwrap().id);
        }

        let handles: Vec<_> = (0..100)
            .map(|n| {
                let repo = repo.clone();
                let id = ids[n % ids.len()];
                tokio::spawn(async move {
                    let patch = UpdateTodo { title: Some(format!("r{n}")), ..Default::default() };
                    repo.update(id, patch).await
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_some());
        }

        for todo in repo.list().await.unwrap() {
            assert!(todo.title.starts_with('r'));
            assert!(!todo.completed);
        }
    }

    #[tokio::test]
    async fn storage_rejects_overlong_title() {
        let repo = repo().await;
        let result = repo.create(new_todo(&"x".repeat(256))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = repo().await;
        let created = repo.create(new_todo("gone")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
