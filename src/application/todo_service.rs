use crate::domain::error::{TodoError, TodoResult};
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, Todo, TodoId, UpdateTodo};
use async_trait::async_trait;

#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn create(&self, input: CreateTodo) -> TodoResult<Todo>;
    async fn get(&self, id: TodoId) -> TodoResult<Todo>;
    async fn list(&self) -> TodoResult<Vec<Todo>>;
    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Todo>;
    async fn delete(&self, id: TodoId) -> TodoResult<()>;
}

/// Validates input and maps missing rows to [`TodoError::NotFound`]; storage
/// failures pass through as [`TodoError::Storage`].
#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn create(&self, input: CreateTodo) -> TodoResult<Todo> {
        input.validate()?;
        let todo = self.repo.create(input).await?;
        tracing::info!(id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn get(&self, id: TodoId) -> TodoResult<Todo> {
        tracing::debug!(%id, "fetching todo");
        self.repo.get(id).await?.ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> TodoResult<Vec<Todo>> {
        let todos = self.repo.list().await?;
        tracing::debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    async fn update(&self, id: TodoId, input: UpdateTodo) -> TodoResult<Todo> {
        input.validate()?;
        tracing::debug!(%id, unchanged = input.is_empty(), "updating todo");
        self.repo.update(id, input).await?.ok_or_else(|| not_found(id))
    }

    async fn delete(&self, id: TodoId) -> TodoResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(%id, "todo deleted");
        Ok(())
    }
}

fn not_found(id: TodoId) -> TodoError {
    tracing::warn!(%id, "todo not found");
    TodoError::NotFound(id)
}
