use async_trait::async_trait;
use super::todo::{Todo, TodoId, CreateTodo, UpdateTodo};

/// Storage seam. Each call is one unit of work: it acquires a connection
/// (or transaction) and releases it before returning, on success or error.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn create(&self, input: CreateTodo) -> anyhow::Result<Todo>;
    async fn get(&self, id: TodoId) -> anyhow::Result<Option<Todo>>;
    async fn list(&self) -> anyhow::Result<Vec<Todo>>;
    /// `None` when the row does not exist; nothing is written in that case.
    async fn update(&self, id: TodoId, input: UpdateTodo) -> anyhow::Result<Option<Todo>>;
    async fn delete(&self, id: TodoId) -> anyhow::Result<bool>;
}
