use axum::{extract::{Path, State}, routing::{get, post}, Router, Json};
use axum::http::StatusCode;

use crate::application::todo_service::TodoService;
use crate::domain::{error::FieldViolation, todo::{CreateTodo, Todo, TodoId, UpdateTodo}};
use crate::http::types::{ApiError, JsonBody};

#[derive(Clone)]
pub struct AppState<S: TodoService> { pub service: S }

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route("/todos/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

async fn create_todo<S: TodoService>(State(state): State<AppState<S>>, JsonBody(payload): JsonBody<CreateTodo>) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn list_todos<S: TodoService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn get_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(id).await?))
}

async fn update_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>, JsonBody(payload): JsonBody<UpdateTodo>) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.update(id, payload).await?))
}

async fn delete_todo<S: TodoService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(s: &str) -> Result<TodoId, ApiError> {
    s.parse::<i64>().map(TodoId).map_err(|_| {
        ApiError::Validation(vec![FieldViolation::new(&["path", "todo_id"], "value is not a valid integer", "type_error.integer")])
    })
}
