use async_trait::async_trait;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::error::{FieldViolation, TodoError};
use crate::domain::todo::TodoId;

/// Error returned by every handler. Bodies always carry a `detail` key.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Todo with id {0} not found")]
    NotFound(TodoId),

    #[error(transparent)]
    Internal(anyhow::Error),
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(violations) => ApiError::Validation(violations),
            TodoError::NotFound(id) => ApiError::NotFound(id),
            TodoError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "value_error.missing_or_invalid",
            JsonRejection::JsonSyntaxError(_) => "value_error.jsondecode",
            JsonRejection::MissingJsonContentType(_) => "type_error.content_type",
            _ => "value_error",
        };
        ApiError::Validation(vec![FieldViolation::new(&["body"], rejection.body_text(), kind)])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": violations }))).into_response()
            }
            ApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": format!("Todo with id {id} not found") }))).into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "Internal Server Error" }))).into_response()
            }
        }
    }
}

/// `Json<T>` whose rejections render as [`ApiError::Validation`] (400).
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
