pub mod todos;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub fn app(router: Router) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(router)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
