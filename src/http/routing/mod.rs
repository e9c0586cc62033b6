use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::http::routes::todos::BASE_PATH;

/// Mounts the todo routes under `/api/todos` next to the liveness probe and traces every request.
pub fn app(todos: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(BASE_PATH, todos)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
