use axum::{extract::State, routing::get, Router, Json};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::domain::repository::TodoRepository;
use crate::http::dto::{CreateTodoRequest, TodoResponse, UpdateTodoRequest};
use crate::http::extractors::{ApiJson, TodoIdPath};
use crate::http::types::ApiError;

/// Path the todo routes are nested under; also the base of `Location` headers.
pub const BASE_PATH: &str = "/api/todos";

#[derive(Clone)]
pub struct AppState<R: TodoRepository> { pub repo: R }

pub fn router<R: TodoRepository + Clone>(state: AppState<R>) -> Router {
    Router::new()
        .route("/", get(list_todos::<R>).post(create_todo::<R>))
        .route("/:id", get(get_todo::<R>).put(update_todo::<R>).delete(delete_todo::<R>))
        .with_state(state)
}

async fn list_todos<R: TodoRepository>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let todos = state.repo.list().await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

async fn get_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    TodoIdPath(id): TodoIdPath,
) -> Result<Json<TodoResponse>, ApiError> {
    match state.repo.get(id).await? {
        Some(t) => Ok(Json(TodoResponse::from(t))),
        None => {
            tracing::debug!(%id, "todo not found");
            Err(ApiError::NotFound)
        }
    }
}

async fn create_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    ApiJson(payload): ApiJson<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let title = payload.validate()?;
    let todo = state.repo.insert(title).await?;
    tracing::info!(id = %todo.id, "todo created");
    let location = format!("{BASE_PATH}/{}", todo.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(TodoResponse::from(todo))))
}

async fn update_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    TodoIdPath(id): TodoIdPath,
    ApiJson(payload): ApiJson<UpdateTodoRequest>,
) -> Result<StatusCode, ApiError> {
    let fields = payload.validate()?;
    if state.repo.update(id, fields).await? {
        tracing::info!(%id, "todo updated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        tracing::debug!(%id, "todo not found");
        Err(ApiError::NotFound)
    }
}

async fn delete_todo<R: TodoRepository>(
    State(state): State<AppState<R>>,
    TodoIdPath(id): TodoIdPath,
) -> Result<StatusCode, ApiError> {
    if state.repo.delete(id).await? {
        tracing::info!(%id, "todo deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        tracing::debug!(%id, "todo not found");
        Err(ApiError::NotFound)
    }
}
