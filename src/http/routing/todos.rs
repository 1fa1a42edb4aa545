use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::application::todo_service::TodoService;
use crate::domain::repository::StoreError;
use crate::domain::todo::{CreateTodo, Todo, TodoPatch};
use crate::http::types::ApiError;
use crate::infrastructure::event_log::EventLog;

#[derive(Clone)]
pub struct AppState<S: TodoService> {
    pub service: S,
    pub events: EventLog,
}

pub fn router<S: TodoService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/todos", post(create_todo::<S>).get(list_todos::<S>))
        .route("/todos/:id", get(get_todo::<S>).put(update_todo::<S>).delete(delete_todo::<S>))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    completed: Option<String>,
}

async fn list_todos<S: TodoService>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Todo>> {
    let todos = state.service.list(query.completed).await;
    state.events.record("GET /todos");
    Json(todos)
}

async fn get_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    // a segment that is not a number can never match a stored id
    let found = match id.parse::<u64>() {
        Ok(id) => state.service.get(id).await,
        Err(_) => None,
    };
    state.events.record(format!("GET /todos/{id}"));
    found.map(Json).ok_or_else(ApiError::todo_not_found)
}

async fn create_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = payload.map_err(|_| ApiError::invalid_json())?;
    let todo = state.service.create(input).await.map_err(|err| match err {
        StoreError::TitleRequired => ApiError::bad_request("Title is required"),
        err => {
            tracing::error!(%err, "create failed");
            ApiError::internal("Failed to write data")
        }
    })?;
    state.events.record("POST /todos");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(patch) = payload.map_err(|_| ApiError::invalid_json())?;
    let Ok(id) = id.parse::<u64>() else {
        return Err(ApiError::todo_not_found());
    };
    let updated = state.service.update(id, patch).await.map_err(|err| {
        tracing::error!(%err, id, "update failed");
        ApiError::internal("Failed to update todo")
    })?;
    match updated {
        Some(todo) => {
            state.events.record(format!("PUT /todos/{id}"));
            Ok(Json(todo))
        }
        None => Err(ApiError::todo_not_found()),
    }
}

async fn delete_todo<S: TodoService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Ok(id) = id.parse::<u64>() else {
        return Err(ApiError::todo_not_found());
    };
    let deleted = state.service.delete(id).await.map_err(|err| {
        tracing::error!(%err, id, "delete failed");
        ApiError::internal("Failed to delete todo")
    })?;
    if deleted {
        state.events.record(format!("DELETE /todos/{id}"));
        Ok(Json(serde_json::json!({ "message": "Todo deleted" })))
    } else {
        Err(ApiError::todo_not_found())
    }
}
