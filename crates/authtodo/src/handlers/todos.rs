//! Todo handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use authtodo_core::identity::UserId;
use authtodo_core::todo::{TodoId, TodoPage, DEFAULT_PAGE_LIMIT};

use crate::{handlers::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateTodo {
    pub user_id: UserId,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TodoIdResponse {
    pub todo_id: TodoId,
}

#[derive(Debug, Deserialize)]
pub struct CompleteTodo {
    pub user_id: UserId,
}

/// Query parameters for listing todos.
///
/// `limit` and `offset` are kept as strings so that unparseable values fall
/// back to the defaults instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    pub user_id: UserId,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListTodosQuery {
    fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_PAGE_LIMIT)
    }

    fn offset(&self) -> i64 {
        parse_or(self.offset.as_deref(), 0)
    }
}

fn parse_or(value: Option<&str>, default: i64) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// POST /todos
pub async fn create_todo(
    State(state): State<AppState>,
    Json(request): Json<CreateTodo>,
) -> Result<(StatusCode, Json<TodoIdResponse>), AppError> {
    let todo_id = state.todos.create_todo(request.user_id, &request.text).await?;
    Ok((StatusCode::CREATED, Json(TodoIdResponse { todo_id })))
}

/// GET /todos?user_id=..&limit=..&offset=..
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<TodoPage>, AppError> {
    let page = state
        .todos
        .list_todos(query.user_id, query.limit(), query.offset())
        .await?;
    Ok(Json(page))
}

/// POST /todos/{id}/complete
pub async fn complete_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<TodoId>,
    Json(request): Json<CompleteTodo>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.todos.complete_todo(request.user_id, todo_id).await?;
    Ok(Json(serde_json::json!({})))
}
