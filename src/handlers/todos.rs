use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::requests::{GetTodosQuery, PostTodoCommand};
use crate::store::Todo;

use super::dispatch_context;

/// GET /todos - every todo in insertion order
pub async fn get(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Vec<Todo>>, ApiError> {
    let ctx = dispatch_context(&headers);
    let todos = state.mediator.send(GetTodosQuery::default(), &ctx).await?;
    Ok(Json(todos))
}

/// POST /todos - body `{ "title": string }`
pub async fn post(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PostTodoCommand>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(command) = payload?;
    let ctx = dispatch_context(&headers);
    let todo = state.mediator.send(command, &ctx).await?;
    Ok(Json(todo))
}
