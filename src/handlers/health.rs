use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /health - liveness plus store sizes
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let todos = state.todos.count().await?;
    let users = state.users.list().await?.len();

    Ok(Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "todos": todos,
            "users": users
        }
    })))
}
