use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::requests::RegisterUserCommand;
use crate::store::User;

use super::dispatch_context;

/// POST /users - body `{ "email": string, "password": string }`
pub async fn post(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RegisterUserCommand>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(command) = payload?;
    let ctx = dispatch_context(&headers);
    let user = state.mediator.send(command, &ctx).await?;
    Ok(Json(user))
}
