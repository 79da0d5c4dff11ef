// handlers/mod.rs - HTTP boundary
//
// Each handler turns the inbound HTTP request into a typed mediator request,
// dispatches it, and lets `ApiError` classify any failure into a response.

pub mod health;
pub mod todos;
pub mod users;

pub use health::health;

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::mediator::DispatchContext;

/// Fresh dispatch context carrying the caller's raw credentials
pub fn dispatch_context(headers: &HeaderMap) -> DispatchContext {
    let credentials = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    DispatchContext::new().with_credentials(credentials)
}
