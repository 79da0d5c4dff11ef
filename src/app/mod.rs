use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{IdentityResolver, PlaceholderIdentity, UserId};
use crate::config::AppConfig;
use crate::handlers;
use crate::mediator::{ConfigurationError, Mediator, ValidatorRegistry};
use crate::requests;
use crate::store::{InMemoryTodoStore, InMemoryUserStore, TodoRepository, UserRepository};

/// Process-wide state shared by every HTTP handler
#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<Mediator>,
    pub todos: Arc<dyn TodoRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Empty in-memory stores and the placeholder identity from config
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigurationError> {
        let identity = PlaceholderIdentity::new(UserId(config.mediator.placeholder_user_id));

        Self::with_parts(
            Arc::new(InMemoryTodoStore::new()),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(identity),
            config.dispatch_timeout()?,
        )
    }

    /// Wire validators, handlers and the standard behavior chain explicitly.
    /// Fails at startup if any request kind is left without a handler.
    pub fn with_parts(
        todos: Arc<dyn TodoRepository>,
        users: Arc<dyn UserRepository>,
        identity: Arc<dyn IdentityResolver>,
        dispatch_timeout: Duration,
    ) -> Result<Self, ConfigurationError> {
        let mut validators = ValidatorRegistry::new();
        requests::register_validators(&mut validators);

        let mediator = requests::register_handlers(Mediator::builder(), todos.clone(), users.clone())
            .standard_behaviors(identity, validators)
            .dispatch_timeout(dispatch_timeout)
            .build()?;

        tracing::info!("Mediator ready with behaviors {:?}", mediator.behavior_names());

        Ok(Self {
            mediator: Arc::new(mediator),
            todos,
            users,
        })
    }
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/todos", get(handlers::todos::get).post(handlers::todos::post))
        .route("/users", post(handlers::users::post))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.api.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
