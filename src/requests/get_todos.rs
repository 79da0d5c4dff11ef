use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::UserId;
use crate::mediator::{DispatchContext, Handler, MediatorError};
use crate::store::{Todo, TodoRepository};

/// Query for every todo in insertion order
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTodosQuery {
    #[serde(default)]
    pub user_id: UserId,
}

pub struct GetTodosQueryHandler {
    todos: Arc<dyn TodoRepository>,
}

impl GetTodosQueryHandler {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl Handler for GetTodosQueryHandler {
    type Request = GetTodosQuery;

    async fn handle(&self, _request: GetTodosQuery, _ctx: &DispatchContext) -> Result<Vec<Todo>, MediatorError> {
        Ok(self.todos.list().await?)
    }
}
