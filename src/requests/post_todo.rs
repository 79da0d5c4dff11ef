use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::UserId;
use crate::mediator::{DispatchContext, Handler, MediatorError, RuleSet};
use crate::store::{Todo, TodoRepository};

/// Command appending a new todo. A missing or null title is kept as `None` and
/// rejected by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostTodoCommand {
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub title: Option<String>,
}

impl PostTodoCommand {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            user_id: UserId::UNSET,
            title: Some(title.into()),
        }
    }
}

pub fn post_todo_validator() -> RuleSet<PostTodoCommand> {
    RuleSet::<PostTodoCommand>::new("PostTodoCommandValidator")
        .not_empty("Title", |c| c.title.as_deref())
        .min_length("Title", |c| c.title.as_deref(), 3)
}

pub struct PostTodoCommandHandler {
    todos: Arc<dyn TodoRepository>,
}

impl PostTodoCommandHandler {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }
}

#[async_trait]
impl Handler for PostTodoCommandHandler {
    type Request = PostTodoCommand;

    async fn handle(&self, request: PostTodoCommand, _ctx: &DispatchContext) -> Result<Todo, MediatorError> {
        tracing::debug!("User {} adds todo", request.user_id);
        let title = request
            .title
            .ok_or_else(|| MediatorError::internal("PostTodoCommand reached its handler without a title"))?;
        Ok(self.todos.add(title).await?)
    }
}
