// Request variants with their handlers and validators

pub mod get_todos;
pub mod post_todo;
pub mod register_user;

pub use get_todos::*;
pub use post_todo::*;
pub use register_user::*;

use std::sync::Arc;

use crate::mediator::{MediatorBuilder, ValidatorRegistry};
use crate::store::{TodoRepository, UserRepository};

/// One handler per request variant
pub fn register_handlers(
    builder: MediatorBuilder,
    todos: Arc<dyn TodoRepository>,
    users: Arc<dyn UserRepository>,
) -> MediatorBuilder {
    builder
        .handler(GetTodosQueryHandler::new(todos.clone()))
        .handler(PostTodoCommandHandler::new(todos))
        .handler(RegisterUserCommandHandler::new(users))
}

pub fn register_validators(registry: &mut ValidatorRegistry) {
    registry.register(post_todo_validator());
    registry.register(register_user_validator());
}
