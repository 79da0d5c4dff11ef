use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::UserId;
use crate::mediator::{DispatchContext, Handler, MediatorError, RuleSet};
use crate::store::{User, UserRepository};

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserCommand {
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl RegisterUserCommand {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: UserId::UNSET,
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

// Keep the password out of logs
impl fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub fn register_user_validator() -> RuleSet<RegisterUserCommand> {
    RuleSet::<RegisterUserCommand>::new("RegisterUserCommandValidator")
        .not_empty("Email", |c| c.email.as_deref())
        .email("Email", |c| c.email.as_deref())
        .min_length("Password", |c| c.password.as_deref(), 3)
}

pub struct RegisterUserCommandHandler {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserCommandHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl Handler for RegisterUserCommandHandler {
    type Request = RegisterUserCommand;

    async fn handle(&self, request: RegisterUserCommand, _ctx: &DispatchContext) -> Result<User, MediatorError> {
        let email = request
            .email
            .ok_or_else(|| MediatorError::internal("RegisterUserCommand reached its handler without an email"))?;
        Ok(self.users.register(email).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediator::Validator;

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", RegisterUserCommand::new("a@b.c", "hunter2"));
        assert!(rendered.contains("a@b.c"));
        assert!(!rendered.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_validator_rules() {
        let validator = register_user_validator();
        let ctx = DispatchContext::new();

        let failures = validator.validate(&RegisterUserCommand::new("", ""), &ctx).await;
        let properties: Vec<_> = failures.iter().map(|f| f.property_name.as_str()).collect();
        assert_eq!(properties, vec!["Email", "Email", "Password"]);

        let failures = validator
            .validate(&RegisterUserCommand::new("not-an-email", "secret"), &ctx)
            .await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].error_message, "'Email' is not a valid email address.");

        assert!(validator
            .validate(&RegisterUserCommand::new("alice@example.com", "abc"), &ctx)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_absent_fields_fail_only_not_empty() {
        let validator = register_user_validator();
        let command: RegisterUserCommand =
            serde_json::from_str(r#"{"email": null}"#).unwrap();
        assert!(command.password.is_none());

        let failures = validator.validate(&command, &DispatchContext::new()).await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].error_message, "'Email' must not be empty.");
    }
}
