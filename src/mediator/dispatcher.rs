use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::auth::IdentityResolver;
use crate::mediator::behaviors::standard_behaviors;
use crate::mediator::context::DispatchContext;
use crate::mediator::error::{ConfigurationError, MediatorError};
use crate::mediator::handler::{Handler, HandlerRegistry};
use crate::mediator::pipeline::{Behavior, Next};
use crate::mediator::request::{MediatorRequest, Request, Response};
use crate::mediator::validation::ValidatorRegistry;

/// Routes each request to its single handler through the behavior chain
pub struct Mediator {
    behaviors: Vec<Arc<dyn Behavior>>,
    handlers: HandlerRegistry,
    dispatch_timeout: Option<Duration>,
}

impl Mediator {
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Behavior names, outermost first
    pub fn behavior_names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    /// Typed entry point: dispatch and unwrap the variant's response type
    pub async fn send<R: MediatorRequest>(
        &self,
        request: R,
        ctx: &DispatchContext,
    ) -> Result<R::Response, MediatorError> {
        let response = self.dispatch(request.into_request(), ctx).await?;
        let produced = response.type_name();

        R::from_response(response).ok_or_else(|| {
            MediatorError::internal(format!("{} produced unexpected response {}", R::KIND, produced))
        })
    }

    /// Run the behavior chain and handler for one request
    pub async fn dispatch(&self, request: Request, ctx: &DispatchContext) -> Result<Response, MediatorError> {
        let kind = request.kind();
        // Registration is verified in `MediatorBuilder::build`
        let handler = self
            .handlers
            .get(kind)
            .ok_or_else(|| MediatorError::internal(format!("no handler registered for {}", kind)))?;

        let next = Next::new(&self.behaviors, handler.as_ref(), ctx);

        let Some(limit) = self.dispatch_timeout else {
            return next.run(request).await;
        };

        match timeout(limit, next.run(request)).await {
            Ok(result) => result,
            Err(_elapsed) => {
                ctx.cancellation.cancel();
                tracing::error!(
                    dispatch_id = %ctx.dispatch_id,
                    "{} timed out after {:?}",
                    kind,
                    limit
                );
                Err(MediatorError::Timeout(limit))
            }
        }
    }
}

/// Explicit, ordered wiring of behaviors and handlers
#[derive(Default)]
pub struct MediatorBuilder {
    behaviors: Vec<Arc<dyn Behavior>>,
    handlers: HandlerRegistry,
    dispatch_timeout: Option<Duration>,
}

impl MediatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a behavior inside the ones already registered
    pub fn behavior<B: Behavior + 'static>(mut self, behavior: B) -> Self {
        tracing::debug!("Registered behavior '{}' at position {}", behavior.name(), self.behaviors.len());
        self.behaviors.push(Arc::new(behavior));
        self
    }

    /// Logging, identity stamping and validation, in that order
    pub fn standard_behaviors(
        mut self,
        identity: Arc<dyn IdentityResolver>,
        validators: ValidatorRegistry,
    ) -> Self {
        for behavior in standard_behaviors(identity, validators) {
            tracing::debug!("Registered behavior '{}' at position {}", behavior.name(), self.behaviors.len());
            self.behaviors.push(behavior);
        }
        self
    }

    pub fn handler<H: Handler>(mut self, handler: H) -> Self {
        self.handlers.register(handler);
        self
    }

    pub fn dispatch_timeout(mut self, limit: Duration) -> Self {
        self.dispatch_timeout = Some(limit);
        self
    }

    /// Fails when any request kind lacks exactly one handler
    pub fn build(self) -> Result<Mediator, ConfigurationError> {
        self.handlers.verify()?;

        Ok(Mediator {
            behaviors: self.behaviors,
            handlers: self.handlers,
            dispatch_timeout: self.dispatch_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::auth::{PlaceholderIdentity, UserId};
    use crate::mediator::error::ValidationFailure;
    use crate::mediator::validation::Validator;
    use crate::requests::{
        GetTodosQuery, GetTodosQueryHandler, PostTodoCommand, PostTodoCommandHandler,
        RegisterUserCommandHandler,
    };
    use crate::store::{InMemoryTodoStore, InMemoryUserStore, Todo, TodoRepository, UserRepository};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recording {
        name: &'static str,
        journal: Journal,
    }

    #[async_trait]
    impl Behavior for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn handle(
            &self,
            request: Request,
            _ctx: &DispatchContext,
            next: Next<'_>,
        ) -> Result<Response, MediatorError> {
            self.journal.lock().unwrap().push(format!("{} before", self.name));
            let result = next.run(request).await;
            self.journal.lock().unwrap().push(format!("{} after", self.name));
            result
        }
    }

    struct ShortCircuit;

    #[async_trait]
    impl Behavior for ShortCircuit {
        fn name(&self) -> &'static str {
            "short-circuit"
        }

        async fn handle(
            &self,
            _request: Request,
            _ctx: &DispatchContext,
            _next: Next<'_>,
        ) -> Result<Response, MediatorError> {
            Err(MediatorError::internal("stopped"))
        }
    }

    struct SlowHandler;

    #[async_trait]
    impl Handler for SlowHandler {
        type Request = GetTodosQuery;

        async fn handle(&self, _request: GetTodosQuery, _ctx: &DispatchContext) -> Result<Vec<Todo>, MediatorError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    /// Fails unless identity stamping already ran
    struct RequiresStampedUser;

    #[async_trait]
    impl Validator for RequiresStampedUser {
        type Request = PostTodoCommand;

        fn name(&self) -> &'static str {
            "requires-stamped-user"
        }

        async fn validate(&self, request: &PostTodoCommand, _ctx: &DispatchContext) -> Vec<ValidationFailure> {
            if request.user_id == UserId(100) {
                Vec::new()
            } else {
                vec![ValidationFailure::new("UserId", "not stamped")]
            }
        }
    }

    fn stores() -> (Arc<InMemoryTodoStore>, Arc<dyn UserRepository>) {
        (Arc::new(InMemoryTodoStore::new()), Arc::new(InMemoryUserStore::new()))
    }

    fn with_all_handlers(builder: MediatorBuilder, todos: Arc<InMemoryTodoStore>, users: Arc<dyn UserRepository>) -> MediatorBuilder {
        builder
            .handler(GetTodosQueryHandler::new(todos.clone()))
            .handler(PostTodoCommandHandler::new(todos))
            .handler(RegisterUserCommandHandler::new(users))
    }

    #[test]
    fn test_missing_handler_fails_at_build() {
        let (todos, _) = stores();
        let result = Mediator::builder()
            .handler(GetTodosQueryHandler::new(todos.clone()))
            .handler(PostTodoCommandHandler::new(todos))
            .build();

        assert!(matches!(
            result,
            Err(ConfigurationError::MissingHandler(crate::mediator::RequestKind::RegisterUser))
        ));
    }

    #[test]
    fn test_duplicate_handler_fails_at_build() {
        let (todos, users) = stores();
        let result = with_all_handlers(Mediator::builder(), todos.clone(), users)
            .handler(GetTodosQueryHandler::new(todos))
            .build();

        assert!(matches!(
            result,
            Err(ConfigurationError::DuplicateHandler(crate::mediator::RequestKind::GetTodos))
        ));
    }

    #[tokio::test]
    async fn test_behaviors_wrap_handler_in_registration_order() {
        let journal: Journal = Arc::default();
        let (todos, users) = stores();
        let builder = Mediator::builder()
            .behavior(Recording { name: "outer", journal: journal.clone() })
            .behavior(Recording { name: "inner", journal: journal.clone() });
        let mediator = with_all_handlers(builder, todos.clone(), users).build().unwrap();

        assert_eq!(mediator.behavior_names(), vec!["outer", "inner"]);

        let todo = mediator
            .send(PostTodoCommand::new("write tests"), &DispatchContext::new())
            .await
            .unwrap();
        assert_eq!(todo, Todo::new(1, "write tests"));
        assert_eq!(todos.count().await.unwrap(), 1);

        assert_eq!(
            *journal.lock().unwrap(),
            vec!["outer before", "inner before", "inner after", "outer after"]
        );
    }

    #[tokio::test]
    async fn test_short_circuit_skips_handler() {
        let (todos, users) = stores();
        let builder = Mediator::builder().behavior(ShortCircuit);
        let mediator = with_all_handlers(builder, todos.clone(), users).build().unwrap();

        let result = mediator.send(PostTodoCommand::new("never stored"), &DispatchContext::new()).await;
        assert!(matches!(result, Err(MediatorError::Internal(_))));
        assert_eq!(todos.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_standard_chain_order_and_identity_before_validation() {
        let (todos, users) = stores();
        let mut validators = ValidatorRegistry::new();
        validators.register(RequiresStampedUser);

        let builder = Mediator::builder()
            .standard_behaviors(Arc::new(PlaceholderIdentity::new(UserId(100))), validators);
        let mediator = with_all_handlers(builder, todos, users).build().unwrap();

        assert_eq!(mediator.behavior_names(), vec!["logging", "identity", "validation"]);

        let todo = mediator
            .send(PostTodoCommand::new("stamped"), &DispatchContext::new())
            .await
            .unwrap();
        assert_eq!(todo.id, Some(1));
    }

    #[tokio::test]
    async fn test_cancelled_dispatch_never_reaches_handler() {
        let (todos, users) = stores();
        let mediator = with_all_handlers(Mediator::builder(), todos.clone(), users).build().unwrap();

        let ctx = DispatchContext::new();
        ctx.cancellation.cancel();

        let result = mediator.send(PostTodoCommand::new("too late"), &ctx).await;
        assert!(matches!(result, Err(MediatorError::Cancelled)));
        assert_eq!(todos.count().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_timeout_cancels_context() {
        let (todos, users) = stores();
        let mediator = Mediator::builder()
            .handler(SlowHandler)
            .handler(PostTodoCommandHandler::new(todos))
            .handler(RegisterUserCommandHandler::new(users))
            .dispatch_timeout(Duration::from_millis(50))
            .build()
            .unwrap();

        let ctx = DispatchContext::new();
        let result = mediator.send(GetTodosQuery::default(), &ctx).await;

        assert!(matches!(result, Err(MediatorError::Timeout(limit)) if limit == Duration::from_millis(50)));
        assert!(ctx.is_cancelled());
    }
}
