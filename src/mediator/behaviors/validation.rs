use async_trait::async_trait;

use crate::mediator::context::DispatchContext;
use crate::mediator::error::MediatorError;
use crate::mediator::pipeline::{Behavior, Next};
use crate::mediator::request::{Request, Response};
use crate::mediator::validation::ValidatorRegistry;

/// Runs the registered validators and refuses to call `next` on any failure
pub struct ValidationBehavior {
    validators: ValidatorRegistry,
}

impl ValidationBehavior {
    pub fn new(validators: ValidatorRegistry) -> Self {
        Self { validators }
    }
}

#[async_trait]
impl Behavior for ValidationBehavior {
    fn name(&self) -> &'static str {
        "validation"
    }

    async fn handle(
        &self,
        request: Request,
        ctx: &DispatchContext,
        next: Next<'_>,
    ) -> Result<Response, MediatorError> {
        if let Err(error) = self.validators.validate(&request, ctx).await {
            tracing::warn!(
                "{} rejected with {} validation failure(s)",
                request.kind(),
                error.failures().len()
            );
            return Err(MediatorError::Validation(error));
        }

        next.run(request).await
    }
}
