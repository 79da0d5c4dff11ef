use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::IdentityResolver;
use crate::mediator::context::DispatchContext;
use crate::mediator::error::MediatorError;
use crate::mediator::pipeline::{Behavior, Next};
use crate::mediator::request::{Request, Response};

/// Stamps the resolved caller identity onto the request before `next`
pub struct IdentityBehavior {
    resolver: Arc<dyn IdentityResolver>,
}

impl IdentityBehavior {
    pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Behavior for IdentityBehavior {
    fn name(&self) -> &'static str {
        "identity"
    }

    async fn handle(
        &self,
        mut request: Request,
        ctx: &DispatchContext,
        next: Next<'_>,
    ) -> Result<Response, MediatorError> {
        if let Some(user_id) = self.resolver.resolve(ctx).await {
            tracing::debug!(
                "Stamping user {} on {} via {}",
                user_id,
                request.kind(),
                self.resolver.name()
            );
            request.set_user_id(user_id);
        }

        next.run(request).await
    }
}
