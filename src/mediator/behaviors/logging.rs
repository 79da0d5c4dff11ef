use async_trait::async_trait;

use crate::mediator::context::DispatchContext;
use crate::mediator::error::MediatorError;
use crate::mediator::pipeline::{Behavior, Next};
use crate::mediator::request::{Request, Response};

/// Logs the start and the successful completion of every dispatch.
/// A failing `next` propagates without a completion line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBehavior;

#[async_trait]
impl Behavior for LoggingBehavior {
    fn name(&self) -> &'static str {
        "logging"
    }

    async fn handle(
        &self,
        request: Request,
        ctx: &DispatchContext,
        next: Next<'_>,
    ) -> Result<Response, MediatorError> {
        tracing::info!(dispatch_id = %ctx.dispatch_id, "Handling {}", request.kind());

        let response = next.run(request).await?;

        tracing::info!(
            dispatch_id = %ctx.dispatch_id,
            elapsed_ms = u64::try_from(ctx.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Handled {}",
            response.type_name()
        );
        Ok(response)
    }
}
