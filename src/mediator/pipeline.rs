// Behavior chain composed around the terminal handler.
//
// The chain is a slice walked from the front: each behavior receives a `Next`
// holding the rest of the slice plus the handler. `Next::run` consumes the
// continuation, so a behavior can invoke the remaining pipeline at most once.

use std::sync::Arc;

use async_trait::async_trait;

use crate::mediator::context::DispatchContext;
use crate::mediator::error::MediatorError;
use crate::mediator::handler::RequestHandler;
use crate::mediator::request::{Request, Response};

/// Cross-cutting stage wrapping the rest of the pipeline.
///
/// A behavior may run code before `next`, short-circuit by returning without
/// calling it, or inspect the result after it returns. Errors from `next` are
/// propagated unchanged.
#[async_trait]
pub trait Behavior: Send + Sync {
    /// Behavior name for logging and chain inspection
    fn name(&self) -> &'static str;

    async fn handle(
        &self,
        request: Request,
        ctx: &DispatchContext,
        next: Next<'_>,
    ) -> Result<Response, MediatorError>;
}

/// The remainder of the pipeline after the current behavior
pub struct Next<'a> {
    behaviors: &'a [Arc<dyn Behavior>],
    handler: &'a dyn RequestHandler,
    ctx: &'a DispatchContext,
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        behaviors: &'a [Arc<dyn Behavior>],
        handler: &'a dyn RequestHandler,
        ctx: &'a DispatchContext,
    ) -> Self {
        Self {
            behaviors,
            handler,
            ctx,
        }
    }

    /// Invoke the next behavior, or the handler once the chain is exhausted
    pub async fn run(self, request: Request) -> Result<Response, MediatorError> {
        if self.ctx.is_cancelled() {
            tracing::debug!("Dispatch {} cancelled before next stage", self.ctx.dispatch_id);
            return Err(MediatorError::Cancelled);
        }

        match self.behaviors.split_first() {
            Some((behavior, rest)) => {
                tracing::trace!("Entering behavior '{}'", behavior.name());
                let next = Next::new(rest, self.handler, self.ctx);
                behavior.handle(request, self.ctx, next).await
            }
            None => {
                tracing::trace!("Invoking handler '{}'", self.handler.name());
                self.handler.handle(request, self.ctx).await
            }
        }
    }
}
