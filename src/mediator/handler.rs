use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::mediator::context::DispatchContext;
use crate::mediator::error::{ConfigurationError, MediatorError};
use crate::mediator::request::{MediatorRequest, Request, RequestKind, Response};

/// Terminal stage for one request variant
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    type Request: MediatorRequest;

    async fn handle(
        &self,
        request: Self::Request,
        ctx: &DispatchContext,
    ) -> Result<<Self::Request as MediatorRequest>::Response, MediatorError>;
}

/// Type-erased handler stored in the registry
#[async_trait]
pub trait RequestHandler: Send + Sync {
    fn kind(&self) -> RequestKind;

    fn name(&self) -> &'static str;

    async fn handle(&self, request: Request, ctx: &DispatchContext) -> Result<Response, MediatorError>;
}

struct TypedHandler<H> {
    handler: H,
}

#[async_trait]
impl<H: Handler> RequestHandler for TypedHandler<H> {
    fn kind(&self) -> RequestKind {
        <H::Request as MediatorRequest>::KIND
    }

    fn name(&self) -> &'static str {
        std::any::type_name::<H>()
    }

    async fn handle(&self, request: Request, ctx: &DispatchContext) -> Result<Response, MediatorError> {
        let received = request.kind();
        let request = <H::Request as MediatorRequest>::from_request(request).ok_or_else(|| {
            MediatorError::internal(format!(
                "handler for {} received {}",
                <H::Request as MediatorRequest>::KIND,
                received
            ))
        })?;

        let response = self.handler.handle(request, ctx).await?;
        Ok(<H::Request as MediatorRequest>::into_response(response))
    }
}

/// Exactly one handler per request kind, keyed by variant tag
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<RequestKind, Arc<dyn RequestHandler>>,
    duplicates: Vec<RequestKind>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: Handler>(&mut self, handler: H) {
        let erased: Arc<dyn RequestHandler> = Arc::new(TypedHandler { handler });
        let kind = erased.kind();
        let name = erased.name();

        if self.handlers.insert(kind, erased).is_some() {
            tracing::error!("Handler '{}' replaces an existing handler for {}", name, kind);
            self.duplicates.push(kind);
        } else {
            tracing::debug!("Registered handler '{}' for {}", name, kind);
        }
    }

    /// Startup check: every kind has one and only one handler
    pub fn verify(&self) -> Result<(), ConfigurationError> {
        if let Some(&kind) = self.duplicates.first() {
            return Err(ConfigurationError::DuplicateHandler(kind));
        }

        for &kind in RequestKind::ALL {
            if !self.handlers.contains_key(&kind) {
                return Err(ConfigurationError::MissingHandler(kind));
            }
        }

        Ok(())
    }

    pub fn get(&self, kind: RequestKind) -> Option<Arc<dyn RequestHandler>> {
        self.handlers.get(&kind).cloned()
    }
}
