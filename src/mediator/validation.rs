use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::mediator::context::DispatchContext;
use crate::mediator::error::{ValidationError, ValidationFailure};
use crate::mediator::request::{MediatorRequest, Request, RequestKind};

/// Produces zero or more field-level failures for one request variant
#[async_trait]
pub trait Validator: Send + Sync + 'static {
    type Request: MediatorRequest;

    fn name(&self) -> &'static str;

    async fn validate(&self, request: &Self::Request, ctx: &DispatchContext) -> Vec<ValidationFailure>;
}

#[async_trait]
trait RequestValidator: Send + Sync {
    async fn validate(&self, request: &Request, ctx: &DispatchContext) -> Vec<ValidationFailure>;
}

struct TypedValidator<V> {
    validator: V,
}

#[async_trait]
impl<V: Validator> RequestValidator for TypedValidator<V> {
    async fn validate(&self, request: &Request, ctx: &DispatchContext) -> Vec<ValidationFailure> {
        match <V::Request as MediatorRequest>::from_request_ref(request) {
            Some(request) => self.validator.validate(request, ctx).await,
            None => Vec::new(),
        }
    }
}

/// Validators grouped by request kind, kept in registration order
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<RequestKind, Vec<Arc<dyn RequestValidator>>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<V: Validator>(&mut self, validator: V) {
        let kind = <V::Request as MediatorRequest>::KIND;
        tracing::debug!("Registered validator '{}' for {}", validator.name(), kind);

        self.validators
            .entry(kind)
            .or_default()
            .push(Arc::new(TypedValidator { validator }));
    }

    /// Run every validator for the request's kind concurrently and gather all
    /// failures. Succeeds when nothing failed.
    pub async fn validate(&self, request: &Request, ctx: &DispatchContext) -> Result<(), ValidationError> {
        let Some(validators) = self.validators.get(&request.kind()) else {
            return Ok(());
        };

        let results = join_all(validators.iter().map(|v| v.validate(request, ctx))).await;
        let failures: Vec<ValidationFailure> = results.into_iter().flatten().collect();

        match ValidationError::from_failures(failures) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Reads an optional field; `None` stands for a property absent or null in the body
type FieldAccessor<R> = fn(&R) -> Option<&str>;

struct Rule<R> {
    check: Box<dyn Fn(&R) -> Option<ValidationFailure> + Send + Sync>,
}

/// Declarative validator built from independent property rules.
/// Every rule runs; nothing short-circuits.
pub struct RuleSet<R> {
    name: &'static str,
    rules: Vec<Rule<R>>,
}

impl<R: MediatorRequest> RuleSet<R> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: Vec::new(),
        }
    }

    /// Fails for absent, empty or whitespace-only values
    pub fn not_empty(self, property: &'static str, field: FieldAccessor<R>) -> Self {
        self.rule(property, field, move |value| {
            value
                .map_or(true, |v| v.trim().is_empty())
                .then(|| format!("'{}' must not be empty.", property))
        })
    }

    /// Fails when the value has fewer than `min` characters. Absent values pass.
    pub fn min_length(self, property: &'static str, field: FieldAccessor<R>, min: usize) -> Self {
        self.rule(property, field, move |value| {
            let length = value?.chars().count();
            (length < min).then(|| {
                format!(
                    "The length of '{}' must be at least {} characters. You entered {} characters.",
                    property, min, length
                )
            })
        })
    }

    /// Requires a single '@' that is neither the first nor the last character.
    /// Absent values pass.
    pub fn email(self, property: &'static str, field: FieldAccessor<R>) -> Self {
        self.rule(property, field, move |value| {
            (!is_email_address(value?)).then(|| format!("'{}' is not a valid email address.", property))
        })
    }

    fn rule<F>(mut self, property: &'static str, field: FieldAccessor<R>, check: F) -> Self
    where
        F: Fn(Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            check: Box::new(move |request: &R| {
                check(field(request)).map(|message| ValidationFailure::new(property, message))
            }),
        });
        self
    }
}

fn is_email_address(value: &str) -> bool {
    match (value.find('@'), value.rfind('@')) {
        (Some(first), Some(last)) => first > 0 && first == last && first + 1 < value.len(),
        _ => false,
    }
}

#[async_trait]
impl<R: MediatorRequest> Validator for RuleSet<R> {
    type Request = R;

    fn name(&self) -> &'static str {
        self.name
    }

    async fn validate(&self, request: &R, _ctx: &DispatchContext) -> Vec<ValidationFailure> {
        self.rules.iter().filter_map(|rule| (rule.check)(request)).collect()
    }
}
