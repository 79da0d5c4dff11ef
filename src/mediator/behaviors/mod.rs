// Built-in pipeline behaviors, listed outermost first

pub mod logging;
pub mod identity;
pub mod validation;

pub use logging::*;
pub use identity::*;
pub use validation::*;

use std::sync::Arc;

use crate::auth::IdentityResolver;
use crate::mediator::pipeline::Behavior;
use crate::mediator::validation::ValidatorRegistry;

/// The fixed chain: Logging -> Identity stamping -> Validation -> handler
pub fn standard_behaviors(
    identity: Arc<dyn IdentityResolver>,
    validators: ValidatorRegistry,
) -> Vec<Arc<dyn Behavior>> {
    vec![
        Arc::new(LoggingBehavior) as Arc<dyn Behavior>,
        Arc::new(IdentityBehavior::new(identity)),
        Arc::new(ValidationBehavior::new(validators)),
    ]
}
