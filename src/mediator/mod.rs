// Mediator pipeline: typed requests are routed to exactly one handler,
// wrapped by an ordered chain of cross-cutting behaviors.

pub mod context;
pub mod error;
pub mod request;
pub mod handler;
pub mod validation;
pub mod pipeline;
pub mod behaviors;
pub mod dispatcher;

// Re-export core types
pub use context::*;
pub use error::*;
pub use request::*;
pub use handler::*;
pub use validation::*;
pub use pipeline::*;
pub use dispatcher::*;
