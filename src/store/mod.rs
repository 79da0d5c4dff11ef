// In-memory stores owned by the process. Each store is created once at
// startup and handed to the request handlers that need it.

pub mod todos;
pub mod users;

pub use todos::*;
pub use users::*;

use thiserror::Error;

/// Storage failures surfaced to request handlers
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    #[error("Identifier space exhausted for {0}")]
    IdOverflow(&'static str),
}
