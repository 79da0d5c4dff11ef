use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::mediator::request::RequestKind;
use crate::store::StoreError;

/// A single field-level rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub property_name: String,
    pub error_message: String,
}

impl ValidationFailure {
    pub fn new(property_name: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            error_message: error_message.into(),
        }
    }
}

/// Aggregated validation failures. Never empty.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.failures))]
pub struct ValidationError {
    failures: Vec<ValidationFailure>,
}

impl ValidationError {
    /// Returns `None` when there is nothing to report
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.failures
    }
}

fn join_messages(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.error_message.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Errors raised while dispatching a request through the pipeline
#[derive(Debug, Error)]
pub enum MediatorError {
    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    #[error("Dispatch cancelled")]
    Cancelled,

    #[error("Dispatch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediatorError {
    pub fn internal(message: impl Into<String>) -> Self {
        MediatorError::Internal(message.into())
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            MediatorError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for MediatorError {
    fn from(error: ValidationError) -> Self {
        MediatorError::Validation(error)
    }
}

/// Wiring problems detected while building the mediator at startup
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No handler registered for request {0}")]
    MissingHandler(RequestKind),

    #[error("More than one handler registered for request {0}")]
    DuplicateHandler(RequestKind),

    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
}
