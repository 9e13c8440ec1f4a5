//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Adapters map [`WorkmateError`] variants to their own surface (HTTP
//! status codes, log records) without inspecting the message text.

use thiserror::Error;

/// Top-level error for all workmate operations.
#[derive(Debug, Error)]
pub enum WorkmateError {
    /// Caller-supplied input failed a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The text-generation service could not be reached or gave no text.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// A single automation step failed during execution.
    ///
    /// Never propagated out of a batch: the runner absorbs it into the
    /// step's `error` status and halts.
    #[error(transparent)]
    Execution(#[from] ExecutionError),

    /// A step batch is already executing on this runner.
    #[error("a step batch is already running")]
    RunInProgress,
}

/// Domain invariant violations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The task description was empty or blank.
    #[error("message must not be empty")]
    EmptyMessage,

    /// The step list handed to the runner was empty.
    #[error("step list is empty")]
    NoSteps,

    /// Some step in the batch already left the pending state.
    #[error("step batch was already started")]
    StepsAlreadyStarted,
}

/// A lookup that found nothing.
#[derive(Debug, Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A step executor could not carry out a step.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("step execution failed: {reason}")]
pub struct ExecutionError {
    pub reason: String,
}

impl ExecutionError {
    /// Create an execution failure with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Failures talking to the external text-generation service.
///
/// None of these is retried automatically; the caller sees a generic
/// server error while the detail goes to the log.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The request never completed (DNS, TLS, connection reset, ...).
    #[error("transport failure calling text-generation service: {0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("text-generation service returned status {0}")]
    Status(u16),

    /// The service answered but produced no generated text.
    #[error("text-generation service returned no text")]
    EmptyResponse,
}
