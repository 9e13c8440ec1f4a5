//! Domain events: immutable records of something that happened.
//!
//! Events are produced when conversation entries are appended and when the
//! step runner moves a batch through its lifecycle. Subscribers (SSE
//! streams, loggers) observe them through the in-process event bus.

use serde::{Deserialize, Serialize};

use crate::id::{EventId, RunId};
use crate::time::{Timestamp, now};

/// Kind of a domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    EntryAppended,
    RunStarted,
    StepStatusChanged,
    RunFinished,
}

/// An immutable record of something that happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub event_type: EventType,
    /// Batch this event belongs to, when it was produced by the runner.
    pub run_id: Option<RunId>,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create a new event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, run_id: Option<RunId>, data: serde_json::Value) -> Self {
        Self {
            id: EventId::new(),
            event_type,
            run_id,
            data,
            timestamp: now(),
        }
    }
}
