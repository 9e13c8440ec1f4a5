//! Conversation entries: the append-only chat log of a session.
//!
//! Entries are never mutated after creation, with one exception: the step
//! statuses embedded in an assistant entry are replaced when a run over
//! those steps finishes, so the log reflects what actually executed.

use serde::{Deserialize, Serialize};

use crate::id::EntryId;
use crate::step::AutomationStep;
use crate::time::{Timestamp, now};

/// Who authored a conversation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub role: Role,
    pub content: String,
    pub timestamp: Timestamp,
    #[serde(default, rename = "automationSteps")]
    pub steps: Vec<AutomationStep>,
}

impl Entry {
    /// Create a user entry carrying the submitted task description.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            role: Role::User,
            content: content.into(),
            timestamp: now(),
            steps: Vec::new(),
        }
    }

    /// Create an assistant entry carrying the reply and its steps.
    #[must_use]
    pub fn assistant(content: impl Into<String>, steps: Vec<AutomationStep>) -> Self {
        Self {
            id: EntryId::new(),
            role: Role::Assistant,
            content: content.into(),
            timestamp: now(),
            steps,
        }
    }

    /// Whether this entry carries steps that can be handed to the runner.
    #[must_use]
    pub fn can_automate(&self) -> bool {
        !self.steps.is_empty()
    }
}
