//! Conversation store port: the session-scoped entry log.
//!
//! Conversation state lives for the lifetime of the process; nothing is
//! persisted to disk. The port exists so the log can be swapped for a test
//! double, and so no service holds ambient global state.

use std::future::Future;

use workmate_domain::conversation::Entry;
use workmate_domain::error::WorkmateError;
use workmate_domain::id::EntryId;
use workmate_domain::step::AutomationStep;

/// Append-only conversation log with step-status write-back.
pub trait ConversationStore {
    /// Append an entry, returning it as stored.
    fn append(&self, entry: Entry) -> impl Future<Output = Result<Entry, WorkmateError>> + Send;

    /// Look up a single entry.
    fn get_by_id(
        &self,
        id: EntryId,
    ) -> impl Future<Output = Result<Option<Entry>, WorkmateError>> + Send;

    /// All entries in append order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Entry>, WorkmateError>> + Send;

    /// Replace the step list embedded in an entry.
    ///
    /// This is the one mutation allowed after append: a finished run
    /// writes final step statuses back onto the assistant entry that
    /// produced them.
    fn update_steps(
        &self,
        id: EntryId,
        steps: Vec<AutomationStep>,
    ) -> impl Future<Output = Result<Entry, WorkmateError>> + Send;
}

impl<T: ConversationStore + Send + Sync> ConversationStore for std::sync::Arc<T> {
    fn append(&self, entry: Entry) -> impl Future<Output = Result<Entry, WorkmateError>> + Send {
        (**self).append(entry)
    }

    fn get_by_id(
        &self,
        id: EntryId,
    ) -> impl Future<Output = Result<Option<Entry>, WorkmateError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Entry>, WorkmateError>> + Send {
        (**self).get_all()
    }

    fn update_steps(
        &self,
        id: EntryId,
        steps: Vec<AutomationStep>,
    ) -> impl Future<Output = Result<Entry, WorkmateError>> + Send {
        (**self).update_steps(id, steps)
    }
}
