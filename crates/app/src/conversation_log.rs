//! In-memory conversation log.
//!
//! The whole conversation is session state: it lives in process memory and
//! disappears on restart. Backed by a `tokio::sync::RwLock` so the log can
//! be shared between the chat flow and the run endpoint without blocking
//! the runtime.

use tokio::sync::RwLock;

use workmate_domain::conversation::Entry;
use workmate_domain::error::{NotFoundError, WorkmateError};
use workmate_domain::id::EntryId;
use workmate_domain::step::AutomationStep;

use crate::ports::ConversationStore;

/// Process-memory implementation of [`ConversationStore`].
#[derive(Default)]
pub struct InMemoryConversation {
    entries: RwLock<Vec<Entry>>,
}

impl ConversationStore for InMemoryConversation {
    async fn append(&self, entry: Entry) -> Result<Entry, WorkmateError> {
        let mut entries = self.entries.write().await;
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn get_by_id(&self, id: EntryId) -> Result<Option<Entry>, WorkmateError> {
        let entries = self.entries.read().await;
        Ok(entries.iter().find(|entry| entry.id == id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Entry>, WorkmateError> {
        let entries = self.entries.read().await;
        Ok(entries.clone())
    }

    async fn update_steps(
        &self,
        id: EntryId,
        steps: Vec<AutomationStep>,
    ) -> Result<Entry, WorkmateError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| NotFoundError {
                entity: "Entry",
                id: id.to_string(),
            })?;
        entry.steps = steps;
        Ok(entry.clone())
    }
}
