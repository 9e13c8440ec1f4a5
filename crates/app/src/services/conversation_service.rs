//! Conversation service: records one chat turn end to end.
//!
//! Owns the session-scoped conversation log. A submitted task description
//! becomes a user entry; the chat service's answer becomes the assistant
//! entry that follows it. Upstream failures still leave a trace in the
//! log (the fixed apologetic reply) before the error propagates, so the
//! conversation a user sees matches what actually happened.

use workmate_domain::conversation::Entry;
use workmate_domain::error::{NotFoundError, ValidationError, WorkmateError};
use workmate_domain::event::{Event, EventType};
use workmate_domain::id::EntryId;
use workmate_domain::step::AutomationStep;

use crate::ports::{ConversationStore, EventPublisher, TextGenerator};
use crate::services::chat_service::ChatService;

/// Fixed assistant reply recorded when the upstream call fails.
const UPSTREAM_FAILURE_REPLY: &str =
    "Sorry, I encountered an error processing your request. Please try again.";

/// Application service orchestrating chat turns over the conversation log.
pub struct ConversationService<S, G, P> {
    store: S,
    chat: ChatService<G>,
    publisher: P,
}

impl<S, G, P> ConversationService<S, G, P>
where
    S: ConversationStore,
    G: TextGenerator,
    P: EventPublisher,
{
    /// Create a new service over the given store, chat service, and bus.
    pub fn new(store: S, chat: ChatService<G>, publisher: P) -> Self {
        Self {
            store,
            chat,
            publisher,
        }
    }

    /// Run one chat turn: record the user entry, generate the plan,
    /// record the assistant entry, and return it.
    ///
    /// # Errors
    ///
    /// Returns [`WorkmateError::Validation`] for blank input (nothing is
    /// recorded in that case) and [`WorkmateError::Upstream`] when the
    /// generation call fails (the apologetic assistant entry is recorded
    /// first).
    #[tracing::instrument(skip(self, message))]
    pub async fn submit(&self, message: &str) -> Result<Entry, WorkmateError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        self.append(Entry::user(message)).await?;

        match self.chat.generate(message).await {
            Ok(plan) => {
                let entry = Entry::assistant(plan.user_reply, plan.automation_steps);
                self.append(entry).await
            }
            Err(err) => {
                tracing::error!(error = %err, "chat turn failed");
                self.append(Entry::assistant(UPSTREAM_FAILURE_REPLY, Vec::new()))
                    .await?;
                Err(err)
            }
        }
    }

    /// Look up an entry by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`WorkmateError::NotFound`] when no entry with `id` exists.
    pub async fn entry(&self, id: EntryId) -> Result<Entry, WorkmateError> {
        self.store.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Entry",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// The full conversation log in append order.
    ///
    /// # Errors
    ///
    /// Returns a store error if the log cannot be read.
    pub async fn history(&self) -> Result<Vec<Entry>, WorkmateError> {
        self.store.get_all().await
    }

    /// Write final step statuses back onto the entry that produced them.
    ///
    /// # Errors
    ///
    /// Returns [`WorkmateError::NotFound`] when no entry with `id` exists.
    pub async fn set_entry_steps(
        &self,
        id: EntryId,
        steps: Vec<AutomationStep>,
    ) -> Result<Entry, WorkmateError> {
        self.store.update_steps(id, steps).await
    }

    async fn append(&self, entry: Entry) -> Result<Entry, WorkmateError> {
        let entry = self.store.append(entry).await?;

        // Publish EntryAppended (fire-and-forget)
        let event = Event::new(
            EventType::EntryAppended,
            None,
            serde_json::json!({
                "entry_id": entry.id,
                "role": entry.role,
            }),
        );
        let _ = self.publisher.publish(event).await;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use workmate_domain::conversation::Role;
    use workmate_domain::error::UpstreamError;
    use workmate_domain::plan::MANUAL_EXECUTION_ACTION;

    use crate::conversation_log::InMemoryConversation;
    use crate::ports::Sampling;

    struct CannedGenerator {
        reply: Result<String, UpstreamError>,
    }

    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _sampling: &Sampling,
        ) -> Result<String, WorkmateError> {
            self.reply.clone().map_err(WorkmateError::from)
        }
    }

    struct SpyPublisher {
        events: Mutex<Vec<Event>>,
    }

    impl Default for SpyPublisher {
        fn default() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }
    }

    impl EventPublisher for SpyPublisher {
        async fn publish(&self, event: Event) -> Result<(), WorkmateError> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    const WELL_FORMED: &str = r#"{
        "userReply": "Press Win+R, then type notepad.",
        "automationSteps": [
            {"id": "1", "description": "Open Run dialog", "action": "win+r"}
        ]
    }"#;

    fn make_service(
        reply: Result<String, UpstreamError>,
    ) -> ConversationService<InMemoryConversation, CannedGenerator, SpyPublisher> {
        ConversationService::new(
            InMemoryConversation::default(),
            ChatService::new(CannedGenerator { reply }),
            SpyPublisher::default(),
        )
    }

    #[tokio::test]
    async fn should_record_user_and_assistant_entries_on_success() {
        let svc = make_service(Ok(WELL_FORMED.to_string()));
        let entry = svc.submit("Open Notepad").await.unwrap();

        assert_eq!(entry.role, Role::Assistant);
        assert!(entry.can_automate());

        let history = svc.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "Open Notepad");
        assert_eq!(history[1].id, entry.id);
    }

    #[tokio::test]
    async fn should_record_nothing_for_blank_message() {
        let svc = make_service(Ok(WELL_FORMED.to_string()));
        let result = svc.submit("  ").await;
        assert!(matches!(
            result,
            Err(WorkmateError::Validation(ValidationError::EmptyMessage))
        ));
        assert!(svc.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_record_apology_and_propagate_upstream_error() {
        let svc = make_service(Err(UpstreamError::Status(500)));
        let result = svc.submit("Open Notepad").await;
        assert!(matches!(result, Err(WorkmateError::Upstream(_))));

        let history = svc.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, UPSTREAM_FAILURE_REPLY);
        assert!(!history[1].can_automate());
    }

    #[tokio::test]
    async fn should_wrap_malformed_output_instead_of_failing() {
        let svc = make_service(Ok("free-form prose".to_string()));
        let entry = svc.submit("Open Notepad").await.unwrap();
        assert_eq!(entry.steps.len(), 1);
        assert_eq!(entry.steps[0].action, MANUAL_EXECUTION_ACTION);
    }

    #[tokio::test]
    async fn should_publish_entry_appended_for_each_entry() {
        let svc = make_service(Ok(WELL_FORMED.to_string()));
        svc.submit("Open Notepad").await.unwrap();

        let events = svc.publisher.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(
            events
                .iter()
                .all(|e| e.event_type == EventType::EntryAppended)
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_entry() {
        let svc = make_service(Ok(WELL_FORMED.to_string()));
        let result = svc.entry(EntryId::new()).await;
        assert!(matches!(result, Err(WorkmateError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_write_back_step_statuses() {
        use workmate_domain::step::StepStatus;

        let svc = make_service(Ok(WELL_FORMED.to_string()));
        let entry = svc.submit("Open Notepad").await.unwrap();

        let mut steps = entry.steps.clone();
        steps[0].status = StepStatus::Completed;
        let updated = svc.set_entry_steps(entry.id, steps).await.unwrap();
        assert_eq!(updated.steps[0].status, StepStatus::Completed);

        let reread = svc.entry(entry.id).await.unwrap();
        assert_eq!(reread.steps[0].status, StepStatus::Completed);
    }
}
