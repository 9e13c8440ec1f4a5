//! Chat service: turns a task description into a reply plus automation steps.
//!
//! This is the request/response core of the assistant. It owns the
//! instruction preamble that pins the model to the two-field JSON
//! contract, forwards the composed prompt through the [`TextGenerator`]
//! port, and normalizes whatever comes back into a [`TaskPlan`].

use workmate_domain::error::{UpstreamError, ValidationError, WorkmateError};
use workmate_domain::plan::TaskPlan;

use crate::ports::{Sampling, TextGenerator};

/// Instruction preamble sent ahead of every user query.
///
/// Defines the output contract the model must answer with. Changing the
/// field names here breaks [`TaskPlan`] parsing, so keep them in sync.
const PROMPT_PREAMBLE: &str = r#"You are Workmate, an assistant specialized in desktop task automation. Your role is to help users automate tasks on their systems.

IMPORTANT: You must respond with a JSON object containing exactly two fields:
1. "userReply" - A concise, practical response explaining the task and providing step-by-step instructions that users can follow manually. Include specific keyboard shortcuts, commands, and actions (like "Press Ctrl+R", "Type 'notepad'", "Click OK"). Make it actionable and clear.
2. "automationSteps" - An array of step objects for automation, each with "id", "description", and "action" fields. Step ids must be unique within the array.

Guidelines for userReply:
- Be direct and practical, not conversational
- Include specific keyboard shortcuts (Ctrl+R, Win+R, Alt+Tab, etc.)
- Mention exact commands to type
- Provide clear, sequential steps
- Keep it concise but complete

Example response format:
{
  "userReply": "To open Notepad:\n1. Press Win+R to open Run dialog\n2. Type 'notepad' and press Enter\n3. Notepad will launch with a blank document",
  "automationSteps": [
    {
      "id": "1",
      "description": "Open Run dialog",
      "action": "win+r"
    },
    {
      "id": "2",
      "description": "Launch Notepad",
      "action": "type:notepad,enter"
    }
  ]
}

Always maintain this JSON format. Focus on practical, executable steps that users can perform manually if they choose not to automate."#;

/// Application service producing task plans from free-text descriptions.
pub struct ChatService<G> {
    generator: G,
    sampling: Sampling,
}

impl<G: TextGenerator> ChatService<G> {
    /// Create a new service backed by the given text generator.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            sampling: Sampling::default(),
        }
    }

    /// Turn a task description into a [`TaskPlan`].
    ///
    /// Blank input is rejected before any network call. Malformed model
    /// output is not an error: it degrades into the fallback plan.
    ///
    /// # Errors
    ///
    /// Returns [`WorkmateError::Validation`] for blank input and
    /// [`WorkmateError::Upstream`] when the generation call fails or
    /// yields no text.
    #[tracing::instrument(skip(self, message))]
    pub async fn generate(&self, message: &str) -> Result<TaskPlan, WorkmateError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let prompt = format!("{PROMPT_PREAMBLE}\n\nUser Query: {message}");
        let raw = self.generator.generate(&prompt, &self.sampling).await?;
        if raw.trim().is_empty() {
            return Err(UpstreamError::EmptyResponse.into());
        }

        Ok(TaskPlan::from_model_text(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use workmate_domain::plan::MANUAL_EXECUTION_ACTION;

    /// Generator double that returns a canned reply and counts calls.
    struct CannedGenerator {
        reply: Result<String, UpstreamError>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl CannedGenerator {
        fn ok(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }

        fn err(err: UpstreamError) -> Self {
            Self {
                reply: Err(err),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            }
        }
    }

    impl TextGenerator for CannedGenerator {
        async fn generate(&self, prompt: &str, _sampling: &Sampling) -> Result<String, WorkmateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().map_err(WorkmateError::from)
        }
    }

    const WELL_FORMED: &str = r#"{
        "userReply": "To open Notepad:\n1. Press Win+R\n2. Type 'notepad' and press Enter",
        "automationSteps": [
            {"id": "1", "description": "Open Run dialog", "action": "win+r"},
            {"id": "2", "description": "Launch Notepad", "action": "type:notepad,enter"}
        ]
    }"#;

    #[tokio::test]
    async fn should_return_parsed_plan_for_well_formed_output() {
        let service = ChatService::new(CannedGenerator::ok(WELL_FORMED));
        let plan = service.generate("Open Notepad").await.unwrap();
        assert_eq!(plan.automation_steps.len(), 2);
        assert_eq!(plan.automation_steps[0].action, "win+r");
        assert_eq!(plan.automation_steps[1].action, "type:notepad,enter");
    }

    #[tokio::test]
    async fn should_compose_prompt_from_preamble_and_query() {
        let generator = CannedGenerator::ok(WELL_FORMED);
        let service = ChatService::new(generator);
        service.generate("Open Notepad").await.unwrap();

        let prompt = service
            .generator
            .last_prompt
            .lock()
            .unwrap()
            .clone()
            .unwrap();
        assert!(prompt.starts_with("You are Workmate"));
        assert!(prompt.ends_with("User Query: Open Notepad"));
    }

    #[tokio::test]
    async fn should_reject_blank_message_without_calling_generator() {
        let service = ChatService::new(CannedGenerator::ok(WELL_FORMED));
        let result = service.generate("   ").await;
        assert!(matches!(
            result,
            Err(WorkmateError::Validation(ValidationError::EmptyMessage))
        ));
        assert_eq!(service.generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_wrap_prose_output_in_fallback_plan() {
        let service = ChatService::new(CannedGenerator::ok("Just press Win+R."));
        let plan = service.generate("Open Notepad").await.unwrap();
        assert_eq!(plan.automation_steps.len(), 1);
        assert_eq!(plan.automation_steps[0].action, MANUAL_EXECUTION_ACTION);
        assert!(plan.user_reply.contains("Just press Win+R."));
    }

    #[tokio::test]
    async fn should_propagate_upstream_transport_error() {
        let service = ChatService::new(CannedGenerator::err(UpstreamError::Status(503)));
        let result = service.generate("Open Notepad").await;
        assert!(matches!(
            result,
            Err(WorkmateError::Upstream(UpstreamError::Status(503)))
        ));
    }

    #[tokio::test]
    async fn should_treat_blank_generation_as_empty_response() {
        let service = ChatService::new(CannedGenerator::ok("   \n"));
        let result = service.generate("Open Notepad").await;
        assert!(matches!(
            result,
            Err(WorkmateError::Upstream(UpstreamError::EmptyResponse))
        ));
    }
}
