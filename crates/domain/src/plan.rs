//! Task plan: the normalized reply from the text-generation service.
//!
//! The upstream model is instructed to answer with a two-field JSON object
//! (`userReply` plus `automationSteps`). Model output is untrusted: it may
//! arrive fenced in Markdown, as free-form prose, or as broken JSON, and
//! none of that may crash a caller. Parsing therefore never fails; output
//! that does not honor the contract degrades into a single-step fallback
//! plan that wraps the raw text verbatim.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::step::AutomationStep;

/// Action token of the fallback step produced when model output cannot be
/// parsed. Executors treat it as "nothing to do mechanically".
pub const MANUAL_EXECUTION_ACTION: &str = "manual_execution_required";

/// A human-readable reply plus the ordered steps to carry it out.
///
/// Immutable once produced; a new plan replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPlan {
    pub user_reply: String,
    pub automation_steps: Vec<AutomationStep>,
}

/// Wire shape of a contract-conforming model answer.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanPayload {
    user_reply: String,
    #[serde(default)]
    automation_steps: Vec<AutomationStep>,
}

impl TaskPlan {
    /// Parse raw model output into a plan.
    ///
    /// Strips an optional Markdown code fence, then attempts a strict JSON
    /// parse of the two-field contract. A missing step array defaults to
    /// empty. Output that fails to parse, or whose step ids are not unique
    /// within the list, becomes [`TaskPlan::fallback`] instead of an error.
    #[must_use]
    pub fn from_model_text(raw: &str) -> Self {
        let cleaned = strip_code_fence(raw);
        match serde_json::from_str::<PlanPayload>(cleaned) {
            Ok(payload) if has_unique_step_ids(&payload.automation_steps) => Self {
                user_reply: payload.user_reply,
                automation_steps: payload.automation_steps,
            },
            _ => Self::fallback(raw),
        }
    }

    /// Degraded plan wrapping unparseable model output verbatim.
    ///
    /// The reply stays usable as manual instructions; the single step
    /// carries [`MANUAL_EXECUTION_ACTION`] so executors know there is
    /// nothing mechanical to run.
    #[must_use]
    pub fn fallback(raw: &str) -> Self {
        Self {
            user_reply: format!(
                "Here's how to handle your request:\n\n{raw}\n\nYou can follow these steps manually or use the automation feature."
            ),
            automation_steps: vec![AutomationStep::new(
                "1",
                "Follow manual steps above",
                MANUAL_EXECUTION_ACTION,
            )],
        }
    }
}

/// Remove a surrounding Markdown code fence, if present.
fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest);
        if let Some(body) = text.trim_end().strip_suffix("```") {
            text = body;
        }
    }
    text.trim()
}

fn has_unique_step_ids(steps: &[AutomationStep]) -> bool {
    let mut seen = HashSet::new();
    steps.iter().all(|step| seen.insert(step.id.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepStatus;

    const WELL_FORMED: &str = r#"{
        "userReply": "To open Notepad:\n1. Press Win+R\n2. Type 'notepad' and press Enter",
        "automationSteps": [
            {"id": "1", "description": "Open Run dialog", "action": "win+r"},
            {"id": "2", "description": "Launch Notepad", "action": "type:notepad,enter"}
        ]
    }"#;

    #[test]
    fn should_parse_well_formed_payload_preserving_step_order() {
        let plan = TaskPlan::from_model_text(WELL_FORMED);
        assert_eq!(plan.automation_steps.len(), 2);
        assert_eq!(plan.automation_steps[0].id, "1");
        assert_eq!(plan.automation_steps[0].action, "win+r");
        assert_eq!(plan.automation_steps[1].id, "2");
        assert_eq!(plan.automation_steps[1].action, "type:notepad,enter");
        assert!(plan.user_reply.starts_with("To open Notepad"));
    }

    #[test]
    fn should_parse_payload_wrapped_in_json_code_fence() {
        let fenced = format!("```json\n{WELL_FORMED}\n```");
        let plan = TaskPlan::from_model_text(&fenced);
        assert_eq!(plan.automation_steps.len(), 2);
    }

    #[test]
    fn should_parse_payload_wrapped_in_bare_code_fence() {
        let fenced = format!("```\n{WELL_FORMED}\n```");
        let plan = TaskPlan::from_model_text(&fenced);
        assert_eq!(plan.automation_steps.len(), 2);
    }

    #[test]
    fn should_default_steps_to_empty_when_array_missing() {
        let plan = TaskPlan::from_model_text(r#"{"userReply": "Just an answer."}"#);
        assert_eq!(plan.user_reply, "Just an answer.");
        assert!(plan.automation_steps.is_empty());
    }

    #[test]
    fn should_fall_back_when_output_is_prose() {
        let raw = "Press Win+R, type notepad, press Enter.";
        let plan = TaskPlan::from_model_text(raw);
        assert_eq!(plan.automation_steps.len(), 1);
        assert_eq!(plan.automation_steps[0].action, MANUAL_EXECUTION_ACTION);
        assert_eq!(plan.automation_steps[0].status, StepStatus::Pending);
        assert!(plan.user_reply.contains(raw));
    }

    #[test]
    fn should_fall_back_when_json_is_broken() {
        let raw = r#"{"userReply": "oops", "automationSteps": ["#;
        let plan = TaskPlan::from_model_text(raw);
        assert_eq!(plan.automation_steps.len(), 1);
        assert_eq!(plan.automation_steps[0].action, MANUAL_EXECUTION_ACTION);
        assert!(plan.user_reply.contains(raw));
    }

    #[test]
    fn should_fall_back_when_reply_field_missing() {
        let plan = TaskPlan::from_model_text(r#"{"automationSteps": []}"#);
        assert_eq!(plan.automation_steps.len(), 1);
        assert_eq!(plan.automation_steps[0].action, MANUAL_EXECUTION_ACTION);
    }

    #[test]
    fn should_fall_back_when_step_ids_are_duplicated() {
        let raw = r#"{
            "userReply": "Two steps, one id.",
            "automationSteps": [
                {"id": "1", "description": "first", "action": "a"},
                {"id": "1", "description": "second", "action": "b"}
            ]
        }"#;
        let plan = TaskPlan::from_model_text(raw);
        assert_eq!(plan.automation_steps.len(), 1);
        assert_eq!(plan.automation_steps[0].action, MANUAL_EXECUTION_ACTION);
    }

    #[test]
    fn should_ignore_extra_fields_in_payload() {
        let plan = TaskPlan::from_model_text(
            r#"{"userReply": "ok", "automationSteps": [], "confidence": 0.9}"#,
        );
        assert_eq!(plan.user_reply, "ok");
        assert!(plan.automation_steps.is_empty());
    }

    #[test]
    fn should_serialize_plan_in_camel_case() {
        let plan = TaskPlan::from_model_text(WELL_FORMED);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"userReply\""));
        assert!(json.contains("\"automationSteps\""));
    }

    #[test]
    fn should_strip_fence_without_newline_after_tag() {
        let fenced = format!("```json{WELL_FORMED}```");
        let plan = TaskPlan::from_model_text(&fenced);
        assert_eq!(plan.automation_steps.len(), 2);
    }
}
