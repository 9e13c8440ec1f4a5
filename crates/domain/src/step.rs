//! Automation step: one unit of a multi-step task.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution status of a single automation step.
///
/// Statuses follow `pending → running → {completed | error}`; only the
/// step runner moves a step forward, and terminal states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Error,
}

impl StepStatus {
    /// Whether the step has reached a terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Running => f.write_str("running"),
            Self::Completed => f.write_str("completed"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One unit of a multi-step task: a description plus an opaque action token.
///
/// The action token (`"win+r"`, `"type:notepad,enter"`, ...) is never
/// interpreted here; executors decide what it means. `id` is assigned by
/// the upstream model and is unique within one step list; list order is
/// the execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationStep {
    pub id: String,
    pub description: String,
    pub action: String,
    #[serde(default)]
    pub status: StepStatus,
}

impl AutomationStep {
    /// Create a pending step.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            action: action.into(),
            status: StepStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_pending_step() {
        let step = AutomationStep::new("1", "Open Run dialog", "win+r");
        assert_eq!(step.id, "1");
        assert_eq!(step.status, StepStatus::Pending);
    }

    #[test]
    fn should_default_status_to_pending_when_missing_from_json() {
        let step: AutomationStep = serde_json::from_str(
            r#"{"id":"1","description":"Open Run dialog","action":"win+r"}"#,
        )
        .unwrap();
        assert_eq!(step.status, StepStatus::Pending);
    }

    #[test]
    fn should_serialize_status_lowercase() {
        let json = serde_json::to_string(&StepStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }

    #[test]
    fn should_roundtrip_step_through_serde_json() {
        let mut step = AutomationStep::new("2", "Launch Notepad", "type:notepad,enter");
        step.status = StepStatus::Running;
        let json = serde_json::to_string(&step).unwrap();
        let parsed: AutomationStep = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, step);
    }

    #[test]
    fn should_report_terminal_states() {
        assert!(StepStatus::Completed.is_terminal());
        assert!(StepStatus::Error.is_terminal());
        assert!(!StepStatus::Pending.is_terminal());
        assert!(!StepStatus::Running.is_terminal());
    }

    #[test]
    fn should_display_lowercase_variant_name() {
        assert_eq!(StepStatus::Running.to_string(), "running");
        assert_eq!(StepStatus::Error.to_string(), "error");
    }
}
