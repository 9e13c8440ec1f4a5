//! Step runner: executes an automation batch one step at a time.
//!
//! Each step moves `pending → running → {completed | error}`. Step *i+1*
//! only starts after step *i* reached a terminal state, and every
//! transition is published on the event bus before the next step begins,
//! so observers can render live progress. The first failing step halts
//! the batch: later steps stay pending, nothing is retried and nothing is
//! rolled back. Pacing comes entirely from the injected executor.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use workmate_domain::error::{ValidationError, WorkmateError};
use workmate_domain::event::{Event, EventType};
use workmate_domain::id::RunId;
use workmate_domain::step::{AutomationStep, StepStatus};

use crate::ports::{EventPublisher, StepExecutor};

/// Terminal outcome of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every step completed.
    Completed,
    /// The named step failed; the batch stopped there.
    Failed { step_id: String },
}

/// Final state of a batch: the step list as executed plus the outcome.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub outcome: RunOutcome,
    pub steps: Vec<AutomationStep>,
}

/// Application service executing step batches sequentially.
///
/// At most one batch runs per instance at a time; a second `run` call
/// while one is in flight is rejected, never interleaved.
pub struct StepRunner<X, P> {
    executor: X,
    publisher: P,
    running: AtomicBool,
}

impl<X, P> StepRunner<X, P>
where
    X: StepExecutor,
    P: EventPublisher,
{
    /// Create a new runner over the given executor and event bus.
    pub fn new(executor: X, publisher: P) -> Self {
        Self {
            executor,
            publisher,
            running: AtomicBool::new(false),
        }
    }

    /// Whether a batch is currently executing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Execute `steps` in list order, one at a time.
    ///
    /// A list whose steps all already completed is returned unchanged
    /// without executing anything: finished batches are assumed to have
    /// applied side effects, and re-applying them silently is never safe.
    ///
    /// # Errors
    ///
    /// Returns [`WorkmateError::RunInProgress`] when a batch is already
    /// executing, [`ValidationError::NoSteps`] for an empty list, and
    /// [`ValidationError::StepsAlreadyStarted`] when some step already
    /// left the pending state.
    #[tracing::instrument(skip(self, steps), fields(step_count = steps.len()))]
    pub async fn run(&self, mut steps: Vec<AutomationStep>) -> Result<RunReport, WorkmateError> {
        if steps.is_empty() {
            return Err(ValidationError::NoSteps.into());
        }
        if steps
            .iter()
            .all(|step| step.status == StepStatus::Completed)
        {
            return Ok(RunReport {
                run_id: RunId::new(),
                outcome: RunOutcome::Completed,
                steps,
            });
        }
        if steps.iter().any(|step| step.status != StepStatus::Pending) {
            return Err(ValidationError::StepsAlreadyStarted.into());
        }
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(WorkmateError::RunInProgress);
        }

        let run_id = RunId::new();
        let outcome = self.execute_batch(run_id, &mut steps).await;
        self.running.store(false, Ordering::SeqCst);

        Ok(RunReport {
            run_id,
            outcome,
            steps,
        })
    }

    async fn execute_batch(&self, run_id: RunId, steps: &mut [AutomationStep]) -> RunOutcome {
        let started = Event::new(
            EventType::RunStarted,
            Some(run_id),
            serde_json::json!({ "steps": steps.len() }),
        );
        let _ = self.publisher.publish(started).await;

        let mut outcome = RunOutcome::Completed;
        for step in steps.iter_mut() {
            step.status = StepStatus::Running;
            self.notify(run_id, step).await;

            match self.executor.execute(step).await {
                Ok(()) => {
                    step.status = StepStatus::Completed;
                    self.notify(run_id, step).await;
                }
                Err(err) => {
                    tracing::warn!(step_id = %step.id, error = %err, "step failed, halting batch");
                    step.status = StepStatus::Error;
                    self.notify(run_id, step).await;
                    outcome = RunOutcome::Failed {
                        step_id: step.id.clone(),
                    };
                    break;
                }
            }
        }

        let finished = Event::new(
            EventType::RunFinished,
            Some(run_id),
            serde_json::to_value(&outcome).unwrap_or_default(),
        );
        let _ = self.publisher.publish(finished).await;

        outcome
    }

    /// Report one status transition before the next step begins.
    async fn notify(&self, run_id: RunId, step: &AutomationStep) {
        let event = Event::new(
            EventType::StepStatusChanged,
            Some(run_id),
            serde_json::json!({
                "step_id": step.id,
                "status": step.status,
            }),
        );
        let _ = self.publisher.publish(event).await;
    }
}
