//! # workmate-adapter-virtual
//!
//! Simulated step executor for demos and development.
//!
//! There is no real OS automation here: each step is "executed" by logging
//! its action token and sleeping a fixed delay, then reporting success.
//! The [`StepExecutor`] port is the seam where a real automation backend
//! (input injection, process control) would plug in.
//!
//! ## Dependency rule
//! Depends on `workmate-app` (port traits) and `workmate-domain` only.

use std::time::Duration;

use workmate_app::ports::StepExecutor;
use workmate_domain::error::WorkmateError;
use workmate_domain::step::AutomationStep;

/// Default per-step execution delay.
const DEFAULT_STEP_DELAY: Duration = Duration::from_secs(2);

/// Step executor that simulates execution with a fixed delay.
pub struct SimulatedExecutor {
    delay: Duration,
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self {
            delay: DEFAULT_STEP_DELAY,
        }
    }
}

impl SimulatedExecutor {
    /// Create an executor with a custom per-step delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured per-step delay.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl StepExecutor for SimulatedExecutor {
    async fn execute(&self, step: &AutomationStep) -> Result<(), WorkmateError> {
        tracing::info!(step_id = %step.id, action = %step.action, "simulating step execution");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_two_second_delay() {
        let executor = SimulatedExecutor::default();
        assert_eq!(executor.delay(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn should_execute_step_successfully() {
        let executor = SimulatedExecutor::with_delay(Duration::ZERO);
        let step = AutomationStep::new("1", "Open Run dialog", "win+r");
        executor.execute(&step).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn should_wait_for_configured_delay() {
        let executor = SimulatedExecutor::with_delay(Duration::from_millis(500));
        let step = AutomationStep::new("1", "Open Run dialog", "win+r");

        let before = tokio::time::Instant::now();
        executor.execute(&step).await.unwrap();
        assert!(before.elapsed() >= Duration::from_millis(500));
    }
}
