//! Step-executor port: carries out a single automation step.

use std::future::Future;

use workmate_domain::error::WorkmateError;
use workmate_domain::step::AutomationStep;

/// Executes one automation step.
///
/// Interpretation of the opaque action token is entirely up to the
/// implementation: the production adapter simulates execution with a fixed
/// delay, a future OS-automation backend would drive real input, and test
/// doubles fail on demand. A returned error marks the step failed and
/// halts the batch.
pub trait StepExecutor {
    /// Carry out `step`, returning once it finished or failed.
    fn execute(
        &self,
        step: &AutomationStep,
    ) -> impl Future<Output = Result<(), WorkmateError>> + Send;
}

impl<T: StepExecutor + Send + Sync> StepExecutor for std::sync::Arc<T> {
    fn execute(
        &self,
        step: &AutomationStep,
    ) -> impl Future<Output = Result<(), WorkmateError>> + Send {
        (**self).execute(step)
    }
}
