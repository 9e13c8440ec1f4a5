//! Shared application state for axum handlers.

use std::sync::Arc;

use workmate_app::event_bus::InProcessEventBus;
use workmate_app::ports::{ConversationStore, EventPublisher, StepExecutor, TextGenerator};
use workmate_app::services::conversation_service::ConversationService;
use workmate_app::services::step_runner::StepRunner;

/// Application state shared across all axum handlers.
///
/// Generic over the conversation store, text generator, step executor, and
/// event publisher to avoid dynamic dispatch. `Clone` is implemented
/// manually so the underlying types themselves do not need to be `Clone`;
/// only the `Arc` wrappers are cloned.
pub struct AppState<S, G, X, P> {
    /// Chat turns and conversation log access.
    pub conversation_service: Arc<ConversationService<S, G, P>>,
    /// Sequential batch execution.
    pub step_runner: Arc<StepRunner<X, P>>,
    /// Event bus handle used by the SSE stream to subscribe.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<S, G, X, P> Clone for AppState<S, G, X, P> {
    fn clone(&self) -> Self {
        Self {
            conversation_service: Arc::clone(&self.conversation_service),
            step_runner: Arc::clone(&self.step_runner),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<S, G, X, P> AppState<S, G, X, P>
where
    S: ConversationStore + Send + Sync + 'static,
    G: TextGenerator + Send + Sync + 'static,
    X: StepExecutor + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        conversation_service: ConversationService<S, G, P>,
        step_runner: StepRunner<X, P>,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        Self {
            conversation_service: Arc::new(conversation_service),
            step_runner: Arc::new(step_runner),
            event_bus,
        }
    }
}
