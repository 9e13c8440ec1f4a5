//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod chat;
#[allow(clippy::missing_errors_doc)]
pub mod conversation;
#[allow(clippy::missing_errors_doc)]
pub mod runs;
pub mod sse;
pub mod suggestions;

use axum::Router;
use axum::routing::{get, post};

use workmate_app::ports::{ConversationStore, EventPublisher, StepExecutor, TextGenerator};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, G, X, P>() -> Router<AppState<S, G, X, P>>
where
    S: ConversationStore + Send + Sync + 'static,
    G: TextGenerator + Send + Sync + 'static,
    X: StepExecutor + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Chat
        .route("/chat", post(chat::create::<S, G, X, P>))
        // Conversation log
        .route("/conversation", get(conversation::list::<S, G, X, P>))
        .route("/conversation/{id}", get(conversation::get::<S, G, X, P>))
        // Suggestions
        .route("/suggestions", get(suggestions::list))
        // Runs
        .route("/runs", post(runs::create::<S, G, X, P>))
        // Events
        .route("/events/stream", get(sse::stream::<S, G, X, P>))
}
