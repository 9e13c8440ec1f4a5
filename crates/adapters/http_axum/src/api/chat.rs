//! JSON handler for submitting a chat message.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use workmate_app::ports::{ConversationStore, EventPublisher, StepExecutor, TextGenerator};
use workmate_domain::id::EntryId;
use workmate_domain::step::AutomationStep;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for a chat turn.
///
/// `message` is optional on the wire so that an omitted field surfaces as
/// the same validation error as a blank one, instead of a framework
/// rejection.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
}

/// Response body for a successful chat turn.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    /// Conversation entry holding this reply; pass it to `/api/runs`.
    pub entry_id: EntryId,
    pub user_reply: String,
    pub automation_steps: Vec<AutomationStep>,
}

/// Possible responses from the chat endpoint.
pub enum ChatResponse {
    Ok(Json<ChatBody>),
}

impl IntoResponse for ChatResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/chat`: run one chat turn.
pub async fn create<S, G, X, P>(
    State(state): State<AppState<S, G, X, P>>,
    Json(req): Json<ChatRequest>,
) -> Result<ChatResponse, ApiError>
where
    S: ConversationStore + Send + Sync + 'static,
    G: TextGenerator + Send + Sync + 'static,
    X: StepExecutor + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let message = req.message.unwrap_or_default();
    let entry = state.conversation_service.submit(&message).await?;
    Ok(ChatResponse::Ok(Json(ChatBody {
        entry_id: entry.id,
        user_reply: entry.content,
        automation_steps: entry.steps,
    })))
}
