//! JSON handler for executing an entry's automation steps.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use workmate_app::ports::{ConversationStore, EventPublisher, StepExecutor, TextGenerator};
use workmate_app::services::step_runner::RunOutcome;
use workmate_domain::id::RunId;
use workmate_domain::step::AutomationStep;

use crate::api::conversation::parse_entry_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body naming the conversation entry whose steps should run.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub entry_id: String,
}

/// Response body for a finished batch.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunBody {
    pub run_id: RunId,
    pub outcome: RunOutcome,
    pub steps: Vec<AutomationStep>,
}

/// Possible responses from the run endpoint.
pub enum RunResponse {
    Ok(Json<RunBody>),
}

impl IntoResponse for RunResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/runs`: execute the steps of a conversation entry.
///
/// Final step statuses are written back onto the entry, so a later read
/// of the conversation shows what actually executed.
pub async fn create<S, G, X, P>(
    State(state): State<AppState<S, G, X, P>>,
    Json(req): Json<RunRequest>,
) -> Result<RunResponse, ApiError>
where
    S: ConversationStore + Send + Sync + 'static,
    G: TextGenerator + Send + Sync + 'static,
    X: StepExecutor + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let entry_id = parse_entry_id(&req.entry_id)?;
    let entry = state.conversation_service.entry(entry_id).await?;
    let report = state.step_runner.run(entry.steps).await?;
    let entry = state
        .conversation_service
        .set_entry_steps(entry_id, report.steps)
        .await?;

    Ok(RunResponse::Ok(Json(RunBody {
        run_id: report.run_id,
        outcome: report.outcome,
        steps: entry.steps,
    })))
}
