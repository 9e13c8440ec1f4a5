//! JSON handlers for reading the conversation log.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};

use workmate_app::ports::{ConversationStore, EventPublisher, StepExecutor, TextGenerator};
use workmate_domain::conversation::Entry;
use workmate_domain::error::NotFoundError;
use workmate_domain::id::EntryId;

use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Entry>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Entry>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/conversation`: the full entry log in append order.
pub async fn list<S, G, X, P>(
    State(state): State<AppState<S, G, X, P>>,
) -> Result<ListResponse, ApiError>
where
    S: ConversationStore + Send + Sync + 'static,
    G: TextGenerator + Send + Sync + 'static,
    X: StepExecutor + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let entries = state.conversation_service.history().await?;
    Ok(ListResponse::Ok(Json(entries)))
}

/// `GET /api/conversation/{id}`: one entry by id.
pub async fn get<S, G, X, P>(
    State(state): State<AppState<S, G, X, P>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    S: ConversationStore + Send + Sync + 'static,
    G: TextGenerator + Send + Sync + 'static,
    X: StepExecutor + Send + Sync + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let entry_id = parse_entry_id(&id)?;
    let entry = state.conversation_service.entry(entry_id).await?;
    Ok(GetResponse::Ok(Json(entry)))
}

/// A malformed id can't name any entry, so it maps to not-found.
pub(crate) fn parse_entry_id(raw: &str) -> Result<EntryId, ApiError> {
    EntryId::from_str(raw).map_err(|_| {
        ApiError::from(workmate_domain::error::WorkmateError::NotFound(
            NotFoundError {
                entity: "Entry",
                id: raw.to_string(),
            },
        ))
    })
}
