//! State API handlers
//!
//! Read-only endpoints for the state reference data.

use crate::context::AppContext;
use crate::error::AppError;
use crate::models::State as StateRecord;
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

/// State response type
#[derive(Debug, Serialize)]
pub struct StateResponse {
    /// Short state code (e.g. "IL")
    pub id: String,
    /// Full state name
    pub name: String,
}

impl From<StateRecord> for StateResponse {
    fn from(state: StateRecord) -> Self {
        Self {
            id: state.id,
            name: state.name,
        }
    }
}

/// GET /api/states - List all states
pub async fn list_states(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<StateResponse>>, AppError> {
    let states: Vec<StateResponse> = ctx
        .states
        .get_states()
        .await?
        .into_iter()
        .map(StateResponse::from)
        .collect();

    Ok(Json(states))
}

/// GET /api/states/:id - Get a specific state
pub async fn get_state(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<StateResponse>, AppError> {
    let state = ctx
        .states
        .get_state_by_id(&id)
        .await?
        .ok_or(AppError::StateNotFound(id))?;

    Ok(Json(StateResponse::from(state)))
}
