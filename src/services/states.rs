//! State lookup service

use crate::error::AppError;
use crate::models::State;
use crate::repository::StateRepository;
use std::sync::Arc;
use tracing::{error, info};

/// Read-only application service for state reference data
pub struct StateService {
    repository: Arc<dyn StateRepository>,
}

impl StateService {
    /// Create a service over the given repository
    pub fn new(repository: Arc<dyn StateRepository>) -> Self {
        Self { repository }
    }

    /// List all states
    pub async fn get_states(&self) -> Result<Vec<State>, AppError> {
        info!("Entering method get_states");
        match self.repository.get_states().await {
            Ok(states) => {
                info!(count = states.len(), "Returning response from get_states");
                Ok(states)
            }
            Err(e) => {
                error!(error = %e, "Error while getting the list of states");
                Err(e)
            }
        }
    }

    /// Look up a state by its code
    pub async fn get_state_by_id(&self, id: &str) -> Result<Option<State>, AppError> {
        info!(state_id = %id, "Entering method get_state_by_id");
        match self.repository.get_state_by_id(id).await {
            Ok(state) => {
                info!(state_id = %id, found = state.is_some(), "Returning response from get_state_by_id");
                Ok(state)
            }
            Err(e) => {
                error!(state_id = %id, error = %e, "Error while getting the state");
                Err(e)
            }
        }
    }
}
