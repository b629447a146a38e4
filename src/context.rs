//! Shared application context
//!
//! The services are constructed once at startup and handed to the router
//! by reference; handlers receive a clone of this context via axum state.

use crate::repository::{Database, SqliteRepository};
use crate::services::{CityService, StateService};
use std::sync::Arc;

/// Handles to the application services, cloned into each handler
#[derive(Clone)]
pub struct AppContext {
    /// City CRUD service
    pub cities: Arc<CityService>,
    /// State lookup service
    pub states: Arc<StateService>,
}

impl AppContext {
    /// Build the context over a connected database
    pub fn new(db: &Database) -> Self {
        let repository = Arc::new(SqliteRepository::new(db));
        Self {
            cities: Arc::new(CityService::new(repository.clone())),
            states: Arc::new(StateService::new(repository)),
        }
    }
}
