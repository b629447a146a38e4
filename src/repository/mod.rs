//! Persistence layer for the city registry
//!
//! Defines the storage traits consumed by the service layer and the
//! SQLite-backed implementation used by the binary.

mod sqlite;

pub use sqlite::{Database, SqliteRepository};

use crate::error::AppError;
use crate::models::{City, CityPayload, State};
use async_trait::async_trait;
use std::collections::HashMap;

/// Storage operations for city records
///
/// The filter passed to [`get_cities`](CityRepository::get_cities) is an
/// opaque key-value mapping; which keys are honored is up to the
/// implementation.
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// List cities matching the filter; an empty filter returns every city
    async fn get_cities(&self, filter: &HashMap<String, String>) -> Result<Vec<City>, AppError>;

    /// Look up a city by ID
    async fn get_city_by_id(&self, id: &str) -> Result<Option<City>, AppError>;

    /// Insert a new city, assigning its identifier
    async fn insert_city(&self, payload: &CityPayload) -> Result<City, AppError>;

    /// Replace the fields of an existing city, returning the updated record
    async fn update_city(&self, id: &str, payload: &CityPayload)
        -> Result<Option<City>, AppError>;

    /// Delete a city, reporting whether a record was removed
    async fn delete_city(&self, id: &str) -> Result<bool, AppError>;
}

/// Read-only storage operations for state reference rows
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// List all states
    async fn get_states(&self) -> Result<Vec<State>, AppError>;

    /// Look up a state by its code
    async fn get_state_by_id(&self, id: &str) -> Result<Option<State>, AppError>;
}
