//! City registry data models
//!
//! Defines structures for persisted cities, the state reference rows
//! backing their foreign key, and the sanitized mutation payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted city record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct City {
    /// Unique identifier for the city (assigned by the repository)
    pub id: String,
    /// Name of the city
    pub name: String,
    /// Identifier of the state this city belongs to
    pub state_id: String,
    /// When the city was created (Unix timestamp)
    pub created_at: i64,
    /// When the city was last updated (Unix timestamp)
    pub updated_at: i64,
}

impl City {
    /// Create a new city record from a sanitized payload
    pub fn new(id: String, payload: &CityPayload) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id,
            name: payload.name.clone(),
            state_id: payload.state_id.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A state reference row backing the city foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct State {
    /// Short state code (e.g. "IL")
    pub id: String,
    /// Full state name
    pub name: String,
}

/// Sanitized create/update payload produced by validation
///
/// Mutating repository calls only ever receive this type, never raw input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityPayload {
    /// Trimmed city name
    pub name: String,
    /// Normalized state code
    pub state_id: String,
}
