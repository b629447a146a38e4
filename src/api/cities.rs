//! City API handlers
//!
//! Contains HTTP request handlers for city CRUD operations. Handlers own
//! the HTTP mapping: a missing record becomes a 404 here, never inside the
//! service layer.

use crate::context::AppContext;
use crate::error::AppError;
use crate::models::City;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// City response type
#[derive(Debug, Serialize)]
pub struct CityResponse {
    /// Unique identifier for the city
    pub id: String,
    /// Name of the city
    pub name: String,
    /// Identifier of the state this city belongs to
    pub state_id: String,
    /// Unix timestamp when the city was created
    pub created_at: i64,
    /// Unix timestamp when the city was last updated
    pub updated_at: i64,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state_id: city.state_id,
            created_at: city.created_at,
            updated_at: city.updated_at,
        }
    }
}

/// Cities list response
#[derive(Serialize)]
pub struct CitiesListResponse {
    /// List of matching cities
    pub cities: Vec<CityResponse>,
    /// Total number of matches
    pub count: usize,
}

/// Message response
#[derive(Serialize)]
pub struct MessageResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator (e.g., "ok", "error")
    pub status: String,
}

/// Create city request
#[derive(Debug, Deserialize)]
pub struct CreateCityRequest {
    /// Name for the new city
    pub name: String,
    /// State the city belongs to
    pub state_id: String,
}

/// Update city request
#[derive(Debug, Deserialize)]
pub struct UpdateCityRequest {
    /// New name for the city
    pub name: String,
    /// New state reference for the city
    pub state_id: String,
}

/// GET /api/cities - List cities, filtered by the query string
///
/// The query string is passed to the service as an opaque filter mapping.
pub async fn list_cities(
    State(ctx): State<AppContext>,
    Query(filter): Query<HashMap<String, String>>,
) -> Result<Json<CitiesListResponse>, AppError> {
    let cities: Vec<CityResponse> = ctx
        .cities
        .get_cities(&filter)
        .await?
        .into_iter()
        .map(CityResponse::from)
        .collect();

    Ok(Json(CitiesListResponse {
        count: cities.len(),
        cities,
    }))
}

/// GET /api/cities/:id - Get a specific city
pub async fn get_city(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<CityResponse>, AppError> {
    let city = ctx
        .cities
        .get_city_by_id(&id)
        .await?
        .ok_or(AppError::CityNotFound(id))?;

    Ok(Json(CityResponse::from(city)))
}

/// POST /api/cities - Create a new city
pub async fn create_city(
    State(ctx): State<AppContext>,
    Json(request): Json<CreateCityRequest>,
) -> Result<(StatusCode, Json<CityResponse>), AppError> {
    let city = ctx
        .cities
        .insert_city(&request.name, &request.state_id)
        .await?;

    Ok((StatusCode::CREATED, Json(CityResponse::from(city))))
}

/// PUT /api/cities/:id - Update a city
pub async fn update_city(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCityRequest>,
) -> Result<Json<CityResponse>, AppError> {
    let city = ctx
        .cities
        .update_city(&id, &request.name, &request.state_id)
        .await?
        .ok_or(AppError::CityNotFound(id))?;

    Ok(Json(CityResponse::from(city)))
}

/// DELETE /api/cities/:id - Delete a city
pub async fn delete_city(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = ctx.cities.delete_city(&id).await?;
    if !deleted {
        return Err(AppError::CityNotFound(id));
    }

    Ok(Json(MessageResponse {
        message: "City deleted successfully".to_string(),
        status: "ok".to_string(),
    }))
}
