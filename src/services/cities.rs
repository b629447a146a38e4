//! City service
//!
//! The sole application-facing contract for city resources. Every
//! operation logs entry and exit, delegates persistence to the repository,
//! and re-raises failures unchanged. Mutating operations validate their
//! input first; a rejected payload never reaches the repository.

use crate::error::AppError;
use crate::models::{City, CityPayload};
use crate::repository::CityRepository;
use crate::validation;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

/// Application service for city resources
///
/// Holds no mutable state; all persisted state lives in the repository.
pub struct CityService {
    repository: Arc<dyn CityRepository>,
}

impl CityService {
    /// Create a service over the given repository
    pub fn new(repository: Arc<dyn CityRepository>) -> Self {
        Self { repository }
    }

    /// Get the list of cities, optionally narrowed by an opaque filter
    ///
    /// The filter is passed through to the repository unmodified; its
    /// semantics are repository-defined. No validation is performed.
    pub async fn get_cities(
        &self,
        filter: &HashMap<String, String>,
    ) -> Result<Vec<City>, AppError> {
        info!(filter = ?filter, "Entering method get_cities");
        match self.repository.get_cities(filter).await {
            Ok(cities) => {
                info!(count = cities.len(), "Returning response from get_cities");
                Ok(cities)
            }
            Err(e) => {
                error!(error = %e, "Error while getting the list of cities");
                Err(e)
            }
        }
    }

    /// Search for a city by its ID
    ///
    /// "Not found" is a data state (`None`), not an error.
    pub async fn get_city_by_id(&self, id: &str) -> Result<Option<City>, AppError> {
        info!(city_id = %id, "Entering method get_city_by_id");
        match self.repository.get_city_by_id(id).await {
            Ok(city) => {
                info!(city_id = %id, found = city.is_some(), "Returning response from get_city_by_id");
                Ok(city)
            }
            Err(e) => {
                error!(city_id = %id, error = %e, "Error while getting the city");
                Err(e)
            }
        }
    }

    /// Create a new city
    ///
    /// Input is validated and sanitized before the repository is invoked;
    /// a validation failure stops the operation with no side effects.
    pub async fn insert_city(&self, name: &str, state_id: &str) -> Result<City, AppError> {
        info!(name = %name, state_id = %state_id, "Entering method insert_city");

        let payload = match validation::validate_insert_city(name, state_id) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Error while validating the city payload");
                return Err(e);
            }
        };
        info!(payload = ?payload, "Payload validated and sanitized in insert_city");

        match self.repository.insert_city(&payload).await {
            Ok(city) => {
                info!(city_id = %city.id, "Returning response from insert_city");
                Ok(city)
            }
            Err(e) => {
                error!(error = %e, "Error while inserting the city");
                Err(e)
            }
        }
    }

    /// Update an existing city
    ///
    /// Same validate-then-persist contract as [`insert_city`](Self::insert_city);
    /// the update is a full field replacement. Returns `None` when the ID
    /// does not exist.
    pub async fn update_city(
        &self,
        id: &str,
        name: &str,
        state_id: &str,
    ) -> Result<Option<City>, AppError> {
        info!(city_id = %id, name = %name, state_id = %state_id, "Entering method update_city");

        let payload = match validation::validate_update_city(name, state_id) {
            Ok(payload) => payload,
            Err(e) => {
                error!(city_id = %id, error = %e, "Error while validating the city payload");
                return Err(e);
            }
        };
        info!(payload = ?payload, "Payload validated and sanitized in update_city");

        match self.repository.update_city(id, &payload).await {
            Ok(city) => {
                info!(city_id = %id, found = city.is_some(), "Returning response from update_city");
                Ok(city)
            }
            Err(e) => {
                error!(city_id = %id, error = %e, "Error while updating the city");
                Err(e)
            }
        }
    }

    /// Delete a city
    ///
    /// No validation step; the only input is the identifier. Returns the
    /// repository's deletion acknowledgment.
    pub async fn delete_city(&self, id: &str) -> Result<bool, AppError> {
        info!(city_id = %id, "Entering method delete_city");
        match self.repository.delete_city(id).await {
            Ok(deleted) => {
                info!(city_id = %id, deleted, "Returning response from delete_city");
                Ok(deleted)
            }
            Err(e) => {
                error!(city_id = %id, error = %e, "Error while deleting the city");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory repository recording every call for assertion
    struct RecordingRepository {
        cities: Mutex<Vec<City>>,
        insert_calls: AtomicUsize,
        update_calls: AtomicUsize,
        last_payload: Mutex<Option<CityPayload>>,
        fail: bool,
    }

    impl RecordingRepository {
        fn new() -> Self {
            Self {
                cities: Mutex::new(Vec::new()),
                insert_calls: AtomicUsize::new(0),
                update_calls: AtomicUsize::new(0),
                last_payload: Mutex::new(None),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn with_cities(cities: Vec<City>) -> Self {
            Self {
                cities: Mutex::new(cities),
                ..Self::new()
            }
        }

        fn check_failure(&self) -> Result<(), AppError> {
            if self.fail {
                Err(AppError::Database(sqlx::Error::PoolClosed))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CityRepository for RecordingRepository {
        async fn get_cities(
            &self,
            filter: &HashMap<String, String>,
        ) -> Result<Vec<City>, AppError> {
            self.check_failure()?;
            let cities = self.cities.lock().unwrap();
            let matches = cities
                .iter()
                .filter(|c| {
                    filter.get("name").map_or(true, |n| &c.name == n)
                        && filter.get("state_id").map_or(true, |s| &c.state_id == s)
                })
                .cloned()
                .collect();
            Ok(matches)
        }

        async fn get_city_by_id(&self, id: &str) -> Result<Option<City>, AppError> {
            self.check_failure()?;
            let cities = self.cities.lock().unwrap();
            Ok(cities.iter().find(|c| c.id == id).cloned())
        }

        async fn insert_city(&self, payload: &CityPayload) -> Result<City, AppError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload.clone());
            self.check_failure()?;
            let city = City::new("42".to_string(), payload);
            self.cities.lock().unwrap().push(city.clone());
            Ok(city)
        }

        async fn update_city(
            &self,
            id: &str,
            payload: &CityPayload,
        ) -> Result<Option<City>, AppError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(payload.clone());
            self.check_failure()?;
            let mut cities = self.cities.lock().unwrap();
            match cities.iter_mut().find(|c| c.id == id) {
                Some(city) => {
                    city.name = payload.name.clone();
                    city.state_id = payload.state_id.clone();
                    Ok(Some(city.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete_city(&self, id: &str) -> Result<bool, AppError> {
            self.check_failure()?;
            let mut cities = self.cities.lock().unwrap();
            let before = cities.len();
            cities.retain(|c| c.id != id);
            Ok(cities.len() < before)
        }
    }

    fn sample_city(id: &str, name: &str, state_id: &str) -> City {
        City {
            id: id.to_string(),
            name: name.to_string(),
            state_id: state_id.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[tokio::test]
    async fn test_insert_city_calls_repository_once_with_validated_payload() {
        let repo = Arc::new(RecordingRepository::new());
        let service = CityService::new(repo.clone());

        let city = service.insert_city("Springfield", "IL").await.unwrap();

        assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 1);
        let payload = repo.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload.name, "Springfield");
        assert_eq!(payload.state_id, "IL");
        // The service returns exactly what the repository returned
        assert_eq!(city.id, "42");
        assert_eq!(city.name, "Springfield");
        assert_eq!(city.state_id, "IL");
    }

    #[tokio::test]
    async fn test_insert_city_rejected_input_never_reaches_repository() {
        let repo = Arc::new(RecordingRepository::new());
        let service = CityService::new(repo.clone());

        let result = service.insert_city("", "IL").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_city_rejected_input_never_reaches_repository() {
        let repo = Arc::new(RecordingRepository::with_cities(vec![sample_city(
            "42",
            "Springfield",
            "IL",
        )]));
        let service = CityService::new(repo.clone());

        let result = service.update_city("42", "", "IL").await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 0);

        // The stored record is untouched
        let city = service.get_city_by_id("42").await.unwrap().unwrap();
        assert_eq!(city.name, "Springfield");
    }

    #[tokio::test]
    async fn test_update_city_missing_id_returns_none() {
        let repo = Arc::new(RecordingRepository::new());
        let service = CityService::new(repo);

        let result = service.update_city("missing", "Salem", "OR").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_repository_errors_propagate_unchanged() {
        let repo = Arc::new(RecordingRepository::failing());
        let service = CityService::new(repo);

        let err = service.get_cities(&HashMap::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Database(sqlx::Error::PoolClosed)));

        let err = service.get_city_by_id("42").await.unwrap_err();
        assert!(matches!(err, AppError::Database(sqlx::Error::PoolClosed)));

        let err = service.insert_city("Springfield", "IL").await.unwrap_err();
        assert!(matches!(err, AppError::Database(sqlx::Error::PoolClosed)));

        let err = service.delete_city("42").await.unwrap_err();
        assert!(matches!(err, AppError::Database(sqlx::Error::PoolClosed)));
    }

    #[tokio::test]
    async fn test_get_cities_empty_filter_returns_full_list() {
        let repo = Arc::new(RecordingRepository::with_cities(vec![
            sample_city("1", "Springfield", "IL"),
            sample_city("2", "Portland", "OR"),
        ]));
        let service = CityService::new(repo);

        let cities = service.get_cities(&HashMap::new()).await.unwrap();
        assert_eq!(cities.len(), 2);
    }

    #[tokio::test]
    async fn test_get_cities_filter_passes_through() {
        let repo = Arc::new(RecordingRepository::with_cities(vec![
            sample_city("1", "Springfield", "IL"),
            sample_city("2", "Portland", "OR"),
        ]));
        let service = CityService::new(repo);

        let mut filter = HashMap::new();
        filter.insert("state_id".to_string(), "OR".to_string());
        let cities = service.get_cities(&filter).await.unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Portland");
    }

    #[tokio::test]
    async fn test_get_city_by_id_is_idempotent() {
        let repo = Arc::new(RecordingRepository::with_cities(vec![sample_city(
            "42",
            "Springfield",
            "IL",
        )]));
        let service = CityService::new(repo);

        let first = service.get_city_by_id("42").await.unwrap();
        let second = service.get_city_by_id("42").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_delete_city_acknowledgment() {
        let repo = Arc::new(RecordingRepository::with_cities(vec![sample_city(
            "42",
            "Springfield",
            "IL",
        )]));
        let service = CityService::new(repo);

        assert!(service.delete_city("42").await.unwrap());
        assert!(!service.delete_city("42").await.unwrap());
    }
}
