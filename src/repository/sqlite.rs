//! SQLite-backed repository
//!
//! Handles pool setup, migrations, and all database interactions for
//! cities and states.

use crate::error::AppError;
use crate::models::{City, CityPayload, State};
use crate::repository::{CityRepository, StateRepository};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Database connection pool for the city registry
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Initialize the database connection pool and run migrations
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file
    ///
    /// # Returns
    /// * `Ok(Database)` if successful
    /// * `Err(AppError)` if connection failed
    pub async fn connect(db_path: &str) -> Result<Self, AppError> {
        // Ensure parent directory exists
        if let Some(parent) = PathBuf::from(db_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
            })?;
        }

        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database path: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", db_path);

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_registry.sql");

        // Remove comments (lines starting with --) and normalize whitespace
        let mut cleaned_sql = String::new();
        for line in migration_sql.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("--") {
                continue;
            }
            let without_comments = if let Some(comment_pos) = trimmed.find("--") {
                &trimmed[..comment_pos]
            } else {
                trimmed
            };
            cleaned_sql.push_str(without_comments.trim());
            cleaned_sql.push(' ');
        }

        // Split by semicolon and execute each statement separately
        let statements: Vec<&str> = cleaned_sql
            .split(';')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Repository over a SQLite pool, implementing both storage traits
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Create a repository sharing the database's connection pool
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

#[async_trait]
impl CityRepository for SqliteRepository {
    async fn get_cities(&self, filter: &HashMap<String, String>) -> Result<Vec<City>, AppError> {
        // Recognized filter keys: name, state_id. Unknown keys are ignored.
        let mut sql =
            String::from("SELECT id, name, state_id, created_at, updated_at FROM cities");
        let mut clauses: Vec<&str> = Vec::new();
        let mut binds: Vec<&str> = Vec::new();

        if let Some(name) = filter.get("name") {
            clauses.push("name = ?");
            binds.push(name);
        }
        if let Some(state_id) = filter.get("state_id") {
            clauses.push("state_id = ?");
            binds.push(state_id);
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY name ASC");

        let mut query = sqlx::query_as::<_, City>(&sql);
        for bind in binds {
            query = query.bind(bind);
        }

        let cities = query.fetch_all(&self.pool).await?;
        Ok(cities)
    }

    async fn get_city_by_id(&self, id: &str) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>(
            "SELECT id, name, state_id, created_at, updated_at FROM cities WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(city)
    }

    async fn insert_city(&self, payload: &CityPayload) -> Result<City, AppError> {
        let city = City::new(Uuid::new_v4().to_string(), payload);

        sqlx::query(
            "INSERT INTO cities (id, name, state_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&city.id)
        .bind(&city.name)
        .bind(&city.state_id)
        .bind(city.created_at)
        .bind(city.updated_at)
        .execute(&self.pool)
        .await?;

        debug!("Created city: {}", city.id);
        Ok(city)
    }

    async fn update_city(
        &self,
        id: &str,
        payload: &CityPayload,
    ) -> Result<Option<City>, AppError> {
        let updated_at = chrono::Utc::now().timestamp();
        let result =
            sqlx::query("UPDATE cities SET name = ?, state_id = ?, updated_at = ? WHERE id = ?")
                .bind(&payload.name)
                .bind(&payload.state_id)
                .bind(updated_at)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        debug!("Updated city: {}", id);
        self.get_city_by_id(id).await
    }

    async fn delete_city(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!("Deleted city: {}", id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl StateRepository for SqliteRepository {
    async fn get_states(&self) -> Result<Vec<State>, AppError> {
        let states = sqlx::query_as::<_, State>("SELECT id, name FROM states ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(states)
    }

    async fn get_state_by_id(&self, id: &str) -> Result<Option<State>, AppError> {
        let state = sqlx::query_as::<_, State>("SELECT id, name FROM states WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(state)
    }
}
