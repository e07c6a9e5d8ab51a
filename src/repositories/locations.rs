use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::location::LocationRow;
use crate::models::{Location, NewLocation};

/// Persistence contract for locations.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, location: NewLocation) -> AppResult<Location>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Location>>;

    /// Returns locations ordered by ascending id. `name_filter` is a
    /// case-insensitive substring match; `offset` skips rows before `limit`
    /// applies, and an absent limit returns all remaining rows.
    async fn get_all(
        &self,
        limit: Option<i64>,
        offset: i64,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<Location>>;

    /// Updates an existing location; returns `None` if the id is unknown.
    async fn update(&self, location: &Location) -> AppResult<Option<Location>>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn exists_by_name_and_coordinates(
        &self,
        name: &str,
        longitude: f64,
        latitude: f64,
    ) -> AppResult<bool>;
}

/// SQLite implementation of [`LocationRepository`].
#[derive(Clone)]
pub struct SqliteLocationRepository {
    pool: SqlitePool,
}

impl SqliteLocationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const LOCATION_COLUMNS: &str = "id, name, longitude, latitude, description, created_at, updated_at";

#[async_trait]
impl LocationRepository for SqliteLocationRepository {
    async fn create(&self, location: NewLocation) -> AppResult<Location> {
        tracing::debug!(name = %location.name, "inserting location");

        let row = sqlx::query_as::<_, LocationRow>(
            "INSERT INTO locations (name, longitude, latitude, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, name, longitude, latitude, description, created_at, updated_at",
        )
        .bind(&location.name)
        .bind(location.coordinates.longitude())
        .bind(location.coordinates.latitude())
        .bind(&location.description)
        .bind(location.created_at)
        .bind(location.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_domain())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Location>> {
        let row = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LocationRow::into_domain))
    }

    async fn get_all(
        &self,
        limit: Option<i64>,
        offset: i64,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<Location>> {
        // LIMIT -1 disables the limit in SQLite.
        let rows = sqlx::query_as::<_, LocationRow>(&format!(
            "SELECT {LOCATION_COLUMNS} FROM locations
             WHERE ?1 IS NULL OR instr(lower(name), lower(?1)) > 0
             ORDER BY id
             LIMIT ?2 OFFSET ?3"
        ))
        .bind(name_filter)
        .bind(limit.unwrap_or(-1))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LocationRow::into_domain).collect())
    }

    async fn update(&self, location: &Location) -> AppResult<Option<Location>> {
        let row = sqlx::query_as::<_, LocationRow>(
            "UPDATE locations
             SET name = ?, longitude = ?, latitude = ?, description = ?, updated_at = ?
             WHERE id = ?
             RETURNING id, name, longitude, latitude, description, created_at, updated_at",
        )
        .bind(&location.name)
        .bind(location.longitude())
        .bind(location.latitude())
        .bind(&location.description)
        .bind(location.updated_at)
        .bind(location.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LocationRow::into_domain))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_name_and_coordinates(
        &self,
        name: &str,
        longitude: f64,
        latitude: f64,
    ) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM locations
                 WHERE name = ? AND longitude = ? AND latitude = ?
             )",
        )
        .bind(name)
        .bind(longitude)
        .bind(latitude)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
