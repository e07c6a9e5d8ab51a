use crate::error::{AppError, AppResult};
use crate::models::{Coordinates, Location, NewLocation};
use crate::repositories::LocationRepository;

/// Use cases for locations, bound to one repository implementation at
/// construction.
#[derive(Clone)]
pub struct LocationService<R> {
    repository: R,
}

impl<R: LocationRepository> LocationService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Creates a location after validating coordinates and checking that no
    /// location with the same (name, longitude, latitude) already exists.
    pub async fn create(
        &self,
        name: String,
        longitude: f64,
        latitude: f64,
        description: Option<String>,
    ) -> AppResult<Location> {
        tracing::info!(name = %name, "creating location");

        let coordinates = Coordinates::new(longitude, latitude)?;

        let exists = self
            .repository
            .exists_by_name_and_coordinates(&name, longitude, latitude)
            .await?;
        if exists {
            tracing::warn!(name = %name, "duplicate location");
            return Err(AppError::DuplicateLocation {
                name,
                longitude,
                latitude,
            });
        }

        let created = self
            .repository
            .create(NewLocation::new(name, coordinates, description))
            .await?;

        tracing::info!(id = created.id, "location created");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Location> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(AppError::LocationNotFound(id))
    }

    pub async fn list(
        &self,
        limit: Option<i64>,
        offset: i64,
        name_filter: Option<&str>,
    ) -> AppResult<Vec<Location>> {
        tracing::info!(?limit, offset, ?name_filter, "listing locations");
        self.repository.get_all(limit, offset, name_filter).await
    }
}
