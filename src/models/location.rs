use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::{AppError, FieldError};

/// Mean Earth radius in kilometers, used by the Haversine distance.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Validated geographic coordinates.
///
/// Construction is the only way to obtain a value, so an existing
/// `Coordinates` is always within bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    /// Validates and creates coordinates.
    ///
    /// Longitude must be within [-180, 180] and latitude within [-90, 90];
    /// anything else is rejected outright.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, AppError> {
        let mut details = Vec::new();

        if !(-180.0..=180.0).contains(&longitude) {
            details.push(FieldError::new(
                "longitude",
                "Longitude must be between -180 and 180",
            ));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            details.push(FieldError::new(
                "latitude",
                "Latitude must be between -90 and 90",
            ));
        }

        if !details.is_empty() {
            return Err(AppError::Validation(details));
        }

        Ok(Self {
            longitude,
            latitude,
        })
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Great-circle distance to another point via the Haversine formula.
    ///
    /// Utility only; no route uses it.
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

/// A persisted location.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude()
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude()
    }
}

/// A location that has not been persisted yet; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewLocation {
    pub name: String,
    pub coordinates: Coordinates,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewLocation {
    /// Builds a new location with both timestamps set to now.
    pub fn new(name: String, coordinates: Coordinates, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            name,
            coordinates,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Database row for the `locations` table.
#[derive(Debug, FromRow)]
pub(crate) struct LocationRow {
    pub id: i64,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocationRow {
    /// Maps the row back to the domain entity.
    ///
    /// Stored coordinates were validated on the way in, so the struct is
    /// rebuilt directly rather than re-validated.
    pub fn into_domain(self) -> Location {
        Location {
            id: self.id,
            name: self.name,
            coordinates: Coordinates {
                longitude: self.longitude,
                latitude: self.latitude,
            },
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
