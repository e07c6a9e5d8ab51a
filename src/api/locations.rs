use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, FieldError};
use crate::models::Location;

use super::{validate_name, AppState, ListParams};

#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub description: Option<String>,
}

impl CreateLocationRequest {
    /// Boundary validation; coordinate range checks live in the domain
    /// constructor and run inside the service.
    fn validate(&self) -> AppResult<()> {
        let details: Vec<FieldError> = validate_name(&self.name);
        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(details))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub id: i64,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id,
            name: location.name.clone(),
            longitude: location.longitude(),
            latitude: location.latitude(),
            description: location.description.clone(),
            created_at: location.created_at,
            updated_at: location.updated_at,
        }
    }
}

/// Create a new location
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateLocationRequest>,
) -> AppResult<(StatusCode, Json<LocationResponse>)> {
    request.validate()?;

    let location = state
        .locations
        .create(
            request.name,
            request.longitude,
            request.latitude,
            request.description,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(LocationResponse::from(&location))))
}

/// List locations with optional pagination and name filtering
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<LocationResponse>>> {
    let (limit, offset, name_filter) = params.validate()?;

    let locations = state.locations.list(limit, offset, name_filter).await?;

    Ok(Json(locations.iter().map(LocationResponse::from).collect()))
}

/// Get a single location by id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<LocationResponse>> {
    let location = state.locations.get_by_id(id).await?;
    Ok(Json(LocationResponse::from(&location)))
}
