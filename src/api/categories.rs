use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::Category;

use super::{validate_name, AppState, ListParams};

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            description: category.description.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Create a new category
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let details = validate_name(&request.name);
    if !details.is_empty() {
        return Err(AppError::Validation(details));
    }

    let category = state
        .categories
        .create(request.name, request.description)
        .await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(&category))))
}

/// List categories with optional pagination and name filtering
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let (limit, offset, name_filter) = params.validate()?;

    let categories = state.categories.list(limit, offset, name_filter).await?;

    Ok(Json(categories.iter().map(CategoryResponse::from).collect()))
}
