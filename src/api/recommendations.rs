use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::Recommendation;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub location_id: i64,
    pub location_name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub category_id: i64,
    pub category_name: String,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<&Recommendation> for RecommendationResponse {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            location_id: recommendation.location_id,
            location_name: recommendation.location_name.clone(),
            longitude: recommendation.longitude,
            latitude: recommendation.latitude,
            category_id: recommendation.category_id,
            category_name: recommendation.category_name.clone(),
            reviewed_at: recommendation.reviewed_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MarkReviewedRequest {
    pub location_id: i64,
    pub category_id: i64,
}

/// Get location-category pairs not reviewed in the last 30 days
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RecommendationResponse>>> {
    let recommendations = state.recommendations.get_recommendations().await?;

    Ok(Json(
        recommendations
            .iter()
            .map(RecommendationResponse::from)
            .collect(),
    ))
}

/// Mark a location-category pair as reviewed now
pub async fn mark_reviewed(
    State(state): State<AppState>,
    Json(request): Json<MarkReviewedRequest>,
) -> AppResult<Json<Value>> {
    state
        .recommendations
        .mark_as_reviewed(request.location_id, request.category_id)
        .await?;

    Ok(Json(json!({ "message": "Successfully marked as reviewed" })))
}
