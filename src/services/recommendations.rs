use chrono::{Duration, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{LocationCategoryReview, Recommendation};
use crate::repositories::ReviewRepository;

/// Fixed number of pairs the recommendation endpoint returns.
pub const RECOMMENDATION_LIMIT: i64 = 10;

/// A pair reviewed within this many days counts as fresh and is excluded.
pub const REVIEW_FRESHNESS_DAYS: i64 = 30;

/// Use cases for the review log: the recommendation query and the
/// mark-as-reviewed upsert.
#[derive(Clone)]
pub struct RecommendationService<R> {
    repository: R,
}

impl<R: ReviewRepository> RecommendationService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns up to [`RECOMMENDATION_LIMIT`] location-category pairs needing
    /// attention: never reviewed, or last reviewed more than
    /// [`REVIEW_FRESHNESS_DAYS`] days ago. Never-reviewed pairs sort first,
    /// then ascending `reviewed_at`.
    pub async fn get_recommendations(&self) -> AppResult<Vec<Recommendation>> {
        tracing::info!("getting recommendations");

        let cutoff = Utc::now() - Duration::days(REVIEW_FRESHNESS_DAYS);
        let recommendations = self
            .repository
            .get_recommendations(RECOMMENDATION_LIMIT, cutoff)
            .await?;

        tracing::info!(count = recommendations.len(), "recommendations computed");
        Ok(recommendations)
    }

    /// Marks a (location, category) pair as reviewed now.
    ///
    /// Both ids must reference existing rows; the checks run in order and
    /// fail with distinct errors. Repeated calls refresh the timestamp on the
    /// same review row.
    pub async fn mark_as_reviewed(
        &self,
        location_id: i64,
        category_id: i64,
    ) -> AppResult<LocationCategoryReview> {
        tracing::info!(location_id, category_id, "marking pair as reviewed");

        if !self.repository.location_exists(location_id).await? {
            tracing::warn!(location_id, "location not found");
            return Err(AppError::LocationNotFound(location_id));
        }
        if !self.repository.category_exists(category_id).await? {
            tracing::warn!(category_id, "category not found");
            return Err(AppError::CategoryNotFound(category_id));
        }

        let review = self
            .repository
            .mark_as_reviewed(location_id, category_id, Utc::now())
            .await?;

        tracing::info!(review_id = review.id, "pair marked as reviewed");
        Ok(review)
    }
}
